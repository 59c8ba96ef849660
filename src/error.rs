//! Error types used by the registry and listener callbacks.
//!
//! This module defines:
//!
//! - [`ListenerError`] — a single listener's failure during delivery.
//! - [`DeliveryFailure`] — a `(listener name, error)` pair recorded by dispatch.
//! - [`DispatchError`] — the aggregate surfaced after a full traversal.
//!
//! Types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! Note that a lost compare-and-swap round during registration is *not* an
//! error; contention is silently retried and never surfaced here.

use thiserror::Error;

/// # Errors produced by a listener callback.
///
/// A failing listener never aborts a dispatch in progress; its error is
/// recorded and delivery continues with the remaining listeners.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The callback returned an error.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The callback panicked; the panic was caught and delivery continued.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text (or `"unknown panic"`).
        info: String,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Failed`] from any displayable error.
    pub fn failed(error: impl Into<String>) -> Self {
        ListenerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanout::ListenerError;
    ///
    /// let err = ListenerError::failed("connection refused");
    /// assert_eq!(err.as_label(), "listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

/// A single recorded delivery failure: which listener, and what went wrong.
#[derive(Debug, Clone)]
pub struct DeliveryFailure {
    /// Stable listener name (see `Listener::name`).
    pub listener: String,
    /// The failure observed while invoking that listener.
    pub error: ListenerError,
}

/// # Aggregate dispatch failure.
///
/// Dispatch attempts delivery to *every* listener in the captured snapshot
/// before reporting; this error carries one [`DeliveryFailure`] per listener
/// that failed. `attempted` counts all listeners in the snapshot, including
/// the ones that succeeded.
#[derive(Error, Debug)]
#[error("{} of {attempted} listeners failed", .failures.len())]
pub struct DispatchError {
    /// Total number of listeners in the dispatched snapshot.
    pub attempted: usize,
    /// Failures recorded during the traversal, in snapshot order.
    pub failures: Vec<DeliveryFailure>,
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "dispatch_partial_failure"
    }

    /// Returns a human-readable message listing the failed listeners.
    ///
    /// # Example
    /// ```
    /// use fanout::{DeliveryFailure, DispatchError, ListenerError};
    ///
    /// let err = DispatchError {
    ///     attempted: 3,
    ///     failures: vec![DeliveryFailure {
    ///         listener: "audit".to_string(),
    ///         error: ListenerError::failed("disk full"),
    ///     }],
    /// };
    /// assert_eq!(err.as_message(), "1 of 3 failed: [audit: error: disk full]");
    /// ```
    pub fn as_message(&self) -> String {
        let details: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.listener, f.error.as_message()))
            .collect();
        format!(
            "{} of {} failed: [{}]",
            self.failures.len(),
            self.attempted,
            details.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_error_labels() {
        let failed = ListenerError::failed("boom");
        assert_eq!(failed.as_label(), "listener_failed");

        let panicked = ListenerError::Panicked {
            info: "boom".to_string(),
        };
        assert_eq!(panicked.as_label(), "listener_panicked");
    }

    #[test]
    fn test_listener_error_display() {
        let err = ListenerError::failed("connection refused");
        assert_eq!(err.to_string(), "listener failed: connection refused");
        assert_eq!(err.as_message(), "error: connection refused");
    }

    #[test]
    fn test_dispatch_error_display_counts() {
        let err = DispatchError {
            attempted: 5,
            failures: vec![
                DeliveryFailure {
                    listener: "a".to_string(),
                    error: ListenerError::failed("x"),
                },
                DeliveryFailure {
                    listener: "b".to_string(),
                    error: ListenerError::Panicked {
                        info: "y".to_string(),
                    },
                },
            ],
        };
        assert_eq!(err.to_string(), "2 of 5 listeners failed");
        assert_eq!(err.as_label(), "dispatch_partial_failure");
        assert_eq!(err.as_message(), "2 of 5 failed: [a: error: x, b: panic: y]");
    }
}
