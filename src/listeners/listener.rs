//! # Core listener trait
//!
//! `Listener` is the contract for callbacks invoked by `dispatch`. Each
//! listener is called synchronously, on the dispatching thread, with a shared
//! reference to the produced value.
//!
//! ## Contract
//! - Implementations should be quick; a slow listener delays the remaining
//!   listeners of the same dispatch (delivery is in registration order).
//! - Returning an error never aborts the traversal — the error is recorded
//!   and surfaced to the dispatcher after all listeners were attempted.
//! - With the lock-free backend a listener may call back into the same
//!   registry (register/unregister/dispatch) from inside `on_event`.

use std::sync::Arc;

use crate::error::ListenerError;

/// Shared listener handle used throughout the registry.
pub type ListenerRef<T> = Arc<dyn Listener<T>>;

/// # Synchronous delivery callback.
///
/// A `Listener` has a stable [`name`](Listener::name) and an
/// [`on_event`](Listener::on_event) method invoked once per dispatched value.
///
/// # Example
/// ```
/// use fanout::{Listener, ListenerError};
///
/// struct Audit;
///
/// impl Listener<String> for Audit {
///     fn name(&self) -> &str { "audit" }
///
///     fn on_event(&self, value: &String) -> Result<(), ListenerError> {
///         // write audit record...
///         let _ = value;
///         Ok(())
///     }
/// }
/// ```
pub trait Listener<T>: Send + Sync + 'static {
    /// Human-readable name (for logs and failure reports).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Handles a single dispatched value.
    ///
    /// # Parameters
    /// - `value`: Reference to the value (does not transfer ownership)
    fn on_event(&self, value: &T) -> Result<(), ListenerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named;

    impl Listener<u32> for Named {
        fn on_event(&self, _value: &u32) -> Result<(), ListenerError> {
            Ok(())
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        let l = Named;
        assert!(
            l.name().ends_with("Named"),
            "default name should come from the type, got {:?}",
            l.name()
        );
    }
}
