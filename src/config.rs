//! # Registry configuration.
//!
//! [`RegistryConfig`] selects the backing strategy and the policies shared by
//! all backends: which [`Backend`] carries the listener set, how listeners
//! compare for dedup, and what a writer does after a lost install race.
//!
//! # Example
//! ```
//! use fanout::{Backend, EqualityPolicy, RegistryConfig, RetryBackoff};
//!
//! let mut cfg = RegistryConfig::default();
//! cfg.backend = Backend::RwLock;
//! cfg.equality = EqualityPolicy::ByName;
//! cfg.backoff = RetryBackoff::Yield;
//!
//! assert_eq!(cfg.backend, Backend::RwLock);
//! ```

use crate::listeners::EqualityPolicy;
use crate::policies::RetryBackoff;

/// Backing strategy for a registry.
///
/// All three satisfy the same register/unregister/dispatch contract; they
/// differ only in who waits on whom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Snapshot swap via compare-and-swap. No operation ever blocks on
    /// another; writers retry lost races. The default.
    LockFree,

    /// One mutex over the listener list. Simplest; dispatch captures
    /// serialize against each other and against edits.
    Mutex,

    /// Reader/writer lock. Concurrent dispatch captures proceed; edits
    /// serialize against captures.
    RwLock,
}

impl Default for Backend {
    /// Returns [`Backend::LockFree`].
    fn default() -> Self {
        Backend::LockFree
    }
}

/// Configuration for building a [`Registry`](crate::Registry).
///
/// Controls the backend, the dedup equality notion, and the CAS retry wait.
#[derive(Clone, Copy, Debug)]
pub struct RegistryConfig {
    /// Backing strategy carrying the listener set.
    pub backend: Backend,
    /// How two listener handles compare for dedup and removal.
    pub equality: EqualityPolicy,
    /// Wait applied between lost compare-and-swap rounds (lock-free backend
    /// only; ignored by the lock backends).
    pub backoff: RetryBackoff,
}

impl Default for RegistryConfig {
    /// Provides the default configuration:
    /// - `backend = Backend::LockFree`
    /// - `equality = EqualityPolicy::Identity`
    /// - `backoff = RetryBackoff::Spin`
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            equality: EqualityPolicy::default(),
            backoff: RetryBackoff::default(),
        }
    }
}
