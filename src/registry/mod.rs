//! # Registry backends and the delivery contract.
//!
//! [`Notify`] is the contract every backend satisfies; [`Registry`] is the
//! facade that picks a backend from a [`RegistryConfig`]. The backends trade
//! concurrency differently but are observably interchangeable:
//!
//! ```text
//!                         ┌─ LockFreeRegistry  (CAS snapshot swap, default)
//! Registry::new(config) ──┼─ MutexRegistry     (one lock over everything)
//!                         └─ RwLockRegistry    (concurrent captures)
//! ```
//!
//! ## Rules
//! - `register` / `unregister` are idempotent under the configured equality.
//! - `dispatch` delivers to the set captured at its start, in registration
//!   order, on the calling thread; later edits don't affect it.
//! - A listener failure or panic is recorded and delivery continues; the
//!   aggregate surfaces as [`DispatchError`] after the full traversal.

mod lock_free;
mod mutex;
mod rwlock;

pub use lock_free::LockFreeRegistry;
pub use mutex::MutexRegistry;
pub use rwlock::RwLockRegistry;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::config::{Backend, RegistryConfig};
use crate::error::{DeliveryFailure, DispatchError, ListenerError};
use crate::listeners::ListenerRef;

/// Contract shared by all registry backends.
pub trait Notify<T>: Send + Sync {
    /// Registers a listener. Idempotent: a listener already present under
    /// the configured equality is left alone.
    fn register(&self, listener: ListenerRef<T>);

    /// Unregisters the first listener equal to `listener`. Idempotent:
    /// absent listeners are a no-op.
    fn unregister(&self, listener: &ListenerRef<T>);

    /// Delivers `value` to every currently-registered listener,
    /// synchronously, in registration order, on the calling thread.
    fn dispatch(&self, value: &T) -> Result<(), DispatchError>;

    /// Number of currently-registered listeners.
    fn len(&self) -> usize;

    /// Returns `true` if no listeners are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configurable fan-out registry.
///
/// Owns one backend selected at construction time. Build it explicitly and
/// pass it where needed; there is deliberately no global instance.
pub struct Registry<T> {
    inner: Box<dyn Notify<T>>,
}

impl<T: 'static> Registry<T> {
    /// Builds a registry with the backend and policies from `config`.
    pub fn new(config: RegistryConfig) -> Self {
        let inner: Box<dyn Notify<T>> = match config.backend {
            Backend::LockFree => {
                Box::new(LockFreeRegistry::new(config.equality, config.backoff))
            }
            Backend::Mutex => Box::new(MutexRegistry::new(config.equality)),
            Backend::RwLock => Box::new(RwLockRegistry::new(config.equality)),
        };
        Self { inner }
    }

    /// Builds the default lock-free registry.
    pub fn lock_free() -> Self {
        Self::new(RegistryConfig::default())
    }

    /// Builds a registry backed by a single mutex.
    pub fn with_mutex() -> Self {
        Self::new(RegistryConfig {
            backend: Backend::Mutex,
            ..RegistryConfig::default()
        })
    }

    /// Builds a registry backed by a reader/writer lock.
    pub fn with_rwlock() -> Self {
        Self::new(RegistryConfig {
            backend: Backend::RwLock,
            ..RegistryConfig::default()
        })
    }
}

impl<T: 'static> Registry<T> {
    /// See [`Notify::register`].
    pub fn register(&self, listener: ListenerRef<T>) {
        self.inner.register(listener);
    }

    /// See [`Notify::unregister`].
    pub fn unregister(&self, listener: &ListenerRef<T>) {
        self.inner.unregister(listener);
    }

    /// See [`Notify::dispatch`].
    pub fn dispatch(&self, value: &T) -> Result<(), DispatchError> {
        self.inner.dispatch(value)
    }

    /// See [`Notify::len`].
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// See [`Notify::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T: 'static> Notify<T> for Registry<T> {
    fn register(&self, listener: ListenerRef<T>) {
        Registry::register(self, listener);
    }

    fn unregister(&self, listener: &ListenerRef<T>) {
        Registry::unregister(self, listener);
    }

    fn dispatch(&self, value: &T) -> Result<(), DispatchError> {
        Registry::dispatch(self, value)
    }

    fn len(&self) -> usize {
        Registry::len(self)
    }
}

// ---------------------------
// Helpers (DRY)
// ---------------------------

/// Delivers `value` to each captured listener, aggregating failures.
///
/// Panics are caught per listener so one bad callback cannot take down the
/// dispatcher or starve the listeners after it.
pub(crate) fn deliver<T: 'static>(
    listeners: &[ListenerRef<T>],
    value: &T,
) -> Result<(), DispatchError> {
    let attempted = listeners.len();
    let mut failures: Vec<DeliveryFailure> = Vec::new();

    for listener in listeners {
        match panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(value))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => failures.push(DeliveryFailure {
                listener: listener.name().to_string(),
                error,
            }),
            Err(payload) => failures.push(DeliveryFailure {
                listener: listener.name().to_string(),
                error: ListenerError::Panicked {
                    info: panic_info(&*payload),
                },
            }),
        }
    }

    if failures.is_empty() {
        debug!(delivered = attempted, "dispatch complete");
        Ok(())
    } else {
        debug!(
            delivered = attempted - failures.len(),
            failed = failures.len(),
            "dispatch completed with failures"
        );
        Err(DispatchError {
            attempted,
            failures,
        })
    }
}

/// Renders a caught panic payload as text.
fn panic_info(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::listeners::ListenerFn;

    fn counting(name: &'static str, hits: &Arc<AtomicUsize>) -> ListenerRef<u32> {
        let hits = Arc::clone(hits);
        ListenerFn::arc(name, move |_: &u32| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ListenerError>(())
        })
    }

    fn contract_battery(registry: &Registry<u32>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let a = counting("a", &hits);
        let b = counting("b", &hits);

        registry.register(Arc::clone(&a));
        registry.register(Arc::clone(&a)); // dedup by identity
        registry.register(Arc::clone(&b));
        assert_eq!(registry.len(), 2);

        registry.dispatch(&7).expect("all listeners succeed");
        assert_eq!(hits.load(Ordering::SeqCst), 2, "each listener fires once");

        registry.unregister(&a);
        registry.unregister(&a); // absent: no-op
        assert_eq!(registry.len(), 1);

        registry.dispatch(&7).expect("remaining listener succeeds");
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        registry.unregister(&b);
        assert!(registry.is_empty());
        registry.dispatch(&7).expect("empty dispatch is fine");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_contract_holds_for_every_backend() {
        for backend in [Backend::LockFree, Backend::Mutex, Backend::RwLock] {
            let registry: Registry<u32> = Registry::new(RegistryConfig {
                backend,
                ..RegistryConfig::default()
            });
            contract_battery(&registry);
        }
    }

    #[test]
    fn test_deliver_aggregates_error_and_panic() {
        let hits = Arc::new(AtomicUsize::new(0));
        let first = counting("first", &hits);
        let failing: ListenerRef<u32> =
            ListenerFn::arc("failing", |_: &u32| Err::<(), _>(ListenerError::failed("boom")));
        let panicking: ListenerRef<u32> =
            ListenerFn::arc("panicking", |_: &u32| -> Result<(), ListenerError> {
                panic!("kaboom")
            });
        let last = counting("last", &hits);

        let listeners = vec![first, failing, panicking, last];
        let err = deliver(&listeners, &1).expect_err("two listeners failed");

        assert_eq!(err.attempted, 4);
        assert_eq!(err.failures.len(), 2);
        assert_eq!(err.failures[0].listener, "failing");
        assert_eq!(err.failures[0].error, ListenerError::failed("boom"));
        assert_eq!(err.failures[1].listener, "panicking");
        assert_eq!(
            err.failures[1].error,
            ListenerError::Panicked {
                info: "kaboom".to_string()
            }
        );
        assert_eq!(
            hits.load(Ordering::SeqCst),
            2,
            "listeners before and after the failures must still run"
        );
    }

    #[test]
    fn test_registry_is_object_safe() {
        let registry: Registry<u32> = Registry::lock_free();
        let as_dyn: &dyn Notify<u32> = &registry;
        let hits = Arc::new(AtomicUsize::new(0));
        as_dyn.register(counting("via-dyn", &hits));
        as_dyn.dispatch(&1).expect("delivery through the trait object");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
