//! # Mutex backend — one lock over the listener list.
//!
//! The simplest contract-compatible strategy: a single
//! [`parking_lot::Mutex`] guards the list for edits and for the dispatch
//! capture. Dispatchers serialize on that capture, which is exactly the
//! throughput this backend trades away for simplicity.
//!
//! ## Rules
//! - The lock covers the **capture only**, never the callbacks: dispatch
//!   clones the list out and drops the guard before invoking. A listener may
//!   therefore re-enter the registry without deadlocking.
//! - Duplicates and ordering behave identically to the other backends.

use parking_lot::Mutex;
use std::sync::Arc;

use tracing::debug;

use crate::error::DispatchError;
use crate::listeners::{EqualityPolicy, ListenerRef};
use crate::registry::{deliver, Notify};

/// Listener registry guarded by a single mutex.
pub struct MutexRegistry<T> {
    listeners: Mutex<Vec<ListenerRef<T>>>,
    equality: EqualityPolicy,
}

impl<T: 'static> MutexRegistry<T> {
    /// Creates an empty registry with the given equality policy.
    pub fn new(equality: EqualityPolicy) -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            equality,
        }
    }
}

impl<T: 'static> Notify<T> for MutexRegistry<T> {
    fn register(&self, listener: ListenerRef<T>) {
        let mut listeners = self.listeners.lock();
        if listeners.iter().any(|l| self.equality.same(l, &listener)) {
            return;
        }
        listeners.push(listener);
        debug!(op = "register", len = listeners.len(), "edit installed");
    }

    fn unregister(&self, listener: &ListenerRef<T>) {
        let mut listeners = self.listeners.lock();
        if let Some(idx) = listeners.iter().position(|l| self.equality.same(l, listener)) {
            listeners.remove(idx);
            debug!(op = "unregister", len = listeners.len(), "edit installed");
        }
    }

    fn dispatch(&self, value: &T) -> Result<(), DispatchError> {
        let captured: Vec<ListenerRef<T>> = {
            let listeners = self.listeners.lock();
            listeners.iter().map(Arc::clone).collect()
        };
        deliver(&captured, value)
    }

    fn len(&self) -> usize {
        self.listeners.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    use crate::error::ListenerError;
    use crate::listeners::ListenerFn;

    fn noop(name: String) -> ListenerRef<u32> {
        ListenerFn::arc(name, |_: &u32| Ok::<_, ListenerError>(()))
    }

    #[test]
    fn test_dedup_and_removal() {
        let reg: MutexRegistry<u32> = MutexRegistry::new(EqualityPolicy::ByName);
        reg.register(noop("x".to_string()));
        reg.register(noop("x".to_string()));
        assert_eq!(reg.len(), 1);

        reg.unregister(&noop("x".to_string()));
        assert!(reg.is_empty());
        reg.unregister(&noop("x".to_string())); // absent: no-op
    }

    #[test]
    fn test_concurrent_registration_loses_nothing() {
        let reg: MutexRegistry<u32> = MutexRegistry::new(EqualityPolicy::Identity);
        let listeners: Vec<ListenerRef<u32>> =
            (0..50).map(|i| noop(format!("listener-{i}"))).collect();
        let barrier = Barrier::new(listeners.len());

        std::thread::scope(|s| {
            for listener in &listeners {
                let listener = Arc::clone(listener);
                let (barrier, reg) = (&barrier, &reg);
                s.spawn(move || {
                    barrier.wait();
                    reg.register(listener);
                });
            }
        });

        assert_eq!(reg.len(), 50);
    }

    #[test]
    fn test_callbacks_run_outside_the_lock() {
        // A listener that re-enters the registry would deadlock if dispatch
        // held the lock across callbacks.
        let reg = Arc::new(MutexRegistry::<u32>::new(EqualityPolicy::Identity));
        let hits = Arc::new(AtomicUsize::new(0));

        let reentrant: ListenerRef<u32> = {
            let reg = Arc::clone(&reg);
            let hits = Arc::clone(&hits);
            ListenerFn::arc("reentrant", move |_: &u32| {
                reg.register({
                    let hits = Arc::clone(&hits);
                    ListenerFn::arc("added-mid-dispatch", move |_: &u32| {
                        hits.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, ListenerError>(())
                    })
                });
                Ok::<_, ListenerError>(())
            })
        };

        reg.register(reentrant);
        reg.dispatch(&1).expect("re-entrant dispatch succeeds");
        assert_eq!(reg.len(), 2);
        assert_eq!(
            hits.load(Ordering::SeqCst),
            0,
            "the mid-dispatch addition must miss the captured traversal"
        );
    }
}
