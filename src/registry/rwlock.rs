//! # Reader/writer backend — concurrent captures, serialized edits.
//!
//! A [`parking_lot::RwLock`] guards the listener list. Any number of
//! dispatchers take the read lock for their capture simultaneously; edits
//! take the write lock and serialize against captures.
//!
//! ## Fairness
//! parking_lot's task-fair queuing keeps a waiting writer from being starved
//! by a stream of readers, so edit latency stays bounded. That is the right
//! trade here: edits are rare, and a bounded register/unregister beats the
//! last few percent of read throughput.
//!
//! ## Rules
//! - The read lock covers the **capture only**; callbacks run after the
//!   guard is dropped, so a slow listener never blocks a writer.
//! - A listener may re-enter the registry from its callback.

use parking_lot::RwLock;
use std::sync::Arc;

use tracing::debug;

use crate::error::DispatchError;
use crate::listeners::{EqualityPolicy, ListenerRef};
use crate::registry::{deliver, Notify};

/// Listener registry guarded by a reader/writer lock.
pub struct RwLockRegistry<T> {
    listeners: RwLock<Vec<ListenerRef<T>>>,
    equality: EqualityPolicy,
}

impl<T: 'static> RwLockRegistry<T> {
    /// Creates an empty registry with the given equality policy.
    pub fn new(equality: EqualityPolicy) -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            equality,
        }
    }
}

impl<T: 'static> Notify<T> for RwLockRegistry<T> {
    fn register(&self, listener: ListenerRef<T>) {
        let mut listeners = self.listeners.write();
        if listeners.iter().any(|l| self.equality.same(l, &listener)) {
            return;
        }
        listeners.push(listener);
        debug!(op = "register", len = listeners.len(), "edit installed");
    }

    fn unregister(&self, listener: &ListenerRef<T>) {
        let mut listeners = self.listeners.write();
        if let Some(idx) = listeners.iter().position(|l| self.equality.same(l, listener)) {
            listeners.remove(idx);
            debug!(op = "unregister", len = listeners.len(), "edit installed");
        }
    }

    fn dispatch(&self, value: &T) -> Result<(), DispatchError> {
        let captured: Vec<ListenerRef<T>> = {
            let listeners = self.listeners.read();
            listeners.iter().map(Arc::clone).collect()
        };
        deliver(&captured, value)
    }

    fn len(&self) -> usize {
        self.listeners.read().len()
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
        let reg: RwLockRegistry<u32> = RwLockRegistry::new(EqualityPolicy::ByName);
        reg.register(noop("x".to_string()));
        reg.register(noop("x".to_string()));
        assert_eq!(reg.len(), 1);

        reg.unregister(&noop("x".to_string()));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_concurrent_registration_loses_nothing() {
        let reg: RwLockRegistry<u32> = RwLockRegistry::new(EqualityPolicy::Identity);
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
    fn test_slow_listener_does_not_block_writers() {
        let reg = Arc::new(RwLockRegistry::<u32>::new(EqualityPolicy::Identity));
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let hits = Arc::new(AtomicUsize::new(0));

        let gate: ListenerRef<u32> = {
            let (entered, release) = (Arc::clone(&entered), Arc::clone(&release));
            ListenerFn::arc("gate", move |_: &u32| {
                entered.wait();
                release.wait();
                Ok::<_, ListenerError>(())
            })
        };
        reg.register(gate);

        let dispatcher = {
            let reg = Arc::clone(&reg);
            std::thread::spawn(move || reg.dispatch(&1))
        };

        // Dispatch parked inside `gate` — its read guard is already gone,
        // so a write must go through without waiting for the callback.
        entered.wait();
        let late = {
            let hits = Arc::clone(&hits);
            ListenerFn::arc("late", move |_: &u32| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ListenerError>(())
            })
        };
        reg.register(late);
        assert_eq!(reg.len(), 2);
        release.wait();

        dispatcher
            .join()
            .expect("dispatcher thread")
            .expect("captured listener succeeds");
        assert_eq!(
            hits.load(Ordering::SeqCst),
            0,
            "the late listener must miss the in-flight dispatch"
        );
    }
}
