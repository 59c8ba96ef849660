//! # Immutable point-in-time view of the listener set.
//!
//! A [`Snapshot`] is an ordered sequence of listener handles frozen at one
//! instant. Edits never mutate a snapshot; they build a new one. The swap
//! protocol in the lock-free backend relies on that: once a snapshot is
//! published, any thread holding its `Arc` can walk it without any
//! synchronization.
//!
//! ## Rules
//! - **Append order is registration order** — dispatch delivers in it.
//! - **No duplicates** under the equality policy that built the snapshot.
//! - **No-op edits return the receiver `Arc` itself** (reference-identical),
//!   so callers can detect "nothing to do" and skip the install step.
//!
//! Lookup is a linear scan. Registrations are rare and sets are expected to
//! be small (tens of listeners), so O(n) beats the constant factors of an
//! index here.

use std::sync::Arc;

use crate::listeners::{EqualityPolicy, ListenerRef};

/// Immutable, ordered listener set.
pub struct Snapshot<T> {
    listeners: Vec<ListenerRef<T>>,
}

impl<T: 'static> Snapshot<T> {
    /// Returns a shared empty snapshot, the starting state of every registry.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            listeners: Vec::new(),
        })
    }

    /// Returns `true` if an equal listener (under `equality`) is present.
    pub fn contains(&self, listener: &ListenerRef<T>, equality: EqualityPolicy) -> bool {
        self.listeners.iter().any(|l| equality.same(l, listener))
    }

    /// Returns a new snapshot with `listener` appended.
    ///
    /// If an equal listener is already present, returns the receiver `Arc`
    /// unchanged — callers detect the no-op via `Arc::ptr_eq`.
    pub fn with_added(
        self: &Arc<Self>,
        listener: ListenerRef<T>,
        equality: EqualityPolicy,
    ) -> Arc<Self> {
        if self.contains(&listener, equality) {
            return Arc::clone(self);
        }
        let mut listeners = self.listeners.clone();
        listeners.push(listener);
        Arc::new(Self { listeners })
    }

    /// Returns a new snapshot with the first equal listener removed.
    ///
    /// If no equal listener is present, returns the receiver `Arc` unchanged.
    pub fn with_removed(
        self: &Arc<Self>,
        listener: &ListenerRef<T>,
        equality: EqualityPolicy,
    ) -> Arc<Self> {
        match self
            .listeners
            .iter()
            .position(|l| equality.same(l, listener))
        {
            None => Arc::clone(self),
            Some(idx) => {
                let mut listeners = self.listeners.clone();
                listeners.remove(idx);
                Arc::new(Self { listeners })
            }
        }
    }

    /// Listener handles in registration order.
    pub fn listeners(&self) -> &[ListenerRef<T>] {
        &self.listeners
    }

    /// Number of registered listeners in this snapshot.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if this snapshot holds no listeners.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
