//! # Lock-free backend — snapshot swap via compare-and-swap.
//!
//! The registry holds exactly one current [`Snapshot`] reference in an
//! [`ArcSwap`]. Writers never lock: each edit loads the current snapshot,
//! builds an edited copy, and installs it with a compare-and-swap that only
//! succeeds if the slot still holds the snapshot the edit was computed from.
//! Losers recompute against the winner's snapshot and try again.
//!
//! ## Architecture
//! ```text
//! register(D)                       register(E)          (concurrently)
//!   load ──► {A,B,C}                  load ──► {A,B,C}
//!   clone+edit ──► {A,B,C,D}          clone+edit ──► {A,B,C,E}
//!   CAS {A,B,C}→{A,B,C,D}  ✓         CAS {A,B,C}→{A,B,C,E}  ✗ (slot moved)
//!                                     load ──► {A,B,C,D}
//!                                     clone+edit ──► {A,B,C,D,E}
//!                                     CAS {A,B,C,D}→{A,B,C,D,E}  ✓
//! ```
//!
//! ## Rules
//! - The CAS compares snapshot **references** (`Arc::ptr_eq`), never logical
//!   equality; correctness rides on hardware identity comparison.
//! - Lock-free, not wait-free: exactly one contender wins each round, so the
//!   system always advances even though a single writer's retry count is
//!   unbounded in theory.
//! - Dispatch performs one atomic load and then walks its snapshot with no
//!   further synchronization. Superseded snapshots stay alive until the last
//!   in-flight dispatch drops its `Arc`.
//! - Re-entrant: a listener may register/unregister/dispatch on the same
//!   registry from inside its callback.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, trace};

use crate::error::DispatchError;
use crate::listeners::{EqualityPolicy, ListenerRef};
use crate::policies::RetryBackoff;
use crate::registry::{deliver, Notify};
use crate::snapshot::Snapshot;

/// Lock-free listener registry.
///
/// The default backend; see the module docs for the protocol.
pub struct LockFreeRegistry<T> {
    snap: ArcSwap<Snapshot<T>>,
    equality: EqualityPolicy,
    backoff: RetryBackoff,
}

impl<T: 'static> LockFreeRegistry<T> {
    /// Creates an empty registry with the given policies.
    pub fn new(equality: EqualityPolicy, backoff: RetryBackoff) -> Self {
        Self {
            snap: ArcSwap::new(Snapshot::empty()),
            equality,
            backoff,
        }
    }

    /// Returns the current snapshot.
    ///
    /// The returned `Arc` pins that point-in-time view: it stays valid (and
    /// unchanged) no matter how many edits land afterwards.
    pub fn current(&self) -> Arc<Snapshot<T>> {
        self.snap.load_full()
    }

    /// Runs one edit through the CAS retry loop.
    ///
    /// `edit` maps an observed snapshot to a candidate; returning a
    /// reference-identical snapshot means "nothing to do" and skips the
    /// install step entirely.
    fn swap_loop(&self, op: &'static str, edit: impl Fn(&Arc<Snapshot<T>>) -> Arc<Snapshot<T>>) {
        let mut attempt = 0u32;
        loop {
            let observed = self.snap.load_full();
            let candidate = edit(&observed);
            if Arc::ptr_eq(&candidate, &observed) {
                trace!(op, "no-op edit, nothing to install");
                return;
            }

            let prev = self.snap.compare_and_swap(&observed, Arc::clone(&candidate));
            if Arc::ptr_eq(&prev, &observed) {
                debug!(op, len = candidate.len(), "edit installed");
                return;
            }

            // Lost the round: another writer moved the slot. Recompute
            // against whatever is current now.
            attempt += 1;
            trace!(op, attempt, "lost install race, retrying");
            self.backoff.wait(attempt);
        }
    }
}

impl<T: 'static> Notify<T> for LockFreeRegistry<T> {
    fn register(&self, listener: ListenerRef<T>) {
        let equality = self.equality;
        self.swap_loop("register", move |observed| {
            observed.with_added(Arc::clone(&listener), equality)
        });
    }

    fn unregister(&self, listener: &ListenerRef<T>) {
        let equality = self.equality;
        self.swap_loop("unregister", move |observed| {
            observed.with_removed(listener, equality)
        });
    }

    fn dispatch(&self, value: &T) -> Result<(), DispatchError> {
        // One atomic load; everything after runs against the pinned snapshot.
        let snapshot = self.snap.load_full();
        deliver(snapshot.listeners(), value)
    }

    fn len(&self) -> usize {
        self.snap.load().len()
    }
}
