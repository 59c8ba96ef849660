//! # Equality policy for listener deduplication.
//!
//! [`EqualityPolicy`] decides when two listener handles count as "the same
//! listener" for registration dedup and for removal.
//!
//! - [`EqualityPolicy::Identity`] — same allocation (default)
//! - [`EqualityPolicy::ByName`] — same [`name()`](crate::Listener::name)
//!
//! ## Trade-offs
//! - **Identity**: registering two clones of one `Arc` dedups, registering
//!   two separate allocations with identical behavior does not. Cheap and
//!   never calls user code.
//! - **ByName**: logical dedup across allocations; removal works with any
//!   handle carrying the right name. Calls into user code, so a misbehaving
//!   `name()` can break dedup.

use std::sync::Arc;

use crate::listeners::listener::ListenerRef;

/// Policy deciding when two listener handles are the same listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EqualityPolicy {
    /// Same heap allocation: compares the listener's address, not its
    /// contents. Two clones of one `Arc` are equal; two `Arc::new` results
    /// never are.
    Identity,

    /// Same stable name: compares [`Listener::name`](crate::Listener::name).
    /// Lets callers unregister with a freshly-built handle of the same name.
    ByName,
}

impl Default for EqualityPolicy {
    /// Returns [`EqualityPolicy::Identity`]: the swap protocol itself
    /// compares by identity, and the dedup default follows it.
    fn default() -> Self {
        EqualityPolicy::Identity
    }
}

impl EqualityPolicy {
    /// Compares two handles under this policy.
    pub fn same<T: 'static>(&self, a: &ListenerRef<T>, b: &ListenerRef<T>) -> bool {
        match self {
            // Address comparison, not `Arc::ptr_eq`: on `dyn` handles the
            // latter also compares vtable pointers, which are not a stable
            // identity across codegen units.
            EqualityPolicy::Identity => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            EqualityPolicy::ByName => a.name() == b.name(),
        }
    }
}
