//! # fanout
//!
//! **Fanout** is a single-process, single-topic broadcast primitive for Rust.
//!
//! It keeps an evolving set of registered listeners and delivers produced
//! values to every listener that was registered at the moment delivery began.
//! Producers never block each other, and listeners can register/unregister
//! concurrently with in-flight deliveries.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  writers (many):                          readers (many):
//!    register(l) ──┐                          dispatch(v) ──► load snapshot once
//!    unregister(l)─┼─► CAS retry loop                             │
//!                  │   1. load current ────► Snapshot {A,B,C}     ├─► A.on_event(&v)
//!                  │   2. clone + edit ────► Snapshot {A,B,C,D}   ├─► B.on_event(&v)
//!                  │   3. compare_and_swap                        └─► C.on_event(&v)
//!                  │      ├─ won  → installed
//!                  └──────└─ lost → retry against the new current
//! ```
//!
//! ### Rules
//! - **Snapshots are immutable**: every edit produces a brand-new snapshot;
//!   a published snapshot's contents never change.
//! - **Dispatch is torn-state free**: a delivery walks exactly one snapshot,
//!   never a mix of two. Listeners added after the capture miss that delivery.
//! - **Edits are idempotent**: registering a present listener (by the
//!   configured equality) or unregistering an absent one is a no-op.
//! - **Failures don't stop the traversal**: listener errors and panics are
//!   collected and reported after delivery to the remaining listeners.
//!
//! ## Features
//! | Area              | Description                                       | Key types / traits                       |
//! |-------------------|---------------------------------------------------|------------------------------------------|
//! | **Listeners**     | Define listeners as closures or trait impls.      | [`Listener`], [`ListenerFn`], [`ListenerRef`] |
//! | **Backends**      | Swappable concurrency strategies, one contract.   | [`Notify`], [`LockFreeRegistry`], [`MutexRegistry`], [`RwLockRegistry`] |
//! | **Policies**      | Equality for dedup, CAS retry behavior.           | [`EqualityPolicy`], [`RetryBackoff`]     |
//! | **Errors**        | Typed per-listener and aggregate dispatch errors. | [`ListenerError`], [`DispatchError`]     |
//! | **Configuration** | Centralize backend/policy selection.              | [`RegistryConfig`], [`Backend`]          |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use fanout::{ListenerError, ListenerFn, ListenerRef, Registry};
//!
//! # fn main() -> Result<(), fanout::DispatchError> {
//! let registry: Registry<String> = Registry::lock_free();
//!
//! let printer: ListenerRef<String> = ListenerFn::arc("printer", |msg: &String| {
//!     println!("got: {msg}");
//!     Ok::<_, ListenerError>(())
//! });
//!
//! registry.register(Arc::clone(&printer));
//! registry.dispatch(&"hello".to_string())?;
//! registry.unregister(&printer);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod listeners;
mod policies;
mod registry;
mod snapshot;

// ---- Public re-exports ----

pub use config::{Backend, RegistryConfig};
pub use error::{DeliveryFailure, DispatchError, ListenerError};
pub use listeners::{EqualityPolicy, Listener, ListenerFn, ListenerRef};
pub use policies::RetryBackoff;
pub use registry::{LockFreeRegistry, MutexRegistry, Notify, Registry, RwLockRegistry};
pub use snapshot::Snapshot;
