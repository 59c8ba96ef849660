//! # Listeners — the opaque callbacks held by the registry.
//!
//! This module defines the [`Listener`] trait (the extension point for
//! plugging handlers into a registry), the shared handle type
//! [`ListenerRef`], a function-backed implementation [`ListenerFn`], and the
//! [`EqualityPolicy`] that decides when two handles are "the same listener"
//! for deduplication and removal.
//!
//! ```text
//! Value flow:
//!   dispatch(&value) ──► snapshot ──► listener.on_event(&value) per listener
//!                                          │
//!                                     ┌────┴────┬─────────┐
//!                                     ▼         ▼         ▼
//!                                   logger   metrics   custom ...
//! ```

mod equality;
mod listener;
mod listener_fn;

pub use equality::EqualityPolicy;
pub use listener::{Listener, ListenerRef};
pub use listener_fn::ListenerFn;
