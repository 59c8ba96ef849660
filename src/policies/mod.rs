//! # Policies controlling update-protocol behavior.
//!
//! The only tunable today is [`RetryBackoff`], the wait applied between
//! compare-and-swap rounds under write contention. It shifts fairness, never
//! correctness.

mod retry;

pub use retry::RetryBackoff;
