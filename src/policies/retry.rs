//! # Retry backoff for lost compare-and-swap rounds.
//!
//! [`RetryBackoff`] controls what a writer does after losing an install race
//! in the lock-free backend, before recomputing against the new current
//! snapshot.
//!
//! - [`RetryBackoff::Spin`] — spin hint, stay on-core (lowest latency)
//! - [`RetryBackoff::Yield`] — yield the thread to the scheduler
//! - [`RetryBackoff::SpinThenYield`] — spin for the first rounds, then yield
//!
//! ## Trade-offs
//! - **Spin**: best when contention windows are nanoseconds wide (they are:
//!   one clone + CAS). A spinning loser can starve under a pathological
//!   writer storm.
//! - **Yield**: fairer under heavy contention, pays a scheduler round-trip.
//! - **SpinThenYield**: spin while the race is likely transient, yield once
//!   it is clearly not.

/// Policy applied between compare-and-swap retry rounds.
///
/// Affects fairness under write contention only; every policy preserves the
/// update protocol's correctness and lock-freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryBackoff {
    /// Issue a spin hint and retry immediately.
    Spin,

    /// Yield the current thread before retrying.
    Yield,

    /// Spin for the first `spins` lost rounds, then yield.
    SpinThenYield {
        /// Number of lost rounds to spin through before yielding.
        spins: u32,
    },
}

impl Default for RetryBackoff {
    /// Returns [`RetryBackoff::Spin`]: edit critical sections are a handful
    /// of instructions, so an immediate retry nearly always wins next round.
    fn default() -> Self {
        RetryBackoff::Spin
    }
}

impl RetryBackoff {
    /// Waits according to the policy after the given lost round (1-indexed).
    pub fn wait(&self, attempt: u32) {
        match self {
            RetryBackoff::Spin => std::hint::spin_loop(),
            RetryBackoff::Yield => std::thread::yield_now(),
            RetryBackoff::SpinThenYield { spins } => {
                if attempt <= *spins {
                    std::hint::spin_loop();
                } else {
                    std::thread::yield_now();
                }
            }
        }
    }
}
