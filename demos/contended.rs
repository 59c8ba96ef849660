//! # Demo: contended
//!
//! Hammers one lock-free registry with concurrent writers and dispatchers to
//! show that edits never block deliveries and no registration is lost.
//!
//! ## Flow
//! ```text
//! 8 writer threads ──► register 100 listeners each (CAS contention)
//! 2 dispatcher threads ──► dispatch in a loop while writers run
//! main ──► verify final listener count, dispatch once more
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example contended
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fanout::{
    EqualityPolicy, ListenerError, ListenerFn, ListenerRef, LockFreeRegistry, Notify, RetryBackoff,
};

const WRITERS: usize = 8;
const PER_WRITER: usize = 100;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let registry = Arc::new(LockFreeRegistry::<u64>::new(
        EqualityPolicy::Identity,
        RetryBackoff::SpinThenYield { spins: 16 },
    ));
    let deliveries = Arc::new(AtomicUsize::new(0));

    std::thread::scope(|s| {
        for w in 0..WRITERS {
            let registry = Arc::clone(&registry);
            let deliveries = Arc::clone(&deliveries);
            s.spawn(move || {
                for i in 0..PER_WRITER {
                    let deliveries = Arc::clone(&deliveries);
                    let listener: ListenerRef<u64> =
                        ListenerFn::arc(format!("w{w}-l{i}"), move |_: &u64| {
                            deliveries.fetch_add(1, Ordering::Relaxed);
                            Ok::<_, ListenerError>(())
                        });
                    registry.register(listener);
                }
            });
        }

        for _ in 0..2 {
            let registry = Arc::clone(&registry);
            s.spawn(move || {
                for round in 0..50u64 {
                    registry.dispatch(&round).expect("listeners never fail");
                }
            });
        }
    });

    assert_eq!(registry.len(), WRITERS * PER_WRITER);
    println!(
        "registered {} listeners, {} deliveries happened mid-churn",
        registry.len(),
        deliveries.load(Ordering::Relaxed)
    );

    registry.dispatch(&u64::MAX).expect("final dispatch");
    println!("final fan-out reached every listener");
}
