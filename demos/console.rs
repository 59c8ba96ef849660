//! # Demo: console
//!
//! Demonstrates the basic fan-out flow with closure-backed listeners.
//!
//! Shows how to:
//! - Build a [`Registry`] from the default (lock-free) configuration.
//! - Register [`ListenerFn`] listeners, including a failing one.
//! - Inspect the aggregate [`DispatchError`] after a partial failure.
//!
//! ## Run
//! ```bash
//! cargo run --example console
//! ```

use std::sync::Arc;

use fanout::{ListenerError, ListenerFn, ListenerRef, Registry};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let registry: Registry<String> = Registry::lock_free();

    let printer: ListenerRef<String> = ListenerFn::arc("printer", |msg: &String| {
        println!("[printer] {msg}");
        Ok::<_, ListenerError>(())
    });
    let shouter: ListenerRef<String> = ListenerFn::arc("shouter", |msg: &String| {
        println!("[shouter] {}", msg.to_uppercase());
        Ok::<_, ListenerError>(())
    });
    let flaky: ListenerRef<String> = ListenerFn::arc("flaky", |msg: &String| {
        if msg.contains("bad") {
            return Err(ListenerError::failed("refusing bad input"));
        }
        println!("[flaky]   {msg}");
        Ok(())
    });

    registry.register(Arc::clone(&printer));
    registry.register(Arc::clone(&shouter));
    registry.register(Arc::clone(&flaky));

    println!("--- clean dispatch ---");
    registry
        .dispatch(&"hello world".to_string())
        .expect("all listeners succeed");

    println!("--- partial failure ---");
    match registry.dispatch(&"bad news".to_string()) {
        Ok(()) => unreachable!("flaky rejects this one"),
        Err(err) => println!("dispatch reported: {}", err.as_message()),
    }

    registry.unregister(&flaky);
    println!("--- after unregister ({} listeners) ---", registry.len());
    registry
        .dispatch(&"bad news, nobody minds now".to_string())
        .expect("remaining listeners succeed");
}
