//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(&T) -> Result<(), ListenerError>`
//! under a stable name. It is the quickest way to get a [`ListenerRef`]
//! without writing a struct.
//!
//! The closure is `Fn`, not `FnMut`: a listener may be invoked from several
//! dispatching threads at once. Shared mutable state belongs behind an
//! explicit `Arc<...>` inside the closure.
//!
//! ## Example
//! ```rust
//! use fanout::{ListenerError, ListenerFn, ListenerRef};
//!
//! let l: ListenerRef<u32> = ListenerFn::arc("counter", |value: &u32| {
//!     // do work...
//!     let _ = value;
//!     Ok::<_, ListenerError>(())
//! });
//!
//! assert_eq!(l.name(), "counter");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::ListenerError;
use crate::listeners::listener::Listener;

/// Function-backed listener implementation.
///
/// Wraps a closure invoked once per dispatched value.
#[derive(Debug)]
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the listener and returns it as a shared handle (`Arc<Self>`).
    ///
    /// ## Example
    /// ```rust
    /// use fanout::{ListenerError, ListenerFn, ListenerRef};
    ///
    /// let l: ListenerRef<String> = ListenerFn::arc("hello", |_value: &String| {
    ///     Ok::<_, ListenerError>(())
    /// });
    /// assert_eq!(l.name(), "hello");
    /// ```
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<T, F> Listener<T> for ListenerFn<F>
where
    F: Fn(&T) -> Result<(), ListenerError> + Send + Sync + 'static, // Fn, not FnMut
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, value: &T) -> Result<(), ListenerError> {
        (self.f)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::listener::ListenerRef;

    #[test]
    fn test_owned_name_is_accepted() {
        let l: ListenerRef<u32> =
            ListenerFn::arc(format!("listener-{}", 7), |_: &u32| Ok::<_, ListenerError>(()));
        assert_eq!(l.name(), "listener-7");
    }

    #[test]
    fn test_on_event_forwards_result() {
        let ok: ListenerRef<u32> = ListenerFn::arc("ok", |_: &u32| Ok::<_, ListenerError>(()));
        assert!(ok.on_event(&1).is_ok());

        let err: ListenerRef<u32> =
            ListenerFn::arc("err", |_: &u32| Err::<(), _>(ListenerError::failed("boom")));
        assert_eq!(
            err.on_event(&1),
            Err(ListenerError::failed("boom")),
            "closure error should pass through unchanged"
        );
    }
}
