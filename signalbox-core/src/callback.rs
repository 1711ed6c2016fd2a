//! # Callback handles
//!
//! A [`Callback`] is a shared, reference-counted closure invoked when its
//! signal is emitted. The handle carries identity: clones refer to the same
//! callback, while two separately constructed callbacks are always distinct,
//! even when built from identical closures.
//!
//! Identity is what `Dispatcher::remove` matches on, so keep the handle you
//! registered if you intend to remove it later.
//!
//! ```rust,ignore
//! let log = Callback::infallible(|msg: &String| println!("{msg}"));
//! dispatcher.register("greet", [log.clone()]);
//! dispatcher.remove("greet", &log);
//! ```

use crate::error::BoxError;
use std::{fmt, sync::Arc};

/// Result returned by a callback invocation.
pub type CallbackResult = Result<(), BoxError>;

type CallbackFn<A> = dyn Fn(&A) -> CallbackResult + Send + Sync + 'static;

/// A registered unit of behavior, invoked with a reference to the emitted
/// arguments.
pub struct Callback<A> {
    inner: Arc<CallbackFn<A>>,
}

impl<A> Callback<A> {
    /// Create a callback from a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) -> CallbackResult + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Create a callback from a closure that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        Self::new(move |args| {
            f(args);
            Ok(())
        })
    }

    /// Invoke the callback.
    pub fn call(&self, args: &A) -> CallbackResult {
        (self.inner)(args)
    }

    /// Returns `true` if both handles refer to the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the number of handles sharing this callback.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A> Eq for Callback<A> {}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_clone_shares_identity() {
        let cb = Callback::infallible(|_: &()| {});
        let cloned = cb.clone();
        assert_eq!(cb, cloned);
        assert_eq!(cb.strong_count(), 2);
    }

    #[test]
    fn test_identical_closures_are_distinct() {
        let a = Callback::infallible(|_: &()| {});
        let b = Callback::infallible(|_: &()| {});
        assert_ne!(a, b);
    }

    #[test]
    fn test_call_passes_args() {
        let total = Arc::new(AtomicUsize::new(0));
        let sink = total.clone();
        let cb = Callback::infallible(move |n: &usize| {
            sink.fetch_add(*n, Ordering::SeqCst);
        });

        cb.call(&3).unwrap();
        cb.call(&4).unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_fallible_callback_returns_error() {
        let cb = Callback::new(|_: &()| Err("nope".into()));
        let err = cb.call(&()).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
