//! Testing utilities for signalbox.
//!
//! This module provides callbacks that make it easy to verify what a
//! dispatcher invoked, with which arguments and in which order.
//!
//! # Features
//!
//! - [`RecordingCallback`]: Records every argument it receives
//! - [`OrderLog`]: A shared log that tagged callbacks append to
//! - [`CountingCallback`]: Counts invocations
//! - [`FailingCallback`]: Always returns an error

use signalbox_core::{Callback, Message};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Callback
// ============================================================================

/// A callback that records all arguments it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingCallback::<String>::new();
/// dispatcher.register("greet", [recorder.callback()]);
///
/// dispatcher.emit("greet", &"hi".to_string())?;
/// assert_eq!(recorder.calls(), vec!["hi"]);
/// ```
pub struct RecordingCallback<A: Clone> {
    calls: Arc<Mutex<Vec<A>>>,
}

impl<A: Message + Clone> RecordingCallback<A> {
    /// Create a new, empty recorder.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a callback that records into this recorder.
    ///
    /// Each call returns a distinct callback sharing the same log.
    pub fn callback(&self) -> Callback<A> {
        let calls = self.calls.clone();
        Callback::infallible(move |args: &A| {
            calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(args.clone());
        })
    }

    /// Get a clone of the recorded arguments.
    pub fn calls(&self) -> Vec<A> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<A: Message + Clone> Default for RecordingCallback<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> Clone for RecordingCallback<A> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
        }
    }
}

// ============================================================================
// Order Log
// ============================================================================

/// A shared log of `(tag, argument)` pairs, for asserting invocation order
/// across several callbacks.
pub struct OrderLog<A: Clone> {
    entries: Arc<Mutex<Vec<(&'static str, A)>>>,
}

impl<A: Message + Clone> OrderLog<A> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a callback that appends `(tag, args)` to this log.
    pub fn tagged(&self, tag: &'static str) -> Callback<A> {
        let entries = self.entries.clone();
        Callback::infallible(move |args: &A| {
            entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((tag, args.clone()));
        })
    }

    /// Get a clone of the log.
    pub fn entries(&self) -> Vec<(&'static str, A)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Tags in invocation order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.entries().into_iter().map(|(tag, _)| tag).collect()
    }
}

impl<A: Message + Clone> Default for OrderLog<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> Clone for OrderLog<A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

// ============================================================================
// Counting Callback
// ============================================================================

/// A callback that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingCallback::new();
/// dispatcher.register("tick", [counter.callback()]);
///
/// dispatcher.emit("tick", &())?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingCallback {
    count: Arc<AtomicUsize>,
}

impl CountingCallback {
    /// Create a new counting callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a callback that increments this counter, whatever the payload.
    pub fn callback<A: Message>(&self) -> Callback<A> {
        let count = self.count.clone();
        Callback::infallible(move |_: &A| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

// ============================================================================
// Failing Callback
// ============================================================================

/// A callback that counts its invocations and always fails with `message`.
#[derive(Clone)]
pub struct FailingCallback {
    message: &'static str,
    attempts: Arc<AtomicUsize>,
}

impl FailingCallback {
    /// Create a failing callback with the given error message.
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a callback that records the attempt and fails.
    pub fn callback<A: Message>(&self) -> Callback<A> {
        let message = self.message;
        let attempts = self.attempts.clone();
        Callback::new(move |_: &A| {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(message.into())
        })
    }

    /// Number of times the callback was invoked.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}
