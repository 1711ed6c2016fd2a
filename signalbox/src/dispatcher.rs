//! # Dispatcher
//!
//! A [`Dispatcher`] owns a mapping from signal name to the ordered list of
//! callbacks registered for it.
//!
//! - Callbacks fire in registration order, once per registration, per emit.
//! - A signal either has no entry or a non-empty list. Removing the last
//!   callback, or calling [`Dispatcher::remove_all`], drops the entry.
//! - Emission snapshots the list and runs callbacks with no lock held, so a
//!   callback may register, remove or emit on the same dispatcher. Such
//!   changes apply from the next emission onwards.
//!
//! # Example
//!
//! ```rust,ignore
//! use signalbox::prelude::*;
//!
//! let dispatcher: Dispatcher<&'static str> = Dispatcher::new();
//! let greet = dispatcher
//!     .on("greet", |msg| println!("hello, {msg}"))
//!     .expect("dispatcher is open");
//!
//! assert!(dispatcher.emit("greet", &"world")?);
//! assert!(dispatcher.remove("greet", &greet));
//! assert!(!dispatcher.emit("greet", &"nobody")?);
//! ```

use crate::{
    registry::{DEFAULT_DISPATCHER, DispatcherRegistry},
    report::EmitReport,
};
use signalbox_core::{Callback, DispatchError, Message};
use std::{
    collections::HashMap,
    sync::{
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicBool, Ordering},
    },
};

/// Owner of one signal-to-callback-list mapping.
pub struct Dispatcher<A> {
    events: RwLock<HashMap<String, Vec<Callback<A>>>>,
    closed: AtomicBool,
}

impl<A: Message> Dispatcher<A> {
    /// Create a free-standing dispatcher that is not attached to any registry.
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a dispatcher and install it as the default of `registry`.
    ///
    /// Any previous default is replaced.
    pub fn new_default(registry: &DispatcherRegistry<A>) -> Arc<Self> {
        let dispatcher = Arc::new(Self::new());
        registry.insert(DEFAULT_DISPATCHER, dispatcher.clone());
        dispatcher
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<Callback<A>>>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<Callback<A>>>> {
        self.events.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take a copy of the callbacks registered for `signal`.
    pub(crate) fn snapshot(&self, signal: &str) -> Option<Vec<Callback<A>>> {
        self.read().get(signal).cloned()
    }

    /// Register one or more callbacks for `signal`.
    ///
    /// Returns `false` without creating an entry when `signal` is empty, no
    /// callbacks are supplied, or the dispatcher is closed. The same callback
    /// may be registered more than once and then fires once per registration.
    pub fn register<I>(&self, signal: &str, callbacks: I) -> bool
    where
        I: IntoIterator<Item = Callback<A>>,
    {
        if signal.is_empty() || self.is_closed() {
            return false;
        }
        let mut callbacks = callbacks.into_iter().peekable();
        if callbacks.peek().is_none() {
            return false;
        }

        let mut events = self.write();
        // close() may have won the race for the lock.
        if self.is_closed() {
            return false;
        }
        let list = events.entry(signal.to_owned()).or_default();
        let before = list.len();
        list.extend(callbacks);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            signal,
            added = list.len() - before,
            total = list.len(),
            "registered callbacks"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = before;

        true
    }

    /// Register a closure for `signal` and return its handle for later removal.
    pub fn on<F>(&self, signal: &str, f: F) -> Option<Callback<A>>
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let callback = Callback::infallible(f);
        self.register(signal, [callback.clone()]).then_some(callback)
    }

    /// Emit `signal`, invoking every registered callback in order with `args`.
    ///
    /// Returns `Ok(false)` if nothing is registered for `signal`. The first
    /// callback to fail aborts the remaining invocations and its error is
    /// returned.
    pub fn emit(&self, signal: &str, args: &A) -> Result<bool, DispatchError> {
        let Some(callbacks) = self.snapshot(signal) else {
            return Ok(false);
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(signal, callbacks = callbacks.len(), "emitting");

        for (index, callback) in callbacks.iter().enumerate() {
            if let Err(source) = callback.call(args) {
                #[cfg(feature = "tracing")]
                tracing::warn!(signal, index, error = %source, "callback failed, aborting emit");

                return Err(DispatchError::Callback {
                    signal: signal.to_owned(),
                    index,
                    source,
                });
            }
        }
        Ok(true)
    }

    /// Emit `signal` only when `condition` holds.
    ///
    /// Returns `Ok(false)` with no side effects when `condition` is false.
    pub fn emit_if(
        &self,
        signal: &str,
        condition: bool,
        args: &A,
    ) -> Result<bool, DispatchError> {
        if condition {
            self.emit(signal, args)
        } else {
            Ok(false)
        }
    }

    /// Emit `signal`, invoking every callback even if some of them fail.
    ///
    /// Failures are collected into the returned [`EmitReport`] instead of
    /// aborting the emission.
    pub fn emit_isolated(&self, signal: &str, args: &A) -> EmitReport {
        let mut report = EmitReport::new(signal);
        let Some(callbacks) = self.snapshot(signal) else {
            return report;
        };

        report.dispatched = true;
        for (index, callback) in callbacks.iter().enumerate() {
            report.invoked += 1;
            if let Err(error) = callback.call(args) {
                #[cfg(feature = "tracing")]
                tracing::warn!(signal, index, error = %error, "callback failed");

                report.push_failure(index, error);
            }
        }
        report
    }

    /// Remove the first occurrence of `callback` from `signal`.
    ///
    /// Returns `false` if `signal` is empty or unknown, or if the callback is
    /// not registered for it.
    pub fn remove(&self, signal: &str, callback: &Callback<A>) -> bool {
        if signal.is_empty() {
            return false;
        }

        let mut events = self.write();
        let Some(list) = events.get_mut(signal) else {
            return false;
        };
        let Some(position) = list.iter().position(|c| c.ptr_eq(callback)) else {
            return false;
        };
        list.remove(position);
        if list.is_empty() {
            events.remove(signal);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(signal, position, "removed callback");

        true
    }

    /// Remove every callback registered for `signal`.
    ///
    /// Returns whether the signal had an entry.
    pub fn remove_all(&self, signal: &str) -> bool {
        let removed = self.write().remove(signal);

        #[cfg(feature = "tracing")]
        {
            if let Some(list) = &removed {
                tracing::debug!(signal, count = list.len(), "removed all callbacks");
            }
        }

        removed.is_some()
    }

    /// Check whether `signal` has any registered callback.
    pub fn contains(&self, signal: &str) -> bool {
        self.read().contains_key(signal)
    }

    /// Number of registrations for `signal`.
    pub fn listener_count(&self, signal: &str) -> usize {
        self.read().get(signal).map_or(0, Vec::len)
    }

    /// Names of all signals with registered callbacks, sorted.
    pub fn signals(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Check whether no signal has any registered callback.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every registration while keeping the dispatcher usable.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Drop every registration and refuse further ones.
    pub fn close(&self) {
        let mut events = self.write();
        self.closed.store(true, Ordering::Release);
        events.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!("dispatcher closed");
    }

    /// Check whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<A: Message> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Dispatcher")
            .field("signals", &events.len())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}
