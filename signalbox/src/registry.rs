//! # Dispatcher registry
//!
//! A [`DispatcherRegistry`] is a named table of [`Dispatcher`] instances. It
//! is an explicit value owned by the application, typically created once at
//! startup and shared by reference or through an `Arc`.
//!
//! The reserved name [`DEFAULT_DISPATCHER`] identifies the ambient dispatcher
//! returned by [`DispatcherRegistry::get_default`].
//!
//! # Example
//!
//! ```rust,ignore
//! let registry: DispatcherRegistry<String> = DispatcherRegistry::with_default();
//! let net = registry.create_dispatcher("net").expect("name is not empty");
//!
//! registry.bind("net", "connected", Callback::infallible(|host| println!("{host}")));
//! net.emit("connected", &"example.org".to_string())?;
//! ```

use crate::dispatcher::Dispatcher;
use signalbox_core::{Callback, Message};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Name under which the default dispatcher is stored.
pub const DEFAULT_DISPATCHER: &str = "default";

/// A table of named dispatchers.
pub struct DispatcherRegistry<A> {
    dispatchers: RwLock<HashMap<String, Arc<Dispatcher<A>>>>,
}

impl<A: Message> DispatcherRegistry<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            dispatchers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry that already holds a default dispatcher.
    pub fn with_default() -> Self {
        let registry = Self::new();
        Dispatcher::new_default(&registry);
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Dispatcher<A>>>> {
        self.dispatchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Dispatcher<A>>>> {
        self.dispatchers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a dispatcher stored under `name`.
    ///
    /// Returns `None` if `name` is empty. An existing dispatcher with the same
    /// name is replaced.
    pub fn create_dispatcher(&self, name: &str) -> Option<Arc<Dispatcher<A>>> {
        if name.is_empty() {
            return None;
        }
        let dispatcher = Arc::new(Dispatcher::new());
        self.insert(name, dispatcher.clone());
        Some(dispatcher)
    }

    /// Store an existing dispatcher under `name`, returning the one it replaced.
    pub fn insert(
        &self,
        name: &str,
        dispatcher: Arc<Dispatcher<A>>,
    ) -> Option<Arc<Dispatcher<A>>> {
        let previous = self.write().insert(name.to_owned(), dispatcher);

        #[cfg(feature = "tracing")]
        {
            if previous.is_some() {
                tracing::debug!(name, "replaced dispatcher");
            } else {
                tracing::debug!(name, "created dispatcher");
            }
        }

        previous
    }

    /// Look up the dispatcher stored under `name`.
    pub fn get_dispatcher(&self, name: &str) -> Option<Arc<Dispatcher<A>>> {
        self.read().get(name).cloned()
    }

    /// Look up the default dispatcher.
    pub fn get_default(&self) -> Option<Arc<Dispatcher<A>>> {
        self.get_dispatcher(DEFAULT_DISPATCHER)
    }

    /// Remove the dispatcher stored under `name`.
    ///
    /// Handles already held elsewhere stay usable.
    pub fn remove(&self, name: &str) -> Option<Arc<Dispatcher<A>>> {
        self.write().remove(name)
    }

    /// Register `callback` for `signal` on the dispatcher named `dispatcher`.
    ///
    /// Returns `false` if no such dispatcher exists or it refuses the
    /// registration.
    pub fn bind(&self, dispatcher: &str, signal: &str, callback: Callback<A>) -> bool {
        // Release the table lock before touching the dispatcher.
        let Some(target) = self.get_dispatcher(dispatcher) else {
            return false;
        };
        target.register(signal, [callback])
    }

    /// Names of all stored dispatchers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of stored dispatchers.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check whether the registry holds no dispatcher.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl<A: Message> Default for DispatcherRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for DispatcherRegistry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dispatchers = self
            .dispatchers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("DispatcherRegistry")
            .field("dispatchers", &dispatchers.len())
            .finish()
    }
}
