//! # signalbox - Named-Signal Dispatcher
//!
//! `signalbox` maps named signals to ordered lists of callbacks. Callers
//! register callbacks against a signal, then emit the signal with arguments;
//! every callback registered for it runs in registration order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use signalbox::prelude::*;
//!
//! let registry: DispatcherRegistry<String> = DispatcherRegistry::with_default();
//! let dispatcher = registry.get_default().expect("created with default");
//!
//! let log_a = Callback::infallible(|msg: &String| println!("a: {msg}"));
//! let log_b = Callback::infallible(|msg: &String| println!("b: {msg}"));
//! dispatcher.register("greet", [log_a.clone(), log_b]);
//!
//! dispatcher.emit("greet", &"hi".to_string())?;  // a: hi, b: hi
//! dispatcher.remove("greet", &log_a);
//! dispatcher.emit("greet", &"bye".to_string())?; // b: bye
//! ```
//!
//! ## Emission flavors
//!
//! - [`Dispatcher::emit`] - synchronous; the first failing callback aborts
//! - [`Dispatcher::emit_if`] - `emit` guarded by a condition
//! - [`Dispatcher::emit_isolated`] - synchronous; failures are collected
//! - [`Dispatcher::emit_async`] - one tokio task per callback (feature `async`)
//!
//! ## Features
//!
//! - `async` (default): deferred emission on tokio
//! - `tracing` (default): log output through `tracing`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use signalbox_core::{BoxError, Callback, CallbackResult, DispatchError, Message};

mod dispatcher;
mod registry;
mod report;

#[cfg(feature = "async")]
mod async_emit;

pub mod testing;

pub use dispatcher::Dispatcher;
pub use registry::{DEFAULT_DISPATCHER, DispatcherRegistry};
pub use report::{CallbackFailure, EmitReport};

#[cfg(feature = "async")]
pub use async_emit::AsyncEmit;

/// Prelude module - common imports for signalbox.
///
/// # Usage
///
/// ```rust,ignore
/// use signalbox::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Callback, DispatchError, Dispatcher, DispatcherRegistry, EmitReport, Message,
    };
}
