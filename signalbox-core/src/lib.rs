//! # signalbox-core
//!
//! Core primitives for the signalbox dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that defines callbacks or payloads without needing the dispatcher itself.
//!
//! - [`Message`] - Marker trait for signal argument payloads
//! - [`Callback`] - Shared callback handle with reference identity
//! - [`DispatchError`] - Errors surfaced by emission
//! - [`BoxError`] - Error type returned by fallible callbacks

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod error;
mod message;

// Re-exports
pub use callback::{Callback, CallbackResult};
pub use error::{BoxError, DispatchError};
pub use message::Message;
