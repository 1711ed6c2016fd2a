//! Error types for signalbox.
//!
//! Invalid arguments and lookup misses are reported through `bool` and
//! `Option` returns. Only two conditions surface as errors:
//!
//! - a callback failing during a synchronous emit ([`DispatchError::Callback`])
//! - asynchronous emission requested outside a runtime ([`DispatchError::NoRuntime`])

use thiserror::Error;

/// A boxed error type returned by fallible callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while emitting a signal.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A callback returned an error; the remaining callbacks were not invoked.
    #[error("callback #{index} for signal `{signal}` failed")]
    Callback {
        /// The signal being emitted.
        signal: String,
        /// Position of the failing callback in registration order.
        index: usize,
        /// The error returned by the callback.
        #[source]
        source: BoxError,
    },

    /// Asynchronous emission needs a running tokio runtime.
    #[error("no async runtime available to schedule callbacks")]
    NoRuntime,
}

impl DispatchError {
    /// The signal whose emission failed, if the error is tied to one.
    pub fn signal(&self) -> Option<&str> {
        match self {
            DispatchError::Callback { signal, .. } => Some(signal),
            DispatchError::NoRuntime => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_callback_error_display_and_source() {
        let err = DispatchError::Callback {
            signal: "greet".into(),
            index: 2,
            source: "boom".into(),
        };
        assert_eq!(err.to_string(), "callback #2 for signal `greet` failed");
        assert_eq!(err.source().unwrap().to_string(), "boom");
        assert_eq!(err.signal(), Some("greet"));
    }

    #[test]
    fn test_no_runtime_has_no_signal() {
        assert_eq!(DispatchError::NoRuntime.signal(), None);
    }
}
