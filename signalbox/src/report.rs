//! Outcome of an isolated emission.

use signalbox_core::BoxError;

/// A callback failure recorded by [`Dispatcher::emit_isolated`].
///
/// [`Dispatcher::emit_isolated`]: crate::Dispatcher::emit_isolated
#[derive(Debug)]
pub struct CallbackFailure {
    /// Position of the failing callback in registration order.
    pub index: usize,
    /// The error it returned.
    pub error: BoxError,
}

/// What happened during one [`Dispatcher::emit_isolated`] call.
///
/// [`Dispatcher::emit_isolated`]: crate::Dispatcher::emit_isolated
#[derive(Debug)]
pub struct EmitReport {
    /// The emitted signal.
    pub signal: String,
    /// Whether the signal had any registered callback.
    pub dispatched: bool,
    /// Number of callbacks invoked.
    pub invoked: usize,
    failures: Vec<CallbackFailure>,
}

impl EmitReport {
    pub(crate) fn new(signal: &str) -> Self {
        Self {
            signal: signal.to_owned(),
            dispatched: false,
            invoked: 0,
            failures: Vec::new(),
        }
    }

    pub(crate) fn push_failure(&mut self, index: usize, error: BoxError) {
        self.failures.push(CallbackFailure { index, error });
    }

    /// Failures in registration order.
    pub fn failures(&self) -> &[CallbackFailure] {
        &self.failures
    }

    /// Consume the report, keeping only the failures.
    pub fn into_failures(self) -> Vec<CallbackFailure> {
        self.failures
    }

    /// `true` if the signal was dispatched and every callback succeeded.
    pub fn is_success(&self) -> bool {
        self.dispatched && self.failures.is_empty()
    }
}
