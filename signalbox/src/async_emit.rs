//! Deferred emission on the tokio runtime.
//!
//! [`Dispatcher::emit_async`] spawns one task per registered callback, in
//! registration order, and returns before any of them runs. Failures and
//! panics inside those tasks are logged and never reach the emitter.

use crate::dispatcher::Dispatcher;
use futures::future::join_all;
use signalbox_core::{DispatchError, Message};
use std::sync::Arc;
use tokio::{runtime::Handle, task::JoinHandle};

/// Handle to the tasks scheduled by one [`Dispatcher::emit_async`] call.
///
/// Dropping it leaves the tasks running.
#[derive(Debug)]
pub struct AsyncEmit {
    tasks: Vec<JoinHandle<()>>,
}

impl AsyncEmit {
    fn empty() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Number of callbacks scheduled.
    pub fn scheduled(&self) -> usize {
        self.tasks.len()
    }

    /// Wait until every scheduled callback has finished.
    pub async fn join(self) {
        for outcome in join_all(self.tasks).await {
            if let Err(err) = outcome {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "async callback did not complete");
                #[cfg(not(feature = "tracing"))]
                let _ = err;
            }
        }
    }
}

impl<A: Message> Dispatcher<A> {
    /// Schedule every callback registered for `signal` on the current tokio
    /// runtime.
    ///
    /// Unknown signals schedule nothing. Returns
    /// [`DispatchError::NoRuntime`] when called outside a runtime.
    pub fn emit_async(&self, signal: &str, args: A) -> Result<AsyncEmit, DispatchError> {
        let handle = Handle::try_current().map_err(|_| DispatchError::NoRuntime)?;
        let Some(callbacks) = self.snapshot(signal) else {
            return Ok(AsyncEmit::empty());
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(signal, callbacks = callbacks.len(), "scheduling async emit");

        let args = Arc::new(args);
        let tasks = callbacks
            .into_iter()
            .enumerate()
            .map(|(index, callback)| {
                let args = Arc::clone(&args);
                let signal = signal.to_owned();
                handle.spawn(async move {
                    if let Err(error) = callback.call(&args) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(signal = %signal, index, error = %error, "async callback failed");
                        #[cfg(not(feature = "tracing"))]
                        let _ = (signal, index, error);
                    }
                })
            })
            .collect();

        Ok(AsyncEmit { tasks })
    }
}
