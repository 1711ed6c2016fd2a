//! Message trait for signal payloads.

/// A marker trait for the argument payload passed to callbacks on emit.
///
/// Payloads must be `Send + Sync + 'static` so a dispatcher can be shared
/// across threads and its arguments handed to spawned tasks.
///
/// Multiple positional arguments are expressed as a tuple:
///
/// ```rust,ignore
/// let dispatcher: Dispatcher<(String, u32)> = Dispatcher::new();
/// dispatcher.emit("resize", &("main".to_string(), 80))?;
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Signal arguments must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}
