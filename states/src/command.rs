use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

/// The future a command hands back to `StateCtx` for spawning.
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manual-only side effect, dispatched explicitly by the UI.
///
/// `run` is called on the UI thread with a snapshot of the current states and computes.
/// Any synchronous work (for example marking a cache as loading) happens there. The returned
/// future is spawned and reports its outcome through `updater`.
///
/// `cancel` fires only when the owning `StateCtx` shuts down.
pub trait Command: Debug + 'static {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken)
    -> CommandFuture;
}

/// A future that does nothing, for commands that decide there is no work to do.
pub fn noop() -> CommandFuture {
    Box::pin(async {})
}
