//! Explicit application state container.
//!
//! The UI owns one [`StateCtx`]. Inputs live in [`State`]s, results of side effects live in
//! [`Compute`]s, and side effects themselves are [`Command`]s that publish through an
//! [`Updater`]. Nothing is global: every piece of state is registered on the context that
//! reads it.

mod command;
mod compute;
mod ctx;
mod error;
mod snapshot;
mod state;
mod updater;

pub use command::{Command, CommandFuture, noop};
pub use compute::{Compute, assign_impl};
pub use ctx::StateCtx;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::{SnapshotClone, State, state_assign_impl};
pub use updater::Updater;

pub use tokio_util::sync::CancellationToken;
