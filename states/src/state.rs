use std::any::{Any, type_name};

use log::warn;

/// Produces an owned, `Send` copy of a value so commands can read it off the UI thread.
///
/// Types that commands never read keep the default, which opts them out of snapshots.
pub trait SnapshotClone {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Input state owned by the UI thread.
///
/// States are mutated synchronously through `StateCtx::state_mut`, or asynchronously
/// through an `Updater`, which `StateCtx::sync_computes` applies on the next frame.
pub trait State: Any + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replaces `state` with `new_self` when the boxed value has the same concrete type.
pub fn state_assign_impl<T: State>(state: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(new_state) => *state = *new_state,
        Err(_) => warn!(
            "Ignored assignment of a mismatched value to state {}",
            type_name::<T>()
        ),
    }
}
