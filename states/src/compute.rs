use std::any::{Any, type_name};

use log::warn;

use crate::SnapshotClone;

/// A cache whose value is produced by commands rather than by the UI.
///
/// Side effects (network IO) never run inside a compute. A command performs the IO and
/// writes the outcome through an `Updater`. The UI reads the compute with
/// `StateCtx::cached` on every frame.
pub trait Compute: Any + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replaces `compute` with `new_self` when the boxed value has the same concrete type.
pub fn assign_impl<T: Compute>(compute: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(new_compute) => *compute = *new_compute,
        Err(_) => warn!(
            "Ignored assignment of a mismatched value to compute {}",
            type_name::<T>()
        ),
    }
}
