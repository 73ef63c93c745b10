use std::any::{Any, TypeId, type_name};
use std::fmt::{Debug, Formatter};

use flume::Sender;
use log::warn;

type Modify = Box<dyn FnOnce(&mut dyn Any) + Send>;

/// A pending change to a state or compute, applied by `StateCtx::sync_computes`.
pub(crate) enum Update {
    /// Replace the whole value.
    Assign(TypeId, Box<dyn Any + Send>),
    /// Run a closure against whatever value is current when the update is applied.
    Modify(TypeId, Modify),
}

impl Update {
    pub(crate) fn target(&self) -> TypeId {
        match self {
            Self::Assign(id, _) | Self::Modify(id, _) => *id,
        }
    }
}

impl Debug for Update {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assign(id, _) => f.debug_tuple("Assign").field(id).finish(),
            Self::Modify(id, _) => f.debug_tuple("Modify").field(id).finish(),
        }
    }
}

/// Send-safe handle used by commands to publish results back to the UI thread.
///
/// Updates are queued in order and applied during `StateCtx::sync_computes`.
#[derive(Clone, Debug)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    /// Replaces the registered state or compute of type `T`.
    pub fn set<T: Any + Send>(&self, value: T) {
        self.push(Update::Assign(TypeId::of::<T>(), Box::new(value)), type_name::<T>());
    }

    /// Mutates the registered state or compute of type `T` in place.
    ///
    /// The closure sees the value as it is when the update is applied, not when it was queued,
    /// so concurrent commands never overwrite each other's writes.
    pub fn update<T: Any>(&self, modify: impl FnOnce(&mut T) + Send + 'static) {
        let apply: Modify = Box::new(move |target: &mut dyn Any| {
            if let Some(value) = target.downcast_mut::<T>() {
                modify(value);
            }
        });
        self.push(Update::Modify(TypeId::of::<T>(), apply), type_name::<T>());
    }

    fn push(&self, update: Update, name: &str) {
        if self.send.send(update).is_err() {
            warn!("Dropped update for {name}: state context is gone");
        }
    }
}
