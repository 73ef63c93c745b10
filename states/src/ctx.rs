use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, VecDeque};
use std::fmt::{Debug, Formatter};

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio_util::sync::CancellationToken;

#[cfg(target_arch = "wasm32")]
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
#[cfg(not(target_arch = "wasm32"))]
use tokio::task::JoinSet;

use crate::updater::Update;
use crate::{Command, CommandFuture, CommandSnapshot, Compute, Error, State, Updater};

/// A registered value plus a counter bumped on every change.
///
/// Consumers poll the version to learn that something was published.
struct Slot<T: ?Sized> {
    value: Box<T>,
    version: u64,
}

impl<T: ?Sized> Slot<T> {
    fn new(value: Box<T>) -> Self {
        Self { value, version: 0 }
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// The single, explicitly constructed container for application state.
///
/// - States are UI-owned inputs, read with [`StateCtx::state`] and mutated with
///   [`StateCtx::state_mut`].
/// - Computes are caches written by commands, read with [`StateCtx::cached`].
/// - Commands are queued with [`StateCtx::enqueue_command`] and spawned by
///   [`StateCtx::flush_commands`]. Their results arrive through an [`Updater`] and are applied
///   by [`StateCtx::sync_computes`], which the UI calls once per frame.
///
/// On native targets commands are spawned onto a Tokio `JoinSet`, so a runtime must be
/// entered before commands are flushed. On wasm32 they run via `spawn_local`.
pub struct StateCtx {
    states: BTreeMap<TypeId, Slot<dyn State>>,
    computes: BTreeMap<TypeId, Slot<dyn Compute>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,
    queue: VecDeque<(TypeId, &'static str)>,

    send: Sender<Update>,
    recv: Receiver<Update>,

    cancel: CancellationToken,

    #[cfg(not(target_arch = "wasm32"))]
    tasks: JoinSet<()>,
    #[cfg(target_arch = "wasm32")]
    in_flight: Arc<AtomicUsize>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for StateCtx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("tasks", &self.task_count())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();

        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: VecDeque::new(),
            send,
            recv,
            cancel: CancellationToken::new(),
            #[cfg(not(target_arch = "wasm32"))]
            tasks: JoinSet::new(),
            #[cfg(target_arch = "wasm32")]
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    // =====================
    // States
    // =====================

    /// Registers `state`, replacing any previous state of the same type.
    pub fn add_state<T: State>(&mut self, state: T) {
        let value: Box<dyn State> = Box::new(state);
        self.states.insert(TypeId::of::<T>(), Slot::new(value));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never registered with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutable access to a state. Counts as a change for [`StateCtx::state_version`].
    ///
    /// # Panics
    /// Panics if `T` was never registered with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| {
                slot.touch();
                slot.value.as_any_mut().downcast_mut::<T>()
            })
            .unwrap_or_else(|| panic!("{}", Error::state_not_found(type_name::<T>())))
    }

    pub fn state_version<T: State>(&self) -> Option<u64> {
        self.states.get(&TypeId::of::<T>()).map(|slot| slot.version)
    }

    // =====================
    // Computes
    // =====================

    /// Registers `compute`, replacing any previous compute of the same type.
    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let value: Box<dyn Compute> = Box::new(compute);
        self.computes.insert(TypeId::of::<T>(), Slot::new(value));
    }

    pub fn try_cached<T: Compute>(&self) -> Result<&T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(type_name::<T>()))
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.try_cached::<T>().ok()
    }

    /// Mutable access to a compute for UI-driven resets (e.g. dismissing an error).
    pub fn cached_mut<T: Compute>(&mut self) -> Option<&mut T> {
        self.computes.get_mut(&TypeId::of::<T>()).and_then(|slot| {
            slot.touch();
            slot.value.as_any_mut().downcast_mut::<T>()
        })
    }

    pub fn compute_version<T: Compute>(&self) -> Option<u64> {
        self.computes.get(&TypeId::of::<T>()).map(|slot| slot.version)
    }

    // =====================
    // Commands
    // =====================

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(TypeId::of::<C>(), Box::new(command));
    }

    pub fn has_command<C: Command>(&self) -> bool {
        self.commands.contains_key(&TypeId::of::<C>())
    }

    /// Queues `C` to run on the next [`StateCtx::flush_commands`].
    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue.push_back((TypeId::of::<C>(), type_name::<C>()));
    }

    /// Queues `C` and flushes the queue immediately.
    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    /// Runs every queued command in order and spawns the futures they return.
    pub fn flush_commands(&mut self) {
        while let Some((id, name)) = self.queue.pop_front() {
            let Some(command) = self.commands.get(&id) else {
                warn!("{}", Error::command_not_found(name));
                continue;
            };

            debug!("Running command {command:?}");
            let future = command.run(
                self.snapshot(),
                Updater::new(self.send.clone()),
                self.cancel.child_token(),
            );
            self.spawn(future);
        }
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snapshot = CommandSnapshot::new();
        for (id, slot) in &self.states {
            if let Some(value) = slot.value.clone_boxed() {
                snapshot.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = slot.value.clone_boxed() {
                snapshot.insert_compute(*id, value);
            }
        }
        snapshot
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&mut self, future: CommandFuture) {
        self.tasks.spawn(future);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&mut self, future: CommandFuture) {
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::SeqCst);
        wasm_bindgen_futures::spawn_local(async move {
            future.await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    // =====================
    // Updates
    // =====================

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Applies every update published since the last call, in publish order.
    ///
    /// Returns how many updates were applied.
    pub fn sync_computes(&mut self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        self.reap_tasks();

        let mut applied = 0;
        while let Ok(update) = self.recv.try_recv() {
            if self.apply(update) {
                applied += 1;
            }
        }
        applied
    }

    fn apply(&mut self, update: Update) -> bool {
        let id = update.target();

        if let Some(slot) = self.states.get_mut(&id) {
            match update {
                Update::Assign(_, value) => slot.value.assign_box(value),
                Update::Modify(_, modify) => modify(slot.value.as_any_mut()),
            }
            slot.touch();
            return true;
        }

        if let Some(slot) = self.computes.get_mut(&id) {
            match update {
                Update::Assign(_, value) => slot.value.assign_box(value),
                Update::Modify(_, modify) => modify(slot.value.as_any_mut()),
            }
            slot.touch();
            return true;
        }

        warn!("Dropped update for unregistered type {id:?}");
        false
    }

    // =====================
    // Tasks
    // =====================

    #[cfg(not(target_arch = "wasm32"))]
    fn reap_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result {
                error!("Command task failed: {err}");
            }
        }
    }

    /// Number of spawned command tasks that have not been reaped yet.
    pub fn task_count(&self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.tasks.len()
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.in_flight.load(Ordering::SeqCst)
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancels outstanding commands, waits for them to finish and applies their last updates.
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();

        #[cfg(not(target_arch = "wasm32"))]
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result {
                error!("Command task failed during shutdown: {err}");
            }
        }

        self.sync_computes();
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::{SnapshotClone, assign_impl, noop, state_assign_impl};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Query(String);

    impl SnapshotClone for Query {
        fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
            Some(Box::new(self.clone()))
        }
    }

    impl State for Query {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Echo {
        values: Vec<String>,
    }

    impl SnapshotClone for Echo {}

    impl Compute for Echo {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Debug)]
    struct EchoCommand;

    impl Command for EchoCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let Some(query) = snap.state::<Query>().cloned() else {
                return noop();
            };
            Box::pin(async move {
                updater.update::<Echo>(move |echo| echo.values.push(query.0));
            })
        }
    }

    #[derive(Debug)]
    struct WaitForShutdownCommand;

    impl Command for WaitForShutdownCommand {
        fn run(
            &self,
            _snap: CommandSnapshot,
            updater: Updater,
            cancel: CancellationToken,
        ) -> CommandFuture {
            Box::pin(async move {
                cancel.cancelled().await;
                updater.update::<Echo>(|echo| echo.values.push("cancelled".to_owned()));
            })
        }
    }

    async fn join_all(ctx: &mut StateCtx) {
        while ctx.task_set_mut().join_next().await.is_some() {}
        ctx.sync_computes();
    }

    #[test]
    fn state_mut_bumps_version() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Query::default());
        assert_eq!(ctx.state_version::<Query>(), Some(0));

        ctx.state_mut::<Query>().0 = "abc".to_owned();

        assert_eq!(ctx.state::<Query>().0, "abc");
        assert_eq!(ctx.state_version::<Query>(), Some(1));
    }

    #[test]
    fn missing_state_is_reported() {
        let ctx = StateCtx::new();
        let err = ctx.try_state::<Query>().unwrap_err();
        assert!(err.to_string().contains("Query"));
        assert!(ctx.cached::<Echo>().is_none());
    }

    #[test]
    fn updates_apply_on_sync_in_order() {
        let mut ctx = StateCtx::new();
        ctx.record_compute(Echo::default());
        let updater = ctx.updater();

        updater.set(Echo {
            values: vec!["first".to_owned()],
        });
        updater.update::<Echo>(|echo| echo.values.push("second".to_owned()));

        // Nothing is visible until the UI thread syncs.
        assert!(ctx.cached::<Echo>().unwrap().values.is_empty());

        assert_eq!(ctx.sync_computes(), 2);
        assert_eq!(
            ctx.cached::<Echo>().unwrap().values,
            vec!["first".to_owned(), "second".to_owned()]
        );
        assert_eq!(ctx.compute_version::<Echo>(), Some(2));
    }

    #[test]
    fn updates_for_unknown_types_are_dropped() {
        let mut ctx = StateCtx::new();
        ctx.updater().set(Query("orphan".to_owned()));
        assert_eq!(ctx.sync_computes(), 0);
    }

    #[tokio::test]
    async fn dispatched_command_reads_snapshot_and_publishes() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Query("hello".to_owned()));
        ctx.record_compute(Echo::default());
        ctx.record_command(EchoCommand);

        ctx.dispatch::<EchoCommand>();
        // Mutating the state after dispatch does not affect the snapshot already taken.
        ctx.state_mut::<Query>().0 = "changed".to_owned();
        join_all(&mut ctx).await;

        assert_eq!(ctx.cached::<Echo>().unwrap().values, vec!["hello".to_owned()]);
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn unregistered_command_is_skipped() {
        let mut ctx = StateCtx::new();
        ctx.dispatch::<EchoCommand>();
        assert_eq!(ctx.task_count(), 0);
        assert!(!ctx.has_command::<EchoCommand>());
    }

    #[tokio::test]
    async fn shutdown_cancels_outstanding_commands() {
        let mut ctx = StateCtx::new();
        ctx.record_compute(Echo::default());
        ctx.record_command(WaitForShutdownCommand);

        ctx.dispatch::<WaitForShutdownCommand>();
        assert_eq!(ctx.task_count(), 1);

        ctx.shutdown().await;

        assert_eq!(ctx.task_count(), 0);
        assert_eq!(
            ctx.cached::<Echo>().unwrap().values,
            vec!["cancelled".to_owned()]
        );
    }
}
