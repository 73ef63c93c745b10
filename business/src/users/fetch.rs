//! Users request cache + load/refresh commands.
//!
//! - `UsersCompute` is a compute-shaped cache holding the last payload, the last error and how
//!   many requests are in flight.
//! - `LoadUsersCommand` fetches only when nothing fresh is cached and nothing is loading.
//! - `RefreshUsersCommand` always fetches.
//!
//! Both commands publish through `Updater::update`, so every request resolves against whatever
//! the cache holds when it completes. The last request to complete wins, and in-flight requests
//! are never cancelled by a newer one. Only `StateCtx::shutdown` cancels them.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, error, info};
use roster_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, SnapshotClone, Updater,
    assign_impl, noop,
};

use crate::BusinessConfig;
use crate::users::{FetchError, UserRecord, api};

#[derive(Debug, Clone, Default)]
pub struct UsersCompute {
    users: Option<Arc<Vec<UserRecord>>>,
    error: Option<FetchError>,
    in_flight: usize,
    generation: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl UsersCompute {
    /// True while at least one request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// The last failure, until the next success or [`UsersCompute::dismiss_error`].
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// The last successful payload. Stays available while refreshing and after a failed refresh.
    pub fn users(&self) -> Option<&Arc<Vec<UserRecord>>> {
        self.users.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.users.is_some()
    }

    /// Bumped on every successful payload.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// True when a payload was fetched less than `max_age` before `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let Some(at) = self.fetched_at else {
            return false;
        };
        let max_age = TimeDelta::from_std(max_age).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(at) < max_age
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn begin_request(&mut self) {
        self.in_flight += 1;
    }

    fn finish_ok(&mut self, users: Vec<UserRecord>, at: DateTime<Utc>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.users = Some(Arc::new(users));
        self.error = None;
        self.generation += 1;
        self.fetched_at = Some(at);
    }

    fn finish_err(&mut self, error: FetchError) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.error = Some(error);
    }

    fn abandon(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

impl SnapshotClone for UsersCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for UsersCompute {
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

/// Fetches users unless a fresh payload is cached or a request is in flight.
///
/// Freshness is `BusinessConfig::users_max_age`.
///
/// Dispatch explicitly via `ctx.dispatch::<LoadUsersCommand>()`.
#[derive(Default, Debug)]
pub struct LoadUsersCommand;

impl Command for LoadUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let max_age = snap
            .state::<BusinessConfig>()
            .map_or(crate::DEFAULT_USERS_MAX_AGE, |config| config.users_max_age);
        let now = Utc::now();
        let served = snap
            .compute::<UsersCompute>()
            .is_some_and(|cache| cache.is_loading() || cache.is_fresh(now, max_age));
        if served {
            debug!("LoadUsersCommand: served from cache");
            return noop();
        }

        spawn_fetch("LoadUsersCommand", &snap, updater, cancel)
    }
}

/// Fetches users unconditionally.
///
/// Dispatch explicitly via `ctx.dispatch::<RefreshUsersCommand>()`.
#[derive(Default, Debug)]
pub struct RefreshUsersCommand;

impl Command for RefreshUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        spawn_fetch("RefreshUsersCommand", &snap, updater, cancel)
    }
}

fn spawn_fetch(
    name: &'static str,
    snap: &CommandSnapshot,
    updater: Updater,
    cancel: CancellationToken,
) -> CommandFuture {
    let Some(config) = snap.state::<BusinessConfig>().cloned() else {
        error!("{name}: BusinessConfig is not registered");
        return noop();
    };

    // Marks the cache as loading before the next frame renders.
    updater.update::<UsersCompute>(UsersCompute::begin_request);

    Box::pin(async move {
        let api_url = config.api_url();

        tokio::select! {
            result = api::fetch_all(api_url.as_str(), config.request_timeout) => match result {
                Ok(users) => {
                    info!("{name}: fetched {} users", users.len());
                    let at = Utc::now();
                    updater.update::<UsersCompute>(move |cache| cache.finish_ok(users, at));
                }
                Err(err) => {
                    error!("{name}: {err}");
                    updater.update::<UsersCompute>(move |cache| cache.finish_err(err));
                }
            },
            () = cancel.cancelled() => {
                info!("{name}: cancelled");
                updater.update::<UsersCompute>(UsersCompute::abandon);
            }
        }
    })
}
