//! Single-user lookup for the details page.
//!
//! The UI writes the raw route parameter into `UserDetailInput` and dispatches
//! `FetchUserDetailCommand`. Invalid ids fail immediately without a request.

use std::any::Any;

use log::{error, info, warn};
use roster_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, SnapshotClone, State,
    Updater, assign_impl, noop, state_assign_impl,
};

use crate::BusinessConfig;
use crate::users::{ApiError, UserRecord, api};

/// Raw user id taken from the route, validated when the command runs.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct UserDetailInput {
    pub user_id: String,
}

impl SnapshotClone for UserDetailInput {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for UserDetailInput {
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserDetailCompute {
    #[default]
    Idle,
    /// Carries the id being fetched so stale responses can be told apart.
    Loading(String),
    Loaded(UserRecord),
    Failed(ApiError),
}

impl UserDetailCompute {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Loaded(user) => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Clears a failure so the page stops showing it. Other states are left alone.
    pub fn dismiss_error(&mut self) {
        if matches!(self, Self::Failed(_)) {
            *self = Self::Idle;
        }
    }

    /// Applies a finished lookup only while that same id is still loading.
    ///
    /// Every lookup enters `Loading(id)` before its request starts, so a result arriving in any
    /// other state belongs to a lookup that has since been superseded or settled.
    fn resolve(&mut self, user_id: &str, result: Result<UserRecord, ApiError>) {
        match self {
            Self::Loading(pending) if pending.as_str() == user_id => {}
            Self::Loading(pending) => {
                warn!("Dropped stale user detail for id {user_id:?}, now loading {pending:?}");
                return;
            }
            _ => {
                warn!("Dropped late user detail for id {user_id:?}, lookup already settled");
                return;
            }
        }

        *self = match result {
            Ok(user) => Self::Loaded(user),
            Err(err) => Self::Failed(err),
        };
    }
}

impl SnapshotClone for UserDetailCompute {}

impl Compute for UserDetailCompute {
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

/// Looks up the user named by `UserDetailInput`.
///
/// Dispatch explicitly via `ctx.dispatch::<FetchUserDetailCommand>()`.
#[derive(Default, Debug)]
pub struct FetchUserDetailCommand;

impl Command for FetchUserDetailCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let (Some(input), Some(config)) = (
            snap.state::<UserDetailInput>().cloned(),
            snap.state::<BusinessConfig>().cloned(),
        ) else {
            error!("FetchUserDetailCommand: UserDetailInput or BusinessConfig is not registered");
            return noop();
        };

        if let Err(err) = api::validate_user_id(&input.user_id) {
            warn!("FetchUserDetailCommand: {err}");
            updater.set(UserDetailCompute::Failed(err.into()));
            return noop();
        }

        updater.set(UserDetailCompute::Loading(input.user_id.clone()));
        let input_id = input.user_id.clone();

        Box::pin(async move {
            let api_url = config.api_url();
            let user_id = input.user_id;
            let request = api::fetch_user(api_url.as_str(), config.request_timeout, &input_id);

            tokio::select! {
                result = request => {
                    match &result {
                        Ok(user) => info!("FetchUserDetailCommand: loaded user {}", user.id),
                        Err(err) => error!("FetchUserDetailCommand: {err}"),
                    }
                    updater.update::<UserDetailCompute>(move |detail| detail.resolve(&user_id, result));
                }
                () = cancel.cancelled() => {
                    info!("FetchUserDetailCommand: cancelled");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{FetchError, ValidationError};

    #[test]
    fn dismiss_only_clears_failures() {
        let mut detail = UserDetailCompute::Failed(FetchError::Status { status: 404 }.into());
        detail.dismiss_error();
        assert_eq!(detail, UserDetailCompute::Idle);

        let mut detail = UserDetailCompute::Loading("1".to_owned());
        detail.dismiss_error();
        assert!(detail.is_loading());
    }

    #[test]
    fn resolve_applies_matching_result() {
        let mut detail = UserDetailCompute::Loading("3".to_owned());
        detail.resolve(
            "3",
            Ok(UserRecord {
                id: 3,
                ..UserRecord::default()
            }),
        );
        assert_eq!(detail.user().map(|user| user.id), Some(3));
    }

    #[test]
    fn resolve_ignores_result_for_superseded_id() {
        let mut detail = UserDetailCompute::Loading("4".to_owned());
        detail.resolve(
            "3",
            Err(ApiError::Validation(ValidationError::InvalidUserId(
                "3".to_owned(),
            ))),
        );
        assert_eq!(detail, UserDetailCompute::Loading("4".to_owned()));
    }

    #[test]
    fn resolve_ignores_late_result_after_newer_lookup_loaded() {
        // Open user 3, then user 4; user 4 answers first.
        let mut detail = UserDetailCompute::Loading("4".to_owned());
        detail.resolve(
            "4",
            Ok(UserRecord {
                id: 4,
                ..UserRecord::default()
            }),
        );
        detail.resolve(
            "3",
            Ok(UserRecord {
                id: 3,
                ..UserRecord::default()
            }),
        );
        assert_eq!(detail.user().map(|user| user.id), Some(4));

        detail.resolve("3", Err(FetchError::Status { status: 500 }.into()));
        assert_eq!(detail.user().map(|user| user.id), Some(4));
    }

    #[test]
    fn resolve_ignores_late_result_after_dismissed_failure() {
        let mut detail = UserDetailCompute::Loading("9".to_owned());
        detail.resolve("9", Err(FetchError::Status { status: 404 }.into()));
        detail.dismiss_error();

        detail.resolve(
            "8",
            Ok(UserRecord {
                id: 8,
                ..UserRecord::default()
            }),
        );
        assert_eq!(detail, UserDetailCompute::Idle);
    }
}
