//! Route state for page navigation.
//!
//! Routes map to URL paths so wasm builds can start on the page the browser was pointed at.

use std::any::Any;

use roster_states::{SnapshotClone, State, StateCtx, state_assign_impl};
use serde::{Deserialize, Serialize};

use crate::users::{FetchUserDetailCommand, LoadUsersCommand, UserDetailInput};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// `/`
    #[default]
    Dashboard,
    /// `/user/{id}`, with the raw id as written in the path.
    UserDetails(String),
    /// Any other path.
    NotFound,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "User Dashboard",
            Self::UserDetails(_) => "User Details",
            Self::NotFound => "404 Not Found",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "/".to_owned(),
            Self::UserDetails(id) => format!("/user/{id}"),
            Self::NotFound => "/404".to_owned(),
        }
    }

    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Dashboard;
        }

        match trimmed.strip_prefix("/user/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Self::UserDetails(id.to_owned()),
            _ => Self::NotFound,
        }
    }
}

impl SnapshotClone for Route {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for Route {
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

/// Switches to `route` and starts whatever loading the page needs.
///
/// The dashboard loads the users list, which is a no-op while the cached list is fresh.
pub fn navigate(ctx: &mut StateCtx, route: Route) {
    match &route {
        Route::Dashboard => ctx.dispatch::<LoadUsersCommand>(),
        Route::UserDetails(id) => {
            ctx.state_mut::<UserDetailInput>().user_id = id.clone();
            ctx.dispatch::<FetchUserDetailCommand>();
        }
        Route::NotFound => {}
    }
    *ctx.state_mut::<Route>() = route;
}
