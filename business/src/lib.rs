//! Business layer for Roster: configuration, the users API, the filter/sort/paginate pipeline,
//! theme selection, debouncing and routing.
//!
//! Nothing here depends on egui. The ui crate drives it through a `StateCtx` built by
//! [`build_state_ctx`].

mod config;
pub mod debounce;
pub mod http;
mod route;
pub mod theme;
pub mod users;

pub use config::{
    BusinessConfig, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_USERS_MAX_AGE, ENV_PREFIX,
};
pub use debounce::Debouncer;
pub use route::{Route, navigate};
pub use theme::{MemoryThemeStorage, Theme, ThemeManager, ThemeRoot, ThemeStorage};
pub use users::{
    Address, ApiError, Company, FetchError, FetchUserDetailCommand, FilterCriteria, FilterField,
    Geo, LoadUsersCommand, PageRange, Pagination, RefreshUsersCommand, SortCriteria,
    SortDirection, SortField, UserDetailCompute, UserDetailInput, UserPipeline, UserRecord,
    UsersCompute, ValidationError, sync_user_pipeline,
};

use roster_states::StateCtx;

/// Registers every state, compute and command the app uses.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    // Pipeline starts with the configured page size.
    ctx.add_state(UserPipeline::new(config.page_size));
    ctx.add_state(config);
    ctx.add_state(Route::default());

    // Users list
    ctx.record_compute(UsersCompute::default());
    ctx.record_command(LoadUsersCommand);
    ctx.record_command(RefreshUsersCommand);

    // User details
    ctx.add_state(UserDetailInput::default());
    ctx.record_compute(UserDetailCompute::default());
    ctx.record_command(FetchUserDetailCommand);

    ctx
}
