//! Users domain: wire model, API calls, request cache and the client-side pipeline.

pub mod api;
mod detail;
mod error;
mod fetch;
mod model;
mod pipeline;

pub use detail::{FetchUserDetailCommand, UserDetailCompute, UserDetailInput};
pub use error::{ApiError, FetchError, ValidationError};
pub use fetch::{LoadUsersCommand, RefreshUsersCommand, UsersCompute};
pub use model::{Address, Company, Geo, UserRecord};
pub use pipeline::{
    FilterCriteria, FilterField, PageRange, Pagination, SortCriteria, SortDirection, SortField,
    UserPipeline, sync_user_pipeline,
};
