mod env_version;
mod error_alert;
mod filters;
mod loading_spinner;
mod pagination;
mod theme_toggle;
mod top_bar;
mod users_table;

pub use env_version::env_version;
pub use error_alert::{AlertKind, error_alert};
pub use filters::{FilterPanelState, filter_panel};
pub use loading_spinner::{DEFAULT_LOADING_MESSAGE, LoadingSpinner};
pub use pagination::{PAGE_SIZES, PageAction, pagination};
pub use theme_toggle::theme_toggle;
pub use top_bar::top_bar;
pub use users_table::{TABLE_COLUMNS, TableAction, users_table};
