//! Pages, one per [`roster_business::Route`]:
//! - `dashboard_page`: filters, the users table and pagination
//! - `user_details_page`: a single user
//! - `not_found_page`: any unknown path

mod dashboard_page;
mod not_found_page;
mod user_details_page;

pub use dashboard_page::dashboard_page;
pub use not_found_page::not_found_page;
pub use user_details_page::user_details_page;
