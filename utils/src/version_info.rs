//! Version information for the application, populated at build time.
//!
//! Display format: `v{version} ({commit}, {date})`, where the date is the
//! `YYYY-MM-DD` portion of the build timestamp.

/// Build timestamp in RFC3339 format.
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Short git commit hash, or `unknown` outside a checkout.
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// The `YYYY-MM-DD` portion of [`build_date`].
pub fn build_day() -> &'static str {
    let date = build_date();
    // BUILD_DATE is RFC3339, so the first 10 bytes are ASCII.
    if date.len() >= 10 && date.is_ascii() {
        &date[..10]
    } else {
        date
    }
}

/// Formats the version label shown in the top bar.
pub fn format_version() -> String {
    format!("v{} ({}, {})", build_version(), build_commit(), build_day())
}
