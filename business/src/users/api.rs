//! Users API client helpers.
//!
//! These functions perform network IO and are meant to be awaited inside commands.
//! Callers map results into compute updates.

use std::time::Duration;

use log::{debug, error};
use serde::de::DeserializeOwned;

use crate::http::{Client, Response};
use crate::users::{ApiError, FetchError, UserRecord, ValidationError};

/// Parses a raw route parameter into a user id.
///
/// Accepts surrounding whitespace, nothing else: the trimmed input must be ASCII digits that fit
/// in a `u64`.
pub fn validate_user_id(raw: &str) -> Result<u64, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidUserId(raw.to_owned());

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    trimmed.parse::<u64>().map_err(|_| invalid())
}

/// GET `/users`
pub async fn fetch_all(api_base_url: &str, timeout: Duration) -> Result<Vec<UserRecord>, FetchError> {
    let url = format!("{api_base_url}/users");
    get_json(&url, timeout).await
}

/// GET `/users/{id}`
///
/// An invalid `raw_id` fails with [`ApiError::Validation`] without touching the network.
pub async fn fetch_user(
    api_base_url: &str,
    timeout: Duration,
    raw_id: &str,
) -> Result<UserRecord, ApiError> {
    let id = validate_user_id(raw_id)?;
    let url = format!("{api_base_url}/users/{id}");
    Ok(get_json(&url, timeout).await?)
}

async fn get_json<T: DeserializeOwned>(url: &str, timeout: Duration) -> Result<T, FetchError> {
    debug!("GET {url}");

    let response = Client::get(url)
        .header("accept", "application/json")
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            error!("Network error for GET {url}: {e}");
            FetchError::Network(e.message)
        })?;

    decode(url, &response)
}

fn decode<T: DeserializeOwned>(url: &str, response: &Response) -> Result<T, FetchError> {
    if !response.is_success() {
        error!("API error for GET {url}: status {}", response.status);
        return Err(FetchError::Status {
            status: response.status,
        });
    }

    response.json().map_err(|e| {
        error!("Failed to decode response of GET {url}: {e}");
        FetchError::Decode(e.to_string())
    })
}
