use thiserror::Error;

/// Failure of a request to the users API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),
    #[error("API returned status: {status}")]
    Status { status: u16 },
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid user ID: {0:?}")]
    InvalidUserId(String),
}

/// Every error a users API call can surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl FetchError {
    /// Status errors in the 4xx range are the caller's fault and won't change on retry.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status } if (400..500).contains(status))
    }
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::Status { status: 404 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            FetchError::Status { status: 503 }.to_string(),
            "API returned status: 503"
        );
        assert_eq!(
            ApiError::from(ValidationError::InvalidUserId("abc".to_owned())).to_string(),
            "Invalid user ID: \"abc\""
        );
    }

    #[test]
    fn classifies_status_errors() {
        assert!(FetchError::Status { status: 404 }.is_client_error());
        assert!(!FetchError::Status { status: 500 }.is_client_error());
        assert!(!FetchError::Network("reset".to_owned()).is_client_error());
        assert!(ApiError::from(FetchError::Status { status: 404 }).is_not_found());
    }
}
