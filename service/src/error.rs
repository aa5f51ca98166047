//! Error handling for the weather alert service
//!
//! None of these errors reach a user: fetch failures collapse to an absent
//! forecast and dispatch failures to an undelivered notification. They exist
//! so each boundary can log a precise cause.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // External service errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} responded with status {status}")]
    UnexpectedStatus { service: &'static str, status: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Result type alias used throughout the service
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = AppError::UnexpectedStatus {
            service: "Pushover",
            status: 400,
        };
        assert_eq!(err.to_string(), "Pushover responded with status 400");
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
