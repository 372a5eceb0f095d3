//! SDK Error Types

use fuzzctl_core::AppError;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Core(#[from] AppError),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            SdkError::Connection(format!("Failed to connect: {}", e))
        } else if e.is_timeout() {
            SdkError::Transport(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            SdkError::Transport(format!("Invalid response body: {}", e))
        } else if e.is_builder() {
            SdkError::InvalidUrl(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            SdkError::Transport(e.to_string())
        }
    }
}

impl From<SdkError> for AppError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Core(inner) => inner,
            SdkError::MissingConfiguration(msg) => AppError::MissingConfiguration(msg),
            SdkError::Serialization(inner) => AppError::Serialization(inner),
            other => AppError::RemoteFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let sdk: SdkError = AppError::not_found("job_id", "ab").into();
        let back: AppError = sdk.into();

        assert!(matches!(back, AppError::NotFound { .. }));
    }

    #[test]
    fn test_http_errors_become_remote_failures() {
        let back: AppError = SdkError::Http {
            status: 401,
            message: "unauthorized".to_string(),
        }
        .into();

        match back {
            AppError::RemoteFailure(msg) => assert!(msg.contains("401")),
            other => panic!("expected RemoteFailure, got {:?}", other),
        }
    }
}
