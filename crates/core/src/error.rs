// Central Error Type for the Client Core

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unable to find {field} based on prefix: {token}")]
    NotFound { field: String, token: String },

    #[error("{field} expands to multiple values - {token}: {}", .matches.join(","))]
    Ambiguous {
        field: String,
        token: String,
        matches: Vec<String>,
    },

    #[error("Invalid {field}: {value} is not a UUID")]
    InvalidIdentifierSyntax { field: String, value: String },

    #[error("Remote failure: {0}")]
    RemoteFailure(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn not_found(field: impl Into<String>, token: impl Into<String>) -> Self {
        AppError::NotFound {
            field: field.into(),
            token: token.into(),
        }
    }

    /// True for the two resolution failures an operator can fix by typing a longer prefix
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, AppError::NotFound { .. } | AppError::Ambiguous { .. })
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
