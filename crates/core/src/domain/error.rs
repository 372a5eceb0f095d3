// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown container type: {0}")]
    UnknownContainerType(String),

    #[error("Unknown OS: {0}")]
    UnknownOs(String),

    #[error("Unknown task type: {0}")]
    UnknownTaskType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
