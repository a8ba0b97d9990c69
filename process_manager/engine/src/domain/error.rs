//! Domain-level errors
//! Every failure surfaced to the operator is one of these variants

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Process {0} not found")]
    ProcessNotFound(u32),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("System failure: {0}")]
    SystemFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Classification of a failure, as reported in an `ActionOutcome`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    SystemFailure,
    InvalidInput,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::ProcessNotFound(_) => ErrorKind::NotFound,
            DomainError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            DomainError::SystemFailure(_) => ErrorKind::SystemFailure,
            DomainError::InvalidInput(_) | DomainError::InvalidConfiguration(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::PermissionDenied => "permission-denied",
            ErrorKind::SystemFailure => "system-failure",
            ErrorKind::InvalidInput => "invalid-input",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
