//! ActionOutcome value object
//! Classified result of a single lifecycle operation

use crate::domain::{DomainError, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    error: Option<DomainError>,
}

impl ActionOutcome {
    pub fn success() -> Self {
        Self { error: None }
    }

    pub fn failure(error: DomainError) -> Self {
        Self { error: Some(error) }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// `None` when the action succeeded
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(DomainError::kind)
    }

    pub fn error(&self) -> Option<&DomainError> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        match self.error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

impl From<Result<(), DomainError>> for ActionOutcome {
    fn from(result: Result<(), DomainError>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(err) => Self::failure(err),
        }
    }
}
