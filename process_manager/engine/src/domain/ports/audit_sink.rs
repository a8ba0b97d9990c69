//! AuditSink port
//! Append-only record of completed mutating actions

use crate::domain::{DomainError, LifecycleAction};

pub trait AuditSink: Send + Sync {
    fn record(&self, action: LifecycleAction) -> Result<(), DomainError>;
}
