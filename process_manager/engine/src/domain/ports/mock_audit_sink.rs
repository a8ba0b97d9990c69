//! In-memory audit sink for testing

use crate::domain::{DomainError, LifecycleAction};
use std::sync::{Arc, Mutex};

use super::AuditSink;

#[derive(Clone, Default)]
pub struct MockAuditSink {
    records: Arc<Mutex<Vec<LifecycleAction>>>,
    fail_with: Option<String>,
}

impl MockAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every write fails, like an unwritable log file
    pub fn failing(reason: &str) -> Self {
        Self {
            records: Arc::default(),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn records(&self) -> Vec<LifecycleAction> {
        self.records.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

impl AuditSink for MockAuditSink {
    fn record(&self, action: LifecycleAction) -> Result<(), DomainError> {
        if let Some(reason) = &self.fail_with {
            return Err(DomainError::SystemFailure(reason.clone()));
        }
        self.records.lock().unwrap().push(action);
        Ok(())
    }
}
