//! File-backed audit log
//! One `<action>: <timestamp>` line appended per completed mutating action

use crate::constants::files::AUDIT_TIMESTAMP_FORMAT;
use crate::domain::ports::AuditSink;
use crate::domain::{DomainError, LifecycleAction};
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn format_entry(action: LifecycleAction, at: NaiveDateTime) -> String {
    format!(
        "{}: {}\n",
        action.audit_label(),
        at.format(AUDIT_TIMESTAMP_FORMAT)
    )
}

impl AuditSink for FileAuditLog {
    fn record(&self, action: LifecycleAction) -> Result<(), DomainError> {
        let line = format_entry(action, Local::now().naive_local());

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| {
                warn!(path = %self.path.display(), error = %e, "Failed to write audit log");
                DomainError::SystemFailure(format!(
                    "failed to write audit log '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        debug!(path = %self.path.display(), action = ?action, "Audit entry appended");
        Ok(())
    }
}
