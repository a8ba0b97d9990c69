//! Process Table Reader
//!
//! The single code path that interprets the OS process table. Everything
//! else (resolution, search, export) goes through `list_processes`, so the
//! notion of "a process" is defined in exactly one place.

use crate::domain::ports::ProcessPlatform;
use crate::domain::{DomainError, Pid, ProcessRecord};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Clone)]
pub struct ProcessTableReader {
    platform: Arc<dyn ProcessPlatform>,
}

impl ProcessTableReader {
    pub fn new(platform: Arc<dyn ProcessPlatform>) -> Self {
        Self { platform }
    }

    /// Fresh snapshot of every visible process, ordered by PID.
    ///
    /// Entries whose id is not a positive integer are skipped; unreadable or
    /// empty command lines become `[No command]`. Only a failure to read the
    /// table as a whole is an error.
    pub async fn list_processes(&self) -> Result<Vec<ProcessRecord>, DomainError> {
        let entries = self.platform.enumerate().await?;
        let total = entries.len();

        let mut records: Vec<ProcessRecord> = entries
            .into_iter()
            .filter_map(|entry| match Pid::from_table_entry(&entry.id) {
                Some(pid) => Some(ProcessRecord::new(pid, entry.command_line.as_deref())),
                None => {
                    trace!(entry = %entry.id, "Skipping non-process table entry");
                    None
                }
            })
            .collect();
        records.sort_by_key(ProcessRecord::pid);

        debug!(
            entries = total,
            processes = records.len(),
            "Process table enumerated"
        );
        Ok(records)
    }
}
