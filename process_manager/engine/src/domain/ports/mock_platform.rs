//! Mock platform implementation for testing
//! A deterministic, in-memory process table

use crate::domain::{DomainError, Pid};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::{ProcessDetails, ProcessPlatform, RawProcessEntry};

#[derive(Default)]
struct MockTable {
    entries: Vec<RawProcessEntry>,
    denied: HashSet<u32>,
    suspended: HashSet<u32>,
    details: HashMap<u32, String>,
    details_unsupported: bool,
    table_unavailable: bool,
    spawn_failure: Option<String>,
    spawned: Vec<String>,
}

impl MockTable {
    fn position(&self, pid: Pid) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| Pid::from_table_entry(&e.id) == Some(pid))
    }

    /// Same checks a real OS applies before acting on a pid
    fn check_target(&self, pid: Pid) -> Result<usize, DomainError> {
        let index = self
            .position(pid)
            .ok_or(DomainError::ProcessNotFound(pid.as_u32()))?;
        if self.denied.contains(&pid.as_u32()) {
            return Err(DomainError::PermissionDenied(format!(
                "operation not permitted on process {}",
                pid
            )));
        }
        Ok(index)
    }
}

/// In-memory process table for unit tests
#[derive(Clone, Default)]
pub struct MockProcessPlatform {
    table: Arc<Mutex<MockTable>>,
}

impl MockProcessPlatform {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(self, pid: u32, command_line: &str) -> Self {
        self.with_raw_entry(&pid.to_string(), Some(command_line))
    }

    /// Add an entry exactly as an OS might report it, malformed ids included
    pub fn with_raw_entry(self, id: &str, command_line: Option<&str>) -> Self {
        self.table
            .lock()
            .unwrap()
            .entries
            .push(RawProcessEntry::new(id, command_line.map(str::to_string)));
        self
    }

    /// Every action on `pid` is refused with `PermissionDenied`
    pub fn deny(self, pid: u32) -> Self {
        self.table.lock().unwrap().denied.insert(pid);
        self
    }

    pub fn with_details(self, pid: u32, report: &str) -> Self {
        self.table
            .lock()
            .unwrap()
            .details
            .insert(pid, report.to_string());
        self
    }

    /// Behave like a platform with no per-process metadata surface
    pub fn without_details_surface(self) -> Self {
        self.table.lock().unwrap().details_unsupported = true;
        self
    }

    /// Make `enumerate` fail as if the table could not be opened
    pub fn with_unreadable_table(self) -> Self {
        self.table.lock().unwrap().table_unavailable = true;
        self
    }

    pub fn with_spawn_failure(self, reason: &str) -> Self {
        self.table.lock().unwrap().spawn_failure = Some(reason.to_string());
        self
    }

    /// Drop a process from the table, as if it exited on its own
    pub fn vanish(&self, pid: u32) {
        let mut table = self.table.lock().unwrap();
        table
            .entries
            .retain(|e| Pid::from_table_entry(&e.id).map(|p| p.as_u32()) != Some(pid));
        table.suspended.remove(&pid);
    }

    pub fn contains(&self, pid: u32) -> bool {
        Pid::new(pid)
            .map(|pid| self.table.lock().unwrap().position(pid).is_some())
            .unwrap_or(false)
    }

    pub fn is_suspended(&self, pid: u32) -> bool {
        self.table.lock().unwrap().suspended.contains(&pid)
    }

    /// Command lines passed to `spawn`, in call order
    pub fn spawned_commands(&self) -> Vec<String> {
        self.table.lock().unwrap().spawned.clone()
    }
}

#[async_trait]
impl ProcessPlatform for MockProcessPlatform {
    async fn enumerate(&self) -> Result<Vec<RawProcessEntry>, DomainError> {
        let table = self.table.lock().unwrap();
        if table.table_unavailable {
            return Err(DomainError::SystemFailure(
                "cannot open process table".to_string(),
            ));
        }
        Ok(table.entries.clone())
    }

    async fn terminate(&self, pid: Pid) -> Result<(), DomainError> {
        let mut table = self.table.lock().unwrap();
        let index = table.check_target(pid)?;
        table.entries.remove(index);
        table.suspended.remove(&pid.as_u32());
        Ok(())
    }

    async fn suspend(&self, pid: Pid) -> Result<(), DomainError> {
        let mut table = self.table.lock().unwrap();
        table.check_target(pid)?;
        table.suspended.insert(pid.as_u32());
        Ok(())
    }

    async fn resume(&self, pid: Pid) -> Result<(), DomainError> {
        let mut table = self.table.lock().unwrap();
        table.check_target(pid)?;
        table.suspended.remove(&pid.as_u32());
        Ok(())
    }

    async fn inspect(&self, pid: Pid) -> Result<ProcessDetails, DomainError> {
        let table = self.table.lock().unwrap();
        if table.details_unsupported {
            return Ok(ProcessDetails::Unsupported);
        }
        let index = table.check_target(pid)?;
        let report = table.details.get(&pid.as_u32()).cloned().unwrap_or_else(|| {
            let state = if table.suspended.contains(&pid.as_u32()) {
                "T (stopped)"
            } else {
                "S (sleeping)"
            };
            format!(
                "Name:\t{}\nState:\t{}\nPid:\t{}\n",
                table.entries[index].command_line.as_deref().unwrap_or(""),
                state,
                pid
            )
        });
        Ok(ProcessDetails::Report(report))
    }

    async fn spawn(&self, command_line: &str) -> Result<Pid, DomainError> {
        let mut table = self.table.lock().unwrap();
        if let Some(reason) = &table.spawn_failure {
            return Err(DomainError::SystemFailure(reason.clone()));
        }
        let highest = table
            .entries
            .iter()
            .filter_map(|e| Pid::from_table_entry(&e.id))
            .map(|pid| pid.as_u32())
            .max()
            .unwrap_or(0);
        let pid = Pid::new(highest + 1)
            .ok_or_else(|| DomainError::SystemFailure("pid space exhausted".to_string()))?;
        table
            .entries
            .push(RawProcessEntry::new(pid.to_string(), Some(command_line.to_string())));
        table.spawned.push(command_line.to_string());
        Ok(pid)
    }
}
