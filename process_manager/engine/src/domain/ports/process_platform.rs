//! ProcessPlatform port
//! Interface to the operating system's process table and lifecycle primitives

use crate::domain::{DomainError, Pid};
use async_trait::async_trait;

/// One entry of the OS process table, before interpretation.
///
/// `id` is passed through exactly as the OS reports it (a `/proc` directory
/// name, a `ps` column); deciding what counts as a process is the reader's
/// job, not the adapter's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProcessEntry {
    pub id: String,
    /// `None` when the command-line artifact could not be read
    pub command_line: Option<String>,
}

impl RawProcessEntry {
    pub fn new(id: impl Into<String>, command_line: Option<String>) -> Self {
        Self {
            id: id.into(),
            command_line,
        }
    }
}

/// Result of asking the platform for a process status report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessDetails {
    /// Verbatim multi-line report from the metadata surface
    Report(String),
    /// The platform has no per-process metadata surface
    Unsupported,
}

/// Port for the host's process table.
///
/// Implementations map OS failures onto `DomainError`: a missing process is
/// `ProcessNotFound`, a refusal is `PermissionDenied`, anything else is
/// `SystemFailure`.
#[async_trait]
pub trait ProcessPlatform: Send + Sync {
    /// Snapshot every entry the caller is allowed to see
    async fn enumerate(&self) -> Result<Vec<RawProcessEntry>, DomainError>;

    /// Immediate, non-catchable termination
    async fn terminate(&self, pid: Pid) -> Result<(), DomainError>;

    /// Pause every thread of the process
    async fn suspend(&self, pid: Pid) -> Result<(), DomainError>;

    /// Continue a paused process
    async fn resume(&self, pid: Pid) -> Result<(), DomainError>;

    async fn inspect(&self, pid: Pid) -> Result<ProcessDetails, DomainError>;

    /// Launch a shell command line detached from the caller; the child is
    /// never waited for
    async fn spawn(&self, command_line: &str) -> Result<Pid, DomainError>;
}
