//! Unix process platform for systems without `/proc` (macOS, the BSDs)
//!
//! The table is read from `ps` output; there is no per-process metadata
//! surface, so `inspect` reports `Unsupported`.

use crate::domain::ports::{ProcessDetails, ProcessPlatform, RawProcessEntry};
use crate::domain::{DomainError, Pid};
use crate::infrastructure::unix_process;
use async_trait::async_trait;
use std::process::Command;
use tracing::error;

const PS_PROGRAM: &str = "ps";
const PS_ARGS: [&str; 5] = ["-axww", "-o", "pid=", "-o", "command="];

#[derive(Default)]
pub struct PsPlatform;

impl PsPlatform {
    pub fn new() -> Self {
        Self
    }
}

/// Split `ps -o pid= -o command=` output into raw entries.
///
/// Each line is a right-aligned id, whitespace, then the command line; an
/// empty command column becomes `None`.
pub fn parse_ps_output(output: &str) -> Vec<RawProcessEntry> {
    output
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((id, rest)) => {
                let command = rest.trim();
                RawProcessEntry::new(id, (!command.is_empty()).then(|| command.to_string()))
            }
            None => RawProcessEntry::new(line, None),
        })
        .collect()
}

#[async_trait]
impl ProcessPlatform for PsPlatform {
    async fn enumerate(&self) -> Result<Vec<RawProcessEntry>, DomainError> {
        let output = Command::new(PS_PROGRAM).args(PS_ARGS).output().map_err(|e| {
            error!(error = %e, "Cannot run ps");
            DomainError::SystemFailure(format!("cannot read process table: {}", e))
        })?;

        if !output.status.success() {
            return Err(DomainError::SystemFailure(format!(
                "ps exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(parse_ps_output(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn terminate(&self, pid: Pid) -> Result<(), DomainError> {
        unix_process::send_signal(pid, libc::SIGKILL, "kill")
    }

    async fn suspend(&self, pid: Pid) -> Result<(), DomainError> {
        unix_process::send_signal(pid, libc::SIGSTOP, "suspend")
    }

    async fn resume(&self, pid: Pid) -> Result<(), DomainError> {
        unix_process::send_signal(pid, libc::SIGCONT, "resume")
    }

    async fn inspect(&self, _pid: Pid) -> Result<ProcessDetails, DomainError> {
        Ok(ProcessDetails::Unsupported)
    }

    async fn spawn(&self, command_line: &str) -> Result<Pid, DomainError> {
        unix_process::spawn_shell(command_line)
    }
}
