//! Linux process platform backed by the `/proc` filesystem
//!
//! - Enumeration: one entry per directory under the proc root, command line
//!   from `<root>/<id>/cmdline`
//! - Inspection: `<root>/<pid>/status`, passed through verbatim
//! - Lifecycle: `SIGKILL`, `SIGSTOP`, `SIGCONT`

use crate::constants::process_table::DEFAULT_PROC_ROOT;
use crate::domain::ports::{ProcessDetails, ProcessPlatform, RawProcessEntry};
use crate::domain::{DomainError, Pid};
use crate::infrastructure::{os_error, unix_process};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub struct ProcfsPlatform {
    root: PathBuf,
}

impl ProcfsPlatform {
    pub fn new() -> Self {
        Self::with_root(DEFAULT_PROC_ROOT)
    }

    /// Read the process table from another mount point
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `None` when the artifact is missing or unreadable
    fn read_command_line(&self, id: &str) -> Option<String> {
        let path = self.root.join(id).join("cmdline");
        match fs::read(&path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Command line not readable");
                None
            }
        }
    }
}

impl Default for ProcfsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessPlatform for ProcfsPlatform {
    async fn enumerate(&self) -> Result<Vec<RawProcessEntry>, DomainError> {
        let dir = fs::read_dir(&self.root).map_err(|e| {
            error!(root = %self.root.display(), error = %e, "Cannot open process table");
            DomainError::SystemFailure(format!(
                "cannot open process table '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        let entries = dir
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| {
                let id = entry.file_name().to_string_lossy().into_owned();
                let command_line = self.read_command_line(&id);
                RawProcessEntry::new(id, command_line)
            })
            .collect();

        Ok(entries)
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

    async fn inspect(&self, pid: Pid) -> Result<ProcessDetails, DomainError> {
        let path = self.root.join(pid.to_string()).join("status");
        // the Name: line is the raw comm and need not be UTF-8
        fs::read(&path)
            .map(|bytes| ProcessDetails::Report(String::from_utf8_lossy(&bytes).into_owned()))
            .map_err(|e| os_error::classify(pid, "inspect", e))
    }

    async fn spawn(&self, command_line: &str) -> Result<Pid, DomainError> {
        unix_process::spawn_shell(command_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProcessTableReader;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn fake_proc() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("100")).unwrap();
        fs::write(root.join("100/cmdline"), b"/usr/sbin/sshd\0-D\0").unwrap();
        fs::write(
            root.join("100/status"),
            "Name:\tsshd\nState:\tS (sleeping)\nPid:\t100\n",
        )
        .unwrap();

        fs::create_dir(root.join("205")).unwrap();
        fs::write(root.join("205/cmdline"), b"").unwrap();

        // kernel thread whose cmdline cannot be read at all
        fs::create_dir(root.join("300")).unwrap();

        fs::create_dir(root.join("sys")).unwrap();
        fs::create_dir(root.join("0")).unwrap();
        fs::write(root.join("uptime"), "1.0 1.0\n").unwrap();
        dir
    }

    /// Third field of `/proc/<pid>/stat`, after the parenthesised comm
    fn proc_state(pid: Pid) -> Option<char> {
        let stat = fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
        stat.rsplit_once(')')?.1.trim_start().chars().next()
    }

    async fn wait_for_state(pid: Pid, wanted: &[char]) -> bool {
        for _ in 0..50 {
            if proc_state(pid).map(|s| wanted.contains(&s)).unwrap_or(false) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_enumerate_fake_table() {
        let dir = fake_proc();
        let reader = ProcessTableReader::new(Arc::new(ProcfsPlatform::with_root(dir.path())));

        let records = reader.list_processes().await.unwrap();
        let lines: Vec<String> = records.iter().map(|r| r.display_line()).collect();
        assert_eq!(
            lines,
            vec!["100\t/usr/sbin/sshd -D", "205\t[No command]", "300\t[No command]"]
        );
    }

    #[tokio::test]
    async fn test_missing_root_is_system_failure() {
        let platform = ProcfsPlatform::with_root("/definitely/not/a/proc/root");
        assert!(matches!(
            platform.enumerate().await,
            Err(DomainError::SystemFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_inspect_fake_status() {
        let dir = fake_proc();
        let platform = ProcfsPlatform::with_root(dir.path());

        let details = platform.inspect(Pid::new(100).unwrap()).await.unwrap();
        assert_eq!(
            details,
            ProcessDetails::Report("Name:\tsshd\nState:\tS (sleeping)\nPid:\t100\n".to_string())
        );
        assert_eq!(
            platform.inspect(Pid::new(999).unwrap()).await,
            Err(DomainError::ProcessNotFound(999))
        );
    }

    #[tokio::test]
    async fn test_inspect_non_utf8_status() {
        let dir = fake_proc();
        fs::write(
            dir.path().join("100/status"),
            b"Name:\tbad\xffname\nState:\tS (sleeping)\nPid:\t100\n",
        )
        .unwrap();
        let platform = ProcfsPlatform::with_root(dir.path());

        let ProcessDetails::Report(report) = platform.inspect(Pid::new(100).unwrap()).await.unwrap()
        else {
            panic!("expected a status report");
        };
        assert_eq!(
            report,
            "Name:\tbad\u{fffd}name\nState:\tS (sleeping)\nPid:\t100\n"
        );
    }

    #[tokio::test]
    async fn test_real_table_contains_self() {
        let reader = ProcessTableReader::new(Arc::new(ProcfsPlatform::new()));
        let me = Pid::new(std::process::id()).unwrap();

        let records = reader.list_processes().await.unwrap();
        let mine = records.iter().find(|r| r.pid() == me).unwrap();
        assert!(mine.has_command());
    }

    #[tokio::test]
    async fn test_suspend_resume_terminate_real_process() {
        let platform = ProcfsPlatform::new();
        let pid = platform.spawn("sleep 30").await.unwrap();
        assert!(wait_for_state(pid, &['S', 'R']).await);

        platform.suspend(pid).await.unwrap();
        assert!(wait_for_state(pid, &['T']).await);
        // repeated suspend is accepted
        platform.suspend(pid).await.unwrap();

        platform.resume(pid).await.unwrap();
        assert!(wait_for_state(pid, &['S', 'R']).await);

        platform.terminate(pid).await.unwrap();
        // never reaped, so it lingers as a zombie
        assert!(wait_for_state(pid, &['Z']).await);
    }
}
