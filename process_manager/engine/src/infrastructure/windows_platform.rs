//! Windows process platform
//!
//! - Enumeration: Toolhelp process snapshot (executable name as command line)
//! - Suspend/resume: every thread owned by the process, so the whole process
//!   pauses rather than a single thread
//! - Termination: `TerminateProcess`
//! - No per-process status surface; `inspect` reports `Unsupported`

use crate::constants::shell;
use crate::domain::ports::{ProcessDetails, ProcessPlatform, RawProcessEntry};
use crate::domain::{DomainError, Pid};
use async_trait::async_trait;
use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};
use tracing::{debug, error, warn};
use windows::Win32::Foundation::{
    CloseHandle, ERROR_ACCESS_DENIED, ERROR_INVALID_PARAMETER, HANDLE,
};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, Thread32First, Thread32Next,
    PROCESSENTRY32W, TH32CS_SNAPPROCESS, TH32CS_SNAPTHREAD, THREADENTRY32,
};
use windows::Win32::System::Threading::{
    OpenProcess, OpenThread, ResumeThread, SuspendThread, TerminateProcess,
    CREATE_NEW_PROCESS_GROUP, PROCESS_TERMINATE, THREAD_SUSPEND_RESUME,
};

/// Closes the wrapped handle on drop
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

#[derive(Clone, Copy)]
enum ThreadOp {
    Suspend,
    Resume,
}

fn classify(pid: Pid, operation: &str, err: windows::core::Error) -> DomainError {
    let code = err.code();
    if code == ERROR_INVALID_PARAMETER.to_hresult() {
        // OpenProcess/OpenThread report a vanished id this way
        DomainError::ProcessNotFound(pid.as_u32())
    } else if code == ERROR_ACCESS_DENIED.to_hresult() {
        DomainError::PermissionDenied(format!("cannot {} process {}: {}", operation, pid, err))
    } else {
        DomainError::SystemFailure(format!("failed to {} process {}: {}", operation, pid, err))
    }
}

fn utf16_until_nul(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

#[derive(Default)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        Self
    }

    /// Ids of every thread owned by `pid`
    fn thread_ids(pid: Pid) -> Result<Vec<u32>, DomainError> {
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPTHREAD, 0)
                .map(OwnedHandle)
                .map_err(|e| DomainError::SystemFailure(format!("thread snapshot failed: {}", e)))?;

            let mut entry = THREADENTRY32 {
                dwSize: std::mem::size_of::<THREADENTRY32>() as u32,
                ..Default::default()
            };

            let mut ids = Vec::new();
            if Thread32First(snapshot.0, &mut entry).is_ok() {
                loop {
                    if entry.th32OwnerProcessID == pid.as_u32() {
                        ids.push(entry.th32ThreadID);
                    }
                    if Thread32Next(snapshot.0, &mut entry).is_err() {
                        break;
                    }
                }
            }
            Ok(ids)
        }
    }

    fn open_thread(pid: Pid, tid: u32, operation: &str) -> Result<Option<OwnedHandle>, DomainError> {
        match unsafe { OpenThread(THREAD_SUSPEND_RESUME, false, tid) } {
            Ok(handle) => Ok(Some(OwnedHandle(handle))),
            Err(e) if e.code() == ERROR_INVALID_PARAMETER.to_hresult() => {
                // thread exited since the snapshot
                debug!(pid = pid.as_u32(), tid = tid, "Thread vanished");
                Ok(None)
            }
            Err(e) => Err(classify(pid, operation, e)),
        }
    }

    /// Suspend count before the call, or the last OS error
    fn adjust(thread: &OwnedHandle, op: ThreadOp) -> Result<u32, windows::core::Error> {
        let previous = unsafe {
            match op {
                ThreadOp::Suspend => SuspendThread(thread.0),
                ThreadOp::Resume => ResumeThread(thread.0),
            }
        };
        if previous == u32::MAX {
            Err(windows::core::Error::from_win32())
        } else {
            Ok(previous)
        }
    }

    /// Bring every thread of `pid` to a suspend count of exactly 1 (suspend)
    /// or 0 (resume), so repeating either is a no-op. If a thread fails
    /// part way, the threads already changed are put back before the error
    /// is returned.
    fn for_each_thread(pid: Pid, op: ThreadOp) -> Result<(), DomainError> {
        let (operation, undo) = match op {
            ThreadOp::Suspend => ("suspend", ThreadOp::Resume),
            ThreadOp::Resume => ("resume", ThreadOp::Suspend),
        };

        let ids = Self::thread_ids(pid)?;
        if ids.is_empty() {
            return Err(DomainError::ProcessNotFound(pid.as_u32()));
        }

        let mut changed: Vec<OwnedHandle> = Vec::new();
        let result = ids.into_iter().try_for_each(|tid| {
            let Some(thread) = Self::open_thread(pid, tid, operation)? else {
                return Ok(());
            };
            let step = |thread: &OwnedHandle| -> Result<bool, windows::core::Error> {
                match op {
                    ThreadOp::Suspend => {
                        if Self::adjust(thread, ThreadOp::Suspend)? > 0 {
                            // already suspended: keep its count at 1
                            Self::adjust(thread, ThreadOp::Resume)?;
                            return Ok(false);
                        }
                        Ok(true)
                    }
                    ThreadOp::Resume => {
                        let mut resumed = false;
                        while Self::adjust(thread, ThreadOp::Resume)? > 0 {
                            resumed = true;
                        }
                        Ok(resumed)
                    }
                }
            };
            match step(&thread) {
                Ok(true) => {
                    changed.push(thread);
                    Ok(())
                }
                Ok(false) => Ok(()),
                Err(e) => {
                    warn!(pid = pid.as_u32(), tid = tid, error = %e, "Thread {} failed", operation);
                    Err(classify(pid, operation, e))
                }
            }
        });

        if result.is_err() {
            for thread in &changed {
                if let Err(e) = Self::adjust(thread, undo) {
                    warn!(pid = pid.as_u32(), error = %e, "Rollback of thread {} failed", operation);
                }
            }
        }
        result
    }
}

#[async_trait]
impl ProcessPlatform for WindowsPlatform {
    async fn enumerate(&self) -> Result<Vec<RawProcessEntry>, DomainError> {
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
                .map(OwnedHandle)
                .map_err(|e| {
                    error!(error = %e, "Cannot open process table");
                    DomainError::SystemFailure(format!("cannot open process table: {}", e))
                })?;

            let mut entry = PROCESSENTRY32W {
                dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            };

            let mut entries = Vec::new();
            if Process32FirstW(snapshot.0, &mut entry).is_ok() {
                loop {
                    entries.push(RawProcessEntry::new(
                        entry.th32ProcessID.to_string(),
                        Some(utf16_until_nul(&entry.szExeFile)),
                    ));
                    if Process32NextW(snapshot.0, &mut entry).is_err() {
                        break;
                    }
                }
            }
            Ok(entries)
        }
    }

    async fn terminate(&self, pid: Pid) -> Result<(), DomainError> {
        unsafe {
            let process = OpenProcess(PROCESS_TERMINATE, false, pid.as_u32())
                .map(OwnedHandle)
                .map_err(|e| classify(pid, "kill", e))?;

            TerminateProcess(process.0, 1).map_err(|e| classify(pid, "kill", e))?;
        }
        debug!(pid = pid.as_u32(), "Process terminated");
        Ok(())
    }

    async fn suspend(&self, pid: Pid) -> Result<(), DomainError> {
        Self::for_each_thread(pid, ThreadOp::Suspend)
    }

    async fn resume(&self, pid: Pid) -> Result<(), DomainError> {
        Self::for_each_thread(pid, ThreadOp::Resume)
    }

    async fn inspect(&self, _pid: Pid) -> Result<ProcessDetails, DomainError> {
        Ok(ProcessDetails::Unsupported)
    }

    async fn spawn(&self, command_line: &str) -> Result<Pid, DomainError> {
        let mut cmd = Command::new(shell::PROGRAM);
        cmd.arg(shell::COMMAND_FLAG).raw_arg(command_line);
        cmd.stdin(Stdio::null());
        cmd.creation_flags(CREATE_NEW_PROCESS_GROUP.0);

        let child = cmd.spawn().map_err(|e| {
            error!(command = %command_line, error = %e, "Failed to spawn process");
            DomainError::SystemFailure(format!("failed to start '{}': {}", command_line, e))
        })?;

        Pid::new(child.id()).ok_or_else(|| {
            DomainError::SystemFailure(format!("OS returned invalid PID {}", child.id()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_until_nul() {
        let mut buffer = [0u16; 16];
        for (slot, unit) in buffer.iter_mut().zip("sshd.exe".encode_utf16()) {
            *slot = unit;
        }
        assert_eq!(utf16_until_nul(&buffer), "sshd.exe");
    }

    /// Suspend count of every thread of `pid`, read without changing it
    fn suspend_counts(pid: Pid) -> Vec<u32> {
        WindowsPlatform::thread_ids(pid)
            .unwrap()
            .into_iter()
            .filter_map(|tid| WindowsPlatform::open_thread(pid, tid, "check").unwrap())
            .map(|thread| {
                let previous = WindowsPlatform::adjust(&thread, ThreadOp::Suspend).unwrap();
                WindowsPlatform::adjust(&thread, ThreadOp::Resume).unwrap();
                previous
            })
            .collect()
    }

    #[tokio::test]
    async fn test_repeated_suspend_and_resume_are_idempotent() {
        let platform = WindowsPlatform::new();
        let pid = platform.spawn("ping -n 30 127.0.0.1 >NUL").await.unwrap();

        platform.suspend(pid).await.unwrap();
        platform.suspend(pid).await.unwrap();
        let counts = suspend_counts(pid);
        assert!(!counts.is_empty());
        assert!(counts.iter().all(|&c| c == 1), "counts {:?}", counts);

        platform.resume(pid).await.unwrap();
        assert!(suspend_counts(pid).iter().all(|&c| c == 0));

        platform.resume(pid).await.unwrap();
        assert!(suspend_counts(pid).iter().all(|&c| c == 0));

        platform.terminate(pid).await.unwrap();
    }

    #[tokio::test]
    async fn test_enumerate_contains_self() {
        let platform = WindowsPlatform::new();
        let entries = platform.enumerate().await.unwrap();
        let me = std::process::id().to_string();
        assert!(entries.iter().any(|e| e.id == me));
    }
}
