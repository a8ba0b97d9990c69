//! Signal delivery and shell spawning shared by the Unix platforms

use crate::constants::shell;
use crate::domain::{DomainError, Pid};
use crate::infrastructure::os_error;
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use tracing::{debug, error, warn};

/// Deliver `signal` to exactly one process
pub fn send_signal(pid: Pid, signal: libc::c_int, operation: &str) -> Result<(), DomainError> {
    let result = unsafe { libc::kill(pid.as_raw(), signal) };
    if result != 0 {
        let err = io::Error::last_os_error();
        warn!(
            pid = pid.as_u32(),
            signal = signal,
            error = %err,
            "Failed to send signal to process"
        );
        return Err(os_error::classify(pid, operation, err));
    }
    debug!(pid = pid.as_u32(), signal = signal, "Signal sent successfully");
    Ok(())
}

/// Run `command_line` under `/bin/sh -c` in its own session.
///
/// The `Child` handle is dropped without waiting: the process outlives this
/// call and is never reaped here.
pub fn spawn_shell(command_line: &str) -> Result<Pid, DomainError> {
    let mut cmd = Command::new(shell::PROGRAM);
    cmd.arg(shell::COMMAND_FLAG).arg(command_line);
    cmd.stdin(Stdio::null());

    unsafe {
        cmd.pre_exec(|| {
            // new session: terminal signals aimed at the console must not
            // reach the child
            if libc::setsid() < 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }

    let child = cmd.spawn().map_err(|e| {
        error!(command = %command_line, error = %e, "Failed to spawn process");
        DomainError::SystemFailure(format!("failed to start '{}': {}", command_line, e))
    })?;

    Pid::new(child.id()).ok_or_else(|| {
        DomainError::SystemFailure(format!("OS returned invalid PID {}", child.id()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_to_missing_process() {
        // far above any kernel's PID limit
        let pid = Pid::new(i32::MAX as u32).unwrap();
        assert_eq!(
            send_signal(pid, 0, "check"),
            Err(DomainError::ProcessNotFound(i32::MAX as u32))
        );
    }

    #[test]
    fn test_signal_zero_to_self() {
        let pid = Pid::new(std::process::id()).unwrap();
        assert!(send_signal(pid, 0, "check").is_ok());
    }

    #[test]
    fn test_spawned_child_leads_its_own_session() {
        let pid = spawn_shell("sleep 2").unwrap();
        let session = unsafe { libc::getsid(pid.as_raw()) };
        let _ = send_signal(pid, libc::SIGKILL, "kill");

        assert_eq!(session, pid.as_raw());
        assert_ne!(session, unsafe { libc::getsid(0) });
    }

    #[test]
    fn test_spawn_shell_returns_immediately() {
        let started = std::time::Instant::now();
        let pid = spawn_shell("sleep 2").unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
        assert_ne!(pid.as_u32(), std::process::id());
        let _ = send_signal(pid, libc::SIGKILL, "kill");
    }
}
