//! Shared helpers for end-to-end tests
//!
//! Every run gets its own working directory, so the default audit log and
//! export file never collide between tests running in parallel.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_procctl"));
        cmd.current_dir(self.path())
            .env_remove("PROCCTL_CONFIG_FILE")
            .env_remove("PROCCTL_AUDIT_LOG")
            .env_remove("PROCCTL_EXPORT_FILE")
            .env_remove("PROCCTL_PROC_ROOT")
            .env_remove("PROCCTL_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .env("PROCCTL_NO_COLOR", "1");
        cmd
    }

    /// Run a one-shot action
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .stdin(Stdio::null())
            .output()
            .expect("run procctl")
    }

    /// Drive the interactive menu with `input` on stdin
    pub fn interactive(&self, input: &str) -> Output {
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn procctl");
        child
            .stdin
            .take()
            .expect("stdin piped")
            .write_all(input.as_bytes())
            .expect("write menu input");
        child.wait_with_output().expect("wait for procctl")
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).unwrap_or_default()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// PID printed by `start`
pub fn started_pid(output: &Output) -> u32 {
    let text = stdout(output);
    text.lines()
        .find_map(|line| line.strip_prefix("Started process "))
        .and_then(|pid| pid.trim().parse().ok())
        .unwrap_or_else(|| panic!("no started pid in output: {}", text))
}

/// Single-letter state from `/proc/<pid>/stat`
pub fn process_state(pid: u32) -> Option<char> {
    let stat = fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
    stat.rsplit_once(") ")?.1.chars().next()
}

/// Poll until the process state satisfies `predicate`
pub fn wait_for_state(pid: u32, predicate: impl Fn(Option<char>) -> bool) -> bool {
    for _ in 0..50 {
        if predicate(process_state(pid)) {
            return true;
        }
        sleep(Duration::from_millis(20));
    }
    false
}

/// Kills a process started by a test when the guard drops
pub struct ProcessGuard(pub u32);

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        let _ = Command::new("kill")
            .args(["-9", &self.0.to_string()])
            .stderr(Stdio::null())
            .status();
    }
}
