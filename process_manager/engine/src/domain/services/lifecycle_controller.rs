//! Lifecycle Controller
//!
//! One atomic request per action against the platform. There are no retries
//! and no intermediate states: every failure is classified and reported once.

use crate::constants::process_table::DETAILS_UNAVAILABLE;
use crate::domain::ports::{ProcessDetails, ProcessPlatform};
use crate::domain::{ActionOutcome, DomainError, LifecycleAction, Pid};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct LifecycleController {
    platform: Arc<dyn ProcessPlatform>,
}

impl LifecycleController {
    pub fn new(platform: Arc<dyn ProcessPlatform>) -> Self {
        Self { platform }
    }

    pub async fn terminate(&self, pid: Pid) -> ActionOutcome {
        self.apply(LifecycleAction::Terminate, pid).await
    }

    /// Repeating a suspend is accepted as a no-op success
    pub async fn suspend(&self, pid: Pid) -> ActionOutcome {
        self.apply(LifecycleAction::Suspend, pid).await
    }

    /// Resuming a process that is not suspended is a no-op success
    pub async fn resume(&self, pid: Pid) -> ActionOutcome {
        self.apply(LifecycleAction::Resume, pid).await
    }

    pub async fn apply(&self, action: LifecycleAction, pid: Pid) -> ActionOutcome {
        let result = match action {
            LifecycleAction::Terminate => self.platform.terminate(pid).await,
            LifecycleAction::Suspend => self.platform.suspend(pid).await,
            LifecycleAction::Resume => self.platform.resume(pid).await,
        };

        match &result {
            Ok(()) => info!(pid = pid.as_u32(), action = ?action, "Process {}", action.past_tense()),
            Err(e) => warn!(
                pid = pid.as_u32(),
                action = ?action,
                error = %e,
                kind = %e.kind(),
                "Lifecycle action failed"
            ),
        }
        ActionOutcome::from(result)
    }

    /// Multi-line status report, passed through verbatim. Platforms without
    /// a metadata surface yield a fixed notice instead of an error.
    pub async fn inspect(&self, pid: Pid) -> Result<String, DomainError> {
        match self.platform.inspect(pid).await? {
            ProcessDetails::Report(report) => Ok(report),
            ProcessDetails::Unsupported => Ok(DETAILS_UNAVAILABLE.to_string()),
        }
    }

    /// Launch `command_line` through the shell without waiting for it.
    ///
    /// The child is never reaped by this controller.
    pub async fn start(&self, command_line: &str) -> Result<Pid, DomainError> {
        let command_line = command_line.trim();
        if command_line.is_empty() {
            return Err(DomainError::InvalidInput(
                "command line must not be empty".to_string(),
            ));
        }

        let pid = self.platform.spawn(command_line).await.map_err(|e| {
            warn!(command = %command_line, error = %e, "Failed to start process");
            e
        })?;
        info!(pid = pid.as_u32(), command = %command_line, "Process started");
        Ok(pid)
    }
}
