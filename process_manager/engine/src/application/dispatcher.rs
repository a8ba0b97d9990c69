//! Command Dispatcher
//!
//! Routes a validated `Command` to the reader, resolver or controller and
//! turns every result, failures included, into a `Reply`. It holds no state
//! and performs no I/O of its own: auditing and CSV serialization belong to
//! whoever drives the dispatcher.

use crate::domain::services::{LifecycleController, ProcessResolver, ProcessTableReader};
use crate::domain::ports::ProcessPlatform;
use crate::domain::{
    ActionKind, ActionOutcome, Command, DomainError, LifecycleAction, Pid, ProcessRecord,
};
use std::sync::Arc;
use tracing::debug;

/// What the dispatcher hands back to the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Listing(Vec<ProcessRecord>),
    /// Snapshot to be exported by the caller
    Snapshot(Vec<ProcessRecord>),
    Lifecycle {
        action: LifecycleAction,
        pid: Pid,
        outcome: ActionOutcome,
    },
    Details {
        pid: Pid,
        report: String,
    },
    Started(Pid),
    Found(ProcessRecord),
    Failed {
        action: ActionKind,
        error: DomainError,
    },
}

impl Reply {
    pub fn is_success(&self) -> bool {
        match self {
            Reply::Lifecycle { outcome, .. } => outcome.succeeded(),
            Reply::Failed { .. } => false,
            _ => true,
        }
    }

    /// The mutating action that completed, if any; these are the replies
    /// that get an audit log entry
    pub fn completed_mutation(&self) -> Option<LifecycleAction> {
        match self {
            Reply::Lifecycle {
                action, outcome, ..
            } if outcome.succeeded() => Some(*action),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DomainError> {
        match self {
            Reply::Lifecycle { outcome, .. } => outcome.error(),
            Reply::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct CommandDispatcher {
    reader: ProcessTableReader,
    resolver: ProcessResolver,
    controller: LifecycleController,
}

impl CommandDispatcher {
    pub fn new(platform: Arc<dyn ProcessPlatform>) -> Self {
        let reader = ProcessTableReader::new(platform.clone());
        Self {
            resolver: ProcessResolver::new(reader.clone()),
            controller: LifecycleController::new(platform),
            reader,
        }
    }

    pub async fn dispatch(&self, command: Command) -> Reply {
        let kind = command.kind();
        debug!(action = %kind, "Dispatching command");

        let result = match command {
            Command::List => self.reader.list_processes().await.map(Reply::Listing),
            Command::Export => self.reader.list_processes().await.map(Reply::Snapshot),
            Command::Search(pid) => self.resolver.resolve(pid).await.map(Reply::Found),
            Command::Kill(pid) => Ok(self.lifecycle(LifecycleAction::Terminate, pid).await),
            Command::Suspend(pid) => Ok(self.lifecycle(LifecycleAction::Suspend, pid).await),
            Command::Resume(pid) => Ok(self.lifecycle(LifecycleAction::Resume, pid).await),
            Command::Details(pid) => self.details(pid).await,
            Command::Start(command_line) => {
                self.controller.start(&command_line).await.map(Reply::Started)
            }
        };

        result.unwrap_or_else(|error| Reply::Failed {
            action: kind,
            error,
        })
    }

    /// Resolve first, then act. The process may still vanish in between;
    /// the platform reports that as `ProcessNotFound` too.
    async fn lifecycle(&self, action: LifecycleAction, pid: Pid) -> Reply {
        let outcome = match self.resolver.resolve(pid).await {
            Ok(_) => self.controller.apply(action, pid).await,
            Err(e) => ActionOutcome::failure(e),
        };
        Reply::Lifecycle {
            action,
            pid,
            outcome,
        }
    }

    async fn details(&self, pid: Pid) -> Result<Reply, DomainError> {
        self.resolver.resolve(pid).await?;
        let report = self.controller.inspect(pid).await?;
        Ok(Reply::Details { pid, report })
    }
}
