//! Process Resolver
//! Maps an identifier to a live process by filtering a fresh enumeration

use crate::domain::services::ProcessTableReader;
use crate::domain::{DomainError, Pid, ProcessRecord};
use tracing::debug;

#[derive(Clone)]
pub struct ProcessResolver {
    reader: ProcessTableReader,
}

impl ProcessResolver {
    pub fn new(reader: ProcessTableReader) -> Self {
        Self { reader }
    }

    /// First record whose PID matches exactly, or `ProcessNotFound`
    pub async fn resolve(&self, pid: Pid) -> Result<ProcessRecord, DomainError> {
        let record = self
            .reader
            .list_processes()
            .await?
            .into_iter()
            .find(|record| record.pid() == pid);

        match record {
            Some(record) => Ok(record),
            None => {
                debug!(pid = pid.as_u32(), "PID not present in process table");
                Err(DomainError::ProcessNotFound(pid.as_u32()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockProcessPlatform;
    use std::sync::Arc;

    fn resolver(platform: MockProcessPlatform) -> ProcessResolver {
        ProcessResolver::new(ProcessTableReader::new(Arc::new(platform)))
    }

    fn pid(raw: u32) -> Pid {
        Pid::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_existing() {
        let resolver = resolver(
            MockProcessPlatform::new()
                .with_process(100, "sshd")
                .with_process(205, ""),
        );

        let record = resolver.resolve(pid(205)).await.unwrap();
        assert_eq!(record.pid(), pid(205));
        assert_eq!(record.command_line(), "[No command]");
    }

    #[tokio::test]
    async fn test_resolve_missing() {
        let resolver = resolver(MockProcessPlatform::new().with_process(100, "sshd"));

        assert_eq!(
            resolver.resolve(pid(999)).await,
            Err(DomainError::ProcessNotFound(999))
        );
    }

    #[tokio::test]
    async fn test_malformed_entry_never_resolves() {
        // a malformed id must never alias a real PID
        let resolver = resolver(MockProcessPlatform::new().with_raw_entry("1x00", Some("sshd")));

        assert_eq!(
            resolver.resolve(pid(100)).await,
            Err(DomainError::ProcessNotFound(100))
        );
    }

    #[tokio::test]
    async fn test_table_failure_propagates() {
        let resolver = resolver(MockProcessPlatform::new().with_unreadable_table());

        assert!(matches!(
            resolver.resolve(pid(1)).await,
            Err(DomainError::SystemFailure(_))
        ));
    }
}
