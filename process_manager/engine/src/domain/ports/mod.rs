pub mod audit_sink;
pub mod mock_audit_sink;
pub mod mock_platform;
pub mod process_platform;

pub use audit_sink::AuditSink;
pub use mock_audit_sink::MockAuditSink;
pub use mock_platform::MockProcessPlatform;
pub use process_platform::{ProcessDetails, ProcessPlatform, RawProcessEntry};
