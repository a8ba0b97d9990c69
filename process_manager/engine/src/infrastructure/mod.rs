//! Infrastructure Layer
//!
//! This module contains the adapters that implement the ports defined in the domain layer.
//!
//! ## Adapters
//!
//! - `ProcfsPlatform`: process table read from `/proc` (Linux)
//! - `PsPlatform`: process table read from `ps` (other Unix)
//! - `WindowsPlatform`: Toolhelp snapshots and thread suspension (Windows)
//! - `FileAuditLog`: append-only audit log
//! - `CsvExporter`: snapshot export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use procctl_engine::application::CommandDispatcher;
//! use procctl_engine::infrastructure::{native_platform, Config};
//!
//! let platform = native_platform(&Config::default());
//! let dispatcher = CommandDispatcher::new(platform);
//! ```

pub mod audit_log;
pub mod config;
pub mod csv_export;
#[cfg(unix)]
pub mod os_error;

#[cfg(target_os = "linux")]
pub mod procfs_platform;
#[cfg(unix)]
pub mod ps_platform;
#[cfg(unix)]
pub mod unix_process;
#[cfg(windows)]
pub mod windows_platform;

pub use audit_log::FileAuditLog;
pub use config::{load_config_from_path, Config};
pub use csv_export::CsvExporter;

#[cfg(target_os = "linux")]
pub use procfs_platform::ProcfsPlatform;
#[cfg(unix)]
pub use ps_platform::PsPlatform;
#[cfg(windows)]
pub use windows_platform::WindowsPlatform;

use crate::domain::ports::ProcessPlatform;
use std::sync::Arc;

/// Platform adapter for the host OS
#[cfg(target_os = "linux")]
pub fn native_platform(config: &Config) -> Arc<dyn ProcessPlatform> {
    Arc::new(ProcfsPlatform::with_root(config.proc_root.clone()))
}

#[cfg(all(unix, not(target_os = "linux")))]
pub fn native_platform(_config: &Config) -> Arc<dyn ProcessPlatform> {
    Arc::new(PsPlatform::new())
}

#[cfg(windows)]
pub fn native_platform(_config: &Config) -> Arc<dyn ProcessPlatform> {
    Arc::new(WindowsPlatform::new())
}
