//! Application-wide constants and default values
//!
//! Centralizes magic strings and default paths for better maintainability

/// Process table defaults
pub mod process_table {
    /// Shown in place of a command line that is empty or unreadable
    pub const NO_COMMAND_PLACEHOLDER: &str = "[No command]";

    /// Default mount point of the Linux process filesystem
    pub const DEFAULT_PROC_ROOT: &str = "/proc";

    /// Message returned by `inspect` on platforms without a status surface
    pub const DETAILS_UNAVAILABLE: &str = "Process details are not available on this platform.";
}

/// Output file defaults
pub mod files {
    /// Append-only audit log of completed mutating actions
    pub const DEFAULT_AUDIT_LOG: &str = "process_manager.log";

    /// Snapshot export target
    pub const DEFAULT_EXPORT_FILE: &str = "processes.csv";

    /// Header line of the CSV export
    pub const CSV_HEADER: &str = "PID,CMD";

    /// ctime(3) layout used for audit timestamps
    pub const AUDIT_TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";
}

/// Shell used to run `start` command lines
pub mod shell {
    #[cfg(unix)]
    pub const PROGRAM: &str = "/bin/sh";
    #[cfg(unix)]
    pub const COMMAND_FLAG: &str = "-c";

    #[cfg(windows)]
    pub const PROGRAM: &str = "cmd";
    #[cfg(windows)]
    pub const COMMAND_FLAG: &str = "/C";
}
