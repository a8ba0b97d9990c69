//! Configuration loading from YAML files
//!
//! Every key is optional; a missing file section falls back to the
//! defaults in `constants`.

use crate::constants::{files, process_table};
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Append-only audit log of kill/suspend/resume
    pub audit_log: PathBuf,

    /// Target of the CSV export, overwritten on each export
    pub export_file: PathBuf,

    /// Mount point of the process filesystem (Linux only)
    pub proc_root: PathBuf,

    /// Colored console output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audit_log: PathBuf::from(files::DEFAULT_AUDIT_LOG),
            export_file: PathBuf::from(files::DEFAULT_EXPORT_FILE),
            proc_root: PathBuf::from(process_table::DEFAULT_PROC_ROOT),
            color: true,
        }
    }
}

impl Config {
    /// Parse YAML text; an empty document yields the defaults
    pub fn from_yaml(contents: &str) -> Result<Self, DomainError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
            .map_err(|e| DomainError::InvalidConfiguration(format!("failed to parse YAML: {}", e)))
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, DomainError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DomainError::InvalidConfiguration(format!(
            "failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Config::from_yaml(&contents).map_err(|e| match e {
        DomainError::InvalidConfiguration(msg) => {
            DomainError::InvalidConfiguration(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}
