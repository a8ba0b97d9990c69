//! Console configuration
//!
//! Layers, lowest to highest precedence: built-in defaults, the YAML file
//! named by `--config` or `PROCCTL_CONFIG_FILE`, environment variables,
//! command-line flags (applied by `main`).

use procctl_engine::infrastructure::{load_config_from_path, Config};
use procctl_engine::DomainError;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_LEVEL: &str = "warn";

pub const CONFIG_FILE_VAR: &str = "PROCCTL_CONFIG_FILE";
pub const AUDIT_LOG_VAR: &str = "PROCCTL_AUDIT_LOG";
pub const EXPORT_FILE_VAR: &str = "PROCCTL_EXPORT_FILE";
pub const PROC_ROOT_VAR: &str = "PROCCTL_PROC_ROOT";
pub const NO_COLOR_VAR: &str = "PROCCTL_NO_COLOR";
pub const LOG_LEVEL_VAR: &str = "PROCCTL_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub engine: Config,

    /// File the engine settings were read from, if any
    pub config_file: Option<PathBuf>,
}

impl ConsoleConfig {
    pub fn load(config_flag: Option<&Path>) -> Result<Self, DomainError> {
        let config_file = config_flag
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_FILE_VAR).map(PathBuf::from));

        let mut engine = match &config_file {
            Some(path) => load_config_from_path(path)?,
            None => Config::default(),
        };
        Self::apply_env(&mut engine);

        Ok(Self {
            engine,
            config_file,
        })
    }

    fn apply_env(engine: &mut Config) {
        if let Some(path) = env::var_os(AUDIT_LOG_VAR) {
            engine.audit_log = PathBuf::from(path);
        }
        if let Some(path) = env::var_os(EXPORT_FILE_VAR) {
            engine.export_file = PathBuf::from(path);
        }
        if let Some(path) = env::var_os(PROC_ROOT_VAR) {
            engine.proc_root = PathBuf::from(path);
        }
        if parse_bool(NO_COLOR_VAR, false) {
            engine.color = false;
        }
    }
}

fn parse_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .and_then(|s| match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Priority: PROCCTL_LOG_LEVEL > RUST_LOG > default
pub fn log_level() -> String {
    env::var(LOG_LEVEL_VAR)
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}
