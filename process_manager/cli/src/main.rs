mod config;
mod console;
mod formatters;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::ConsoleConfig;
use console::Console;
use formatters::Style;
use procctl_engine::infrastructure::{native_platform, CsvExporter, FileAuditLog};
use procctl_engine::{ActionKind, CommandDispatcher};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Interactive process-management console
#[derive(Debug, Parser)]
#[command(name = "procctl", version, about)]
struct Cli {
    /// YAML configuration file (overrides PROCCTL_CONFIG_FILE)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append-only log of kill/suspend/resume actions
    #[arg(long, value_name = "FILE")]
    audit_log: Option<PathBuf>,

    /// Target of the CSV export
    #[arg(long, value_name = "FILE")]
    export_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Run a single action and exit instead of opening the menu
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List running processes
    List,
    /// Kill a process
    Kill { pid: String },
    /// Suspend a process
    Suspend { pid: String },
    /// Resume a suspended process
    Resume { pid: String },
    /// Show the status report of a process
    Details { pid: String },
    /// Start a shell command line in the background
    Start {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Export the process table to CSV
    Export,
    /// Look up a process by PID
    Search { pid: String },
}

impl Action {
    fn into_request(self) -> (ActionKind, Option<String>) {
        match self {
            Action::List => (ActionKind::List, None),
            Action::Kill { pid } => (ActionKind::Kill, Some(pid)),
            Action::Suspend { pid } => (ActionKind::Suspend, Some(pid)),
            Action::Resume { pid } => (ActionKind::Resume, Some(pid)),
            Action::Details { pid } => (ActionKind::Details, Some(pid)),
            Action::Start { command } => (ActionKind::Start, Some(command.join(" "))),
            Action::Export => (ActionKind::Export, None),
            Action::Search { pid } => (ActionKind::Search, Some(pid)),
        }
    }
}

fn init_tracing() {
    // stderr keeps the menu on stdout clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config::log_level()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ConsoleConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(path) = cli.audit_log {
        config.engine.audit_log = path;
    }
    if let Some(path) = cli.export_file {
        config.engine.export_file = path;
    }
    if cli.no_color {
        config.engine.color = false;
    }
    if !config.engine.color {
        colored::control::set_override(false);
    }
    debug!(config = ?config, "Configuration loaded");

    let engine = &config.engine;
    let mut console = Console::new(
        CommandDispatcher::new(native_platform(engine)),
        Arc::new(FileAuditLog::new(&engine.audit_log)),
        CsvExporter::new(&engine.export_file),
        Style::new(engine.color),
        io::stdout(),
    );

    match cli.action {
        Some(action) => {
            let (kind, argument) = action.into_request();
            info!(action = %kind, "Running one-shot action");
            let succeeded = console.submit(kind, argument.as_deref()).await?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            console.run(stdin).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_action_opens_menu() {
        let cli = Cli::try_parse_from(["procctl", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.action.is_none());
    }

    #[test]
    fn test_start_joins_words() {
        let cli = Cli::try_parse_from(["procctl", "start", "sleep", "30", "-v"]).unwrap();
        let (kind, argument) = cli.action.unwrap().into_request();
        assert_eq!(kind, ActionKind::Start);
        assert_eq!(argument.as_deref(), Some("sleep 30 -v"));
    }

    #[test]
    fn test_pid_passed_through_unvalidated() {
        let cli = Cli::try_parse_from(["procctl", "kill", "abc"]).unwrap();
        assert_eq!(
            cli.action.unwrap().into_request(),
            (ActionKind::Kill, Some("abc".to_string()))
        );
    }

    #[test]
    fn test_start_requires_command() {
        assert!(Cli::try_parse_from(["procctl", "start"]).is_err());
    }
}
