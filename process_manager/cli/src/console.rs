//! Interactive console
//!
//! Drives the dispatcher from a numbered menu, renders every reply as
//! operator text, and owns the two side effects the engine leaves to its
//! caller: the audit log and the CSV export.

use crate::formatters::{format_details, format_listing, Style};
use procctl_engine::domain::ports::AuditSink;
use procctl_engine::infrastructure::CsvExporter;
use procctl_engine::{ActionKind, Command, CommandDispatcher, DomainError, LifecycleAction, Reply};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

const MENU_TITLE: &str = "Process Manager";
const EXIT_CHOICE: u32 = 9;
const CHOICE_PROMPT: &str = "Enter your choice: ";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

pub struct Console<W: Write> {
    dispatcher: CommandDispatcher,
    audit: Arc<dyn AuditSink>,
    exporter: CsvExporter,
    style: Style,
    output: W,
}

impl<W: Write> Console<W> {
    pub fn new(
        dispatcher: CommandDispatcher,
        audit: Arc<dyn AuditSink>,
        exporter: CsvExporter,
        style: Style,
        output: W,
    ) -> Self {
        Self {
            dispatcher,
            audit,
            exporter,
            style,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Menu loop; returns on the exit choice or end of input
    pub async fn run<R>(&mut self, mut input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt(&mut input, CHOICE_PROMPT).await? else {
                break;
            };

            let kind = match choice.trim().parse::<u32>() {
                Ok(EXIT_CHOICE) => break,
                Ok(n) => ActionKind::from_menu_choice(n),
                Err(_) => None,
            };
            let Some(kind) = kind else {
                writeln!(self.output, "{}", INVALID_CHOICE)?;
                continue;
            };

            let argument = match kind.argument_prompt() {
                Some(prompt) => match self.prompt(&mut input, prompt).await? {
                    Some(line) => Some(line),
                    None => break,
                },
                None => None,
            };

            self.submit(kind, argument.as_deref()).await?;
        }

        debug!("Console loop finished");
        Ok(())
    }

    /// Validate operator text and execute it; false when the action failed
    pub async fn submit(&mut self, kind: ActionKind, argument: Option<&str>) -> io::Result<bool> {
        match Command::parse(kind, argument) {
            Ok(command) => self.execute(command).await,
            Err(error) => {
                self.report_failure(kind, &error)?;
                Ok(false)
            }
        }
    }

    pub async fn execute(&mut self, command: Command) -> io::Result<bool> {
        let reply = self.dispatcher.dispatch(command).await;

        if let Some(action) = reply.completed_mutation() {
            if let Err(e) = self.audit.record(action) {
                warn!(error = %e, "Audit entry not written");
                writeln!(self.output, "{}", self.style.failure(&format!("Warning: {}", e)))?;
            }
        }

        self.render(reply)
    }

    fn render(&mut self, reply: Reply) -> io::Result<bool> {
        match reply {
            Reply::Listing(records) => {
                write!(self.output, "{}", format_listing(&self.style, &records))?;
            }
            Reply::Snapshot(records) => match self.exporter.export(&records) {
                Ok(_) => {
                    let message =
                        format!("Processes exported to {}", self.exporter.path().display());
                    writeln!(self.output, "{}", self.style.success(&message))?;
                }
                Err(error) => {
                    self.report_failure(ActionKind::Export, &error)?;
                    return Ok(false);
                }
            },
            Reply::Lifecycle {
                action,
                pid,
                outcome,
            } => match outcome.error() {
                None => {
                    let message = format!("Process {} {}.", pid, action.past_tense());
                    writeln!(self.output, "{}", self.style.success(&message))?;
                }
                Some(error) => {
                    let message = format!("Failed to {} process {}: {}", verb(action), pid, error);
                    writeln!(self.output, "{}", self.style.failure(&message))?;
                    return Ok(false);
                }
            },
            Reply::Details { pid, report } => {
                write!(self.output, "{}", format_details(&self.style, pid, &report))?;
            }
            Reply::Started(pid) => {
                let message = format!("Started process {}", pid);
                writeln!(self.output, "{}", self.style.success(&message))?;
            }
            Reply::Found(record) => {
                writeln!(self.output, "Found process: {}", record)?;
            }
            Reply::Failed { action, error } => {
                self.report_failure(action, &error)?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn report_failure(&mut self, kind: ActionKind, error: &DomainError) -> io::Result<()> {
        debug!(action = %kind, error = %error, "Action failed");
        let message = format!("Error: {}: {}", kind, error);
        writeln!(self.output, "{}", self.style.failure(&message))
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.style.heading(MENU_TITLE))?;
        for kind in ActionKind::ALL {
            writeln!(self.output, "{}. {}", kind.menu_choice(), kind.menu_label())?;
        }
        writeln!(self.output, "{}. Exit", EXIT_CHOICE)
    }

    /// Print `prompt` and read one line; `None` at end of input
    async fn prompt<R>(&mut self, input: &mut R, prompt: &str) -> io::Result<Option<String>>
    where
        R: AsyncBufRead + Unpin,
    {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

fn verb(action: LifecycleAction) -> &'static str {
    match action {
        LifecycleAction::Terminate => "kill",
        LifecycleAction::Suspend => "suspend",
        LifecycleAction::Resume => "resume",
    }
}
