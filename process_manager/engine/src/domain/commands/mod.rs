//! Console commands
//!
//! The eight operator actions and their validated arguments. Raw operator
//! text is turned into a `Command` here, so invalid input is rejected before
//! any OS call is attempted.

use crate::domain::{DomainError, Pid};
use std::fmt;

/// Action identifiers, numbered as in the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    List,
    Kill,
    Suspend,
    Resume,
    Details,
    Start,
    Export,
    Search,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::List,
        ActionKind::Kill,
        ActionKind::Suspend,
        ActionKind::Resume,
        ActionKind::Details,
        ActionKind::Start,
        ActionKind::Export,
        ActionKind::Search,
    ];

    pub fn from_menu_choice(choice: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.menu_choice() == choice)
    }

    pub fn menu_choice(&self) -> u32 {
        match self {
            ActionKind::List => 1,
            ActionKind::Kill => 2,
            ActionKind::Suspend => 3,
            ActionKind::Resume => 4,
            ActionKind::Details => 5,
            ActionKind::Start => 6,
            ActionKind::Export => 7,
            ActionKind::Search => 8,
        }
    }

    /// Menu entry text
    pub fn menu_label(&self) -> &'static str {
        match self {
            ActionKind::List => "List processes",
            ActionKind::Kill => "Kill a process",
            ActionKind::Suspend => "Suspend a process",
            ActionKind::Resume => "Resume a process",
            ActionKind::Details => "Show process details",
            ActionKind::Start => "Start a new process",
            ActionKind::Export => "Export processes to CSV",
            ActionKind::Search => "Search for a process",
        }
    }

    /// Prompt for the action's argument, if it takes one
    pub fn argument_prompt(&self) -> Option<&'static str> {
        match self {
            ActionKind::Kill => Some("Enter PID to kill: "),
            ActionKind::Suspend => Some("Enter PID to suspend: "),
            ActionKind::Resume => Some("Enter PID to resume: "),
            ActionKind::Details => Some("Enter PID to show details: "),
            ActionKind::Start => Some("Enter command to start a new process: "),
            ActionKind::Search => Some("Enter PID to search: "),
            ActionKind::List | ActionKind::Export => None,
        }
    }

    pub fn takes_argument(&self) -> bool {
        self.argument_prompt().is_some()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::List => "list",
            ActionKind::Kill => "kill",
            ActionKind::Suspend => "suspend",
            ActionKind::Resume => "resume",
            ActionKind::Details => "details",
            ActionKind::Start => "start",
            ActionKind::Export => "export",
            ActionKind::Search => "search",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutating lifecycle actions, the only ones that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    Terminate,
    Suspend,
    Resume,
}

impl LifecycleAction {
    /// `<action>` field of an audit log line
    pub fn audit_label(&self) -> &'static str {
        match self {
            LifecycleAction::Terminate => "Killed process",
            LifecycleAction::Suspend => "Suspended process",
            LifecycleAction::Resume => "Resumed process",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            LifecycleAction::Terminate => "killed",
            LifecycleAction::Suspend => "suspended",
            LifecycleAction::Resume => "resumed",
        }
    }
}

/// A validated operator request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Kill(Pid),
    Suspend(Pid),
    Resume(Pid),
    Details(Pid),
    Start(String),
    Export,
    Search(Pid),
}

impl Command {
    /// Build a command from an action and the operator's raw argument text.
    ///
    /// PID arguments must be positive integers; the start command line must
    /// not be blank. Argument-less actions ignore `argument`.
    pub fn parse(kind: ActionKind, argument: Option<&str>) -> Result<Self, DomainError> {
        let pid = || -> Result<Pid, DomainError> {
            argument
                .ok_or_else(|| DomainError::InvalidInput(format!("{} requires a PID", kind)))?
                .parse()
        };

        Ok(match kind {
            ActionKind::List => Command::List,
            ActionKind::Export => Command::Export,
            ActionKind::Kill => Command::Kill(pid()?),
            ActionKind::Suspend => Command::Suspend(pid()?),
            ActionKind::Resume => Command::Resume(pid()?),
            ActionKind::Details => Command::Details(pid()?),
            ActionKind::Search => Command::Search(pid()?),
            ActionKind::Start => {
                let command_line = argument.map(str::trim).unwrap_or_default();
                if command_line.is_empty() {
                    return Err(DomainError::InvalidInput(
                        "command line must not be empty".to_string(),
                    ));
                }
                Command::Start(command_line.to_string())
            }
        })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Command::List => ActionKind::List,
            Command::Kill(_) => ActionKind::Kill,
            Command::Suspend(_) => ActionKind::Suspend,
            Command::Resume(_) => ActionKind::Resume,
            Command::Details(_) => ActionKind::Details,
            Command::Start(_) => ActionKind::Start,
            Command::Export => ActionKind::Export,
            Command::Search(_) => ActionKind::Search,
        }
    }

    pub fn lifecycle_action(&self) -> Option<(LifecycleAction, Pid)> {
        match self {
            Command::Kill(pid) => Some((LifecycleAction::Terminate, *pid)),
            Command::Suspend(pid) => Some((LifecycleAction::Suspend, *pid)),
            Command::Resume(pid) => Some((LifecycleAction::Resume, *pid)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_numbering() {
        for (index, kind) in ActionKind::ALL.iter().enumerate() {
            assert_eq!(kind.menu_choice(), index as u32 + 1);
            assert_eq!(ActionKind::from_menu_choice(index as u32 + 1), Some(*kind));
        }
        assert_eq!(ActionKind::from_menu_choice(0), None);
        assert_eq!(ActionKind::from_menu_choice(9), None);
    }

    #[test]
    fn test_parse_pid_commands() {
        let cmd = Command::parse(ActionKind::Kill, Some("100")).unwrap();
        assert_eq!(cmd, Command::Kill(Pid::new(100).unwrap()));
        assert_eq!(cmd.kind(), ActionKind::Kill);
        assert_eq!(
            cmd.lifecycle_action(),
            Some((LifecycleAction::Terminate, Pid::new(100).unwrap()))
        );

        assert!(matches!(
            Command::parse(ActionKind::Suspend, Some("abc")),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            Command::parse(ActionKind::Search, None),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            Command::parse(ActionKind::Resume, Some("-1")),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_start() {
        assert_eq!(
            Command::parse(ActionKind::Start, Some("  echo hi \n")).unwrap(),
            Command::Start("echo hi".to_string())
        );
        assert!(matches!(
            Command::parse(ActionKind::Start, Some("   ")),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            Command::parse(ActionKind::Start, None),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_argument_less_actions() {
        assert_eq!(Command::parse(ActionKind::List, None).unwrap(), Command::List);
        assert_eq!(
            Command::parse(ActionKind::Export, Some("ignored")).unwrap(),
            Command::Export
        );
        assert!(!ActionKind::List.takes_argument());
        assert!(ActionKind::Start.takes_argument());
        assert_eq!(Command::List.lifecycle_action(), None);
    }

    #[test]
    fn test_audit_labels() {
        assert_eq!(LifecycleAction::Terminate.audit_label(), "Killed process");
        assert_eq!(LifecycleAction::Suspend.audit_label(), "Suspended process");
        assert_eq!(LifecycleAction::Resume.audit_label(), "Resumed process");
    }
}
