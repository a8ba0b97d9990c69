//! ProcessRecord value object
//! Point-in-time snapshot of one process-table entry

use crate::constants::process_table::NO_COMMAND_PLACEHOLDER;
use crate::domain::Pid;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pid: Pid,
    command_line: String,
}

impl ProcessRecord {
    /// Build a record from a raw command-line artifact.
    ///
    /// NUL argument separators become spaces, trailing NULs and line
    /// terminators are trimmed, and an empty or missing command line is
    /// replaced by `[No command]`. Interior line breaks are flattened so
    /// each record always renders as a single line.
    pub fn new(pid: Pid, raw_command_line: Option<&str>) -> Self {
        let command_line = raw_command_line
            .map(normalize_command_line)
            .filter(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| NO_COMMAND_PLACEHOLDER.to_string());

        Self { pid, command_line }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn has_command(&self) -> bool {
        self.command_line != NO_COMMAND_PLACEHOLDER
    }

    /// `<id>\t<cmdline>`
    pub fn display_line(&self) -> String {
        format!("{}\t{}", self.pid, self.command_line)
    }

    /// `<id>,<cmdline>`
    pub fn csv_line(&self) -> String {
        format!("{},{}", self.pid, self.command_line)
    }
}

impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID {}, CMD: {}", self.pid, self.command_line)
    }
}

fn normalize_command_line(raw: &str) -> String {
    raw.trim_end_matches(['\0', '\n', '\r'])
        .chars()
        .map(|c| match c {
            '\0' | '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}
