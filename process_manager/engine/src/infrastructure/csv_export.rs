//! CSV export of a process-table snapshot
//!
//! Layout: a `PID,CMD` header, then one `<id>,<cmdline>` line per record.
//! Command lines are written unquoted, so readers split on the first comma
//! only.

use crate::constants::files::CSV_HEADER;
use crate::domain::{DomainError, Pid, ProcessRecord};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn write_csv<W: Write>(records: &[ProcessRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for record in records {
        writeln!(out, "{}", record.csv_line())?;
    }
    out.flush()
}

/// Parse an export back into `(pid, command line)` pairs
pub fn parse_csv(contents: &str) -> Result<Vec<(Pid, String)>, DomainError> {
    let mut lines = contents.lines();
    match lines.next() {
        Some(header) if header == CSV_HEADER => {}
        other => {
            return Err(DomainError::InvalidInput(format!(
                "expected '{}' header, found {:?}",
                CSV_HEADER, other
            )))
        }
    }

    lines
        .enumerate()
        .map(|(index, line)| {
            let (id, command_line) = line.split_once(',').ok_or_else(|| {
                DomainError::InvalidInput(format!("line {}: missing ',' separator", index + 2))
            })?;
            let pid = id
                .parse::<Pid>()
                .map_err(|e| DomainError::InvalidInput(format!("line {}: {}", index + 2, e)))?;
            Ok((pid, command_line.to_string()))
        })
        .collect()
}

pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the export file with `records`; returns the row count
    pub fn export(&self, records: &[ProcessRecord]) -> Result<usize, DomainError> {
        File::create(&self.path)
            .and_then(|file| write_csv(records, BufWriter::new(file)))
            .map_err(|e| {
                DomainError::SystemFailure(format!(
                    "failed to write CSV file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        info!(path = %self.path.display(), rows = records.len(), "Processes exported");
        Ok(records.len())
    }
}
