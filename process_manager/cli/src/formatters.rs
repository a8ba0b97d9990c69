//! Output formatting utilities

use colored::*;
use procctl_engine::ProcessRecord;

const LISTING_HEADER: &str = "PID\tCMD";
const LISTING_RULE: &str = "--------------------------------------";

/// Console styling; with color off every helper returns plain text
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, paint: fn(&str) -> ColoredString) -> String {
        if self.color {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().blue())
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    pub fn emphasis(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }
}

/// Render the process table as `<id>\t<cmdline>` lines under a header
pub fn format_listing(style: &Style, records: &[ProcessRecord]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&style.heading(LISTING_HEADER));
    out.push('\n');
    out.push_str(LISTING_RULE);
    out.push('\n');
    for record in records {
        out.push_str(&style.success(&record.display_line()));
        out.push('\n');
    }
    out
}

/// Verbatim status report, newline-terminated
pub fn format_details(style: &Style, pid: impl std::fmt::Display, report: &str) -> String {
    let mut out = style.emphasis(&format!("Details for PID {}:", pid));
    out.push('\n');
    out.push_str(report);
    if !report.ends_with('\n') {
        out.push('\n');
    }
    out
}
