//! Pid value object
//! OS-assigned process identifier, always a positive integer

use crate::domain::DomainError;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Largest identifier accepted; values above it would turn negative when
/// handed to `kill(2)` and address a process group instead of a process.
pub const MAX_PID: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(NonZeroU32);

impl Pid {
    /// Returns `None` for zero and for values above `MAX_PID`
    pub fn new(raw: u32) -> Option<Self> {
        if raw > MAX_PID {
            return None;
        }
        NonZeroU32::new(raw).map(Self)
    }

    /// Strict parse used for process-table entries: canonical decimal only,
    /// so no sign, no surrounding whitespace and no leading zero. An entry
    /// like `0100` must not alias process 100.
    pub fn from_table_entry(raw: &str) -> Option<Self> {
        if raw.starts_with('0') {
            return None;
        }
        Self::from_digits(raw)
    }

    fn from_digits(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse::<u32>().ok().and_then(Self::new)
    }

    pub fn as_u32(&self) -> u32 {
        self.0.get()
    }

    #[cfg(unix)]
    pub fn as_raw(&self) -> libc::pid_t {
        // MAX_PID guarantees the value fits
        self.0.get() as libc::pid_t
    }
}

impl FromStr for Pid {
    type Err = DomainError;

    /// Parse operator input; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput("PID must not be empty".to_string()));
        }
        Self::from_digits(trimmed).ok_or_else(|| {
            DomainError::InvalidInput(format!("'{}' is not a valid PID", trimmed))
        })
    }
}

impl TryFrom<u32> for Pid {
    type Error = DomainError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| DomainError::InvalidInput(format!("{} is not a valid PID", raw)))
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Pid> for u32 {
    fn from(pid: Pid) -> Self {
        pid.as_u32()
    }
}
