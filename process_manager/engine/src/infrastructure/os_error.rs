//! Mapping of OS errors onto the domain taxonomy

use crate::domain::{DomainError, Pid};
use std::io;

/// Classify an I/O error raised while acting on `pid`.
///
/// `ESRCH` and missing `/proc` entries mean the process is gone; `EPERM` and
/// `EACCES` are a refusal; everything else is a system failure.
pub fn classify(pid: Pid, operation: &str, err: io::Error) -> DomainError {
    #[cfg(unix)]
    {
        if err.raw_os_error() == Some(libc::ESRCH) {
            return DomainError::ProcessNotFound(pid.as_u32());
        }
    }

    match err.kind() {
        io::ErrorKind::NotFound => DomainError::ProcessNotFound(pid.as_u32()),
        io::ErrorKind::PermissionDenied => {
            DomainError::PermissionDenied(format!("cannot {} process {}: {}", operation, pid, err))
        }
        _ => DomainError::SystemFailure(format!("failed to {} process {}: {}", operation, pid, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid() -> Pid {
        Pid::new(321).unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_errno_mapping() {
        assert_eq!(
            classify(pid(), "kill", io::Error::from_raw_os_error(libc::ESRCH)),
            DomainError::ProcessNotFound(321)
        );
        assert!(matches!(
            classify(pid(), "kill", io::Error::from_raw_os_error(libc::EPERM)),
            DomainError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify(pid(), "inspect", io::Error::from_raw_os_error(libc::EACCES)),
            DomainError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify(pid(), "kill", io::Error::from_raw_os_error(libc::EINVAL)),
            DomainError::SystemFailure(_)
        ));
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            classify(pid(), "inspect", io::Error::from(io::ErrorKind::NotFound)),
            DomainError::ProcessNotFound(321)
        );
        let err = classify(pid(), "kill", io::Error::other("boom"));
        assert_eq!(
            err.to_string(),
            "System failure: failed to kill process 321: boom"
        );
    }
}
