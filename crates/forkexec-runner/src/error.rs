//! Error types for the runner crate

use nix::errno::Errno;
use thiserror::Error;

/// Failures observed by the launching (parent) process.
///
/// Exec failures never appear here: they happen inside the child, which exits
/// with [`EXEC_FAILURE_STATUS`](crate::EXEC_FAILURE_STATUS) and is reported to
/// the parent through the ordinary termination status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    #[error("command argument {index} contains an interior NUL byte")]
    InteriorNul { index: usize },

    #[error("fork failed: {errno}")]
    Fork { errno: Errno },

    #[error("parent process interrupted")]
    WaitInterrupted,

    #[error("waitpid error, errno = {}", raw_errno(.errno))]
    WaitFailure { errno: Errno },
}

fn raw_errno(errno: &Errno) -> i32 {
    *errno as i32
}

impl RunnerError {
    /// Raw errno carried by the error, if any.
    #[must_use]
    pub const fn errno(&self) -> Option<Errno> {
        match self {
            Self::Fork { errno } | Self::WaitFailure { errno } => Some(*errno),
            Self::WaitInterrupted => Some(Errno::EINTR),
            Self::InteriorNul { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_failure_reports_raw_errno() {
        let err = RunnerError::WaitFailure {
            errno: Errno::ECHILD,
        };
        assert_eq!(
            err.to_string(),
            format!("waitpid error, errno = {}", libc::ECHILD)
        );
        assert_eq!(err.errno(), Some(Errno::ECHILD));
    }

    #[test]
    fn test_interrupted_message() {
        assert_eq!(
            RunnerError::WaitInterrupted.to_string(),
            "parent process interrupted"
        );
    }

    #[test]
    fn test_interior_nul_has_no_errno() {
        let err = RunnerError::InteriorNul { index: 2 };
        assert!(err.to_string().contains("argument 2"));
        assert!(err.errno().is_none());
    }
}
