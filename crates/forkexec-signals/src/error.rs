//! Error types for signal handling

use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("sigaction failed for signal {signal}: {errno}")]
    Install { signal: i32, errno: Errno },

    #[error("failed to change the signal mask: {errno}")]
    Mask { errno: Errno },

    #[error("sigsuspend failed: {errno}")]
    Suspend { errno: Errno },

    #[error("unknown signal number {number}")]
    UnknownSignal { number: i32 },

    #[error("kill failed: {errno}")]
    Send { errno: Errno },
}

impl SignalError {
    /// Raw errno carried by the error, if any.
    #[must_use]
    pub const fn errno(&self) -> Option<Errno> {
        match self {
            Self::Install { errno, .. }
            | Self::Mask { errno }
            | Self::Suspend { errno }
            | Self::Send { errno } => {
                Some(*errno)
            }
            Self::UnknownSignal { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspend_failure_carries_errno() {
        let err = SignalError::Suspend {
            errno: Errno::EFAULT,
        };
        assert_eq!(err.errno(), Some(Errno::EFAULT));
        assert!(err.to_string().starts_with("sigsuspend failed: "));
        assert_eq!(SignalError::UnknownSignal { number: 99 }.errno(), None);
    }
}
