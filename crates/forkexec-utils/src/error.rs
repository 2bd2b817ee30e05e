use std::fmt;

use forkexec_runner::RunnerError;
use forkexec_signals::SignalError;
use nix::errno::Errno;
use thiserror::Error;

use crate::exit_codes::ExitCode;

/// Top-level error type for the forkexec binaries.
///
/// Library code returns these and never exits; the CLI layer renders them with
/// [`display_for_user`](Self::display_for_user) and maps them through
/// [`to_exit_code`](Self::to_exit_code).
///
/// Exec failures are absent: they happen in the child and reach
/// the parent as exit status 127.
#[derive(Error, Debug)]
pub enum ForkExecError {
    #[error("Usage error: {reason}")]
    Usage { reason: String },

    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    ProcessCreation,
    StatusCollection,
    SignalHandling,
    Output,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "Usage"),
            Self::ProcessCreation => write!(f, "Process Creation"),
            Self::StatusCollection => write!(f, "Status Collection"),
            Self::SignalHandling => write!(f, "Signal Handling"),
            Self::Output => write!(f, "Output"),
        }
    }
}

impl UserFriendlyError for RunnerError {
    fn user_message(&self) -> String {
        match self {
            Self::InteriorNul { index } => {
                format!("Command argument {index} contains a NUL byte and cannot be executed")
            }
            Self::Fork { errno } => format!("Could not create a child process: {errno}"),
            Self::WaitInterrupted => "parent process interrupted".to_string(),
            Self::WaitFailure { errno } => {
                format!("waitpid error, errno = {}", *errno as i32)
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::WaitInterrupted => Some(
                "A signal reached the launcher while it was waiting for the child; the child was not signalled."
                    .to_string(),
            ),
            Self::WaitFailure { errno } => Some(errno.desc().to_string()),
            Self::Fork { .. } | Self::InteriorNul { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InteriorNul { .. } => {
                vec!["Remove NUL bytes from the command arguments".to_string()]
            }
            Self::Fork { errno } if *errno == Errno::EAGAIN => vec![
                "The process limit was reached; check `ulimit -u`".to_string(),
            ],
            Self::Fork { .. } => vec!["Check available memory and process limits".to_string()],
            Self::WaitInterrupted | Self::WaitFailure { .. } => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InteriorNul { .. } => ErrorCategory::Usage,
            Self::Fork { .. } => ErrorCategory::ProcessCreation,
            Self::WaitInterrupted | Self::WaitFailure { .. } => ErrorCategory::StatusCollection,
        }
    }
}

impl UserFriendlyError for SignalError {
    fn user_message(&self) -> String {
        self.to_string()
    }

    fn context(&self) -> Option<String> {
        self.errno().map(|errno| errno.desc().to_string())
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Install { .. } => {
                vec!["SIGKILL and SIGSTOP cannot be caught; omit --impossible-signals".to_string()]
            }
            Self::UnknownSignal { .. } => {
                vec!["Run `kill -l` to list the signal numbers of this platform".to_string()]
            }
            Self::Mask { .. } | Self::Suspend { .. } | Self::Send { .. } => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownSignal { .. } => ErrorCategory::Usage,
            _ => ErrorCategory::SignalHandling,
        }
    }
}

impl UserFriendlyError for ForkExecError {
    fn user_message(&self) -> String {
        match self {
            Self::Usage { reason } => reason.clone(),
            Self::Runner(err) => err.user_message(),
            Self::Signal(err) => err.user_message(),
            Self::Io(err) => format!("Could not write output: {err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Usage { .. } | Self::Io(_) => None,
            Self::Runner(err) => err.context(),
            Self::Signal(err) => err.context(),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Usage { .. } | Self::Io(_) => Vec::new(),
            Self::Runner(err) => err.suggestions(),
            Self::Signal(err) => err.suggestions(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage { .. } => ErrorCategory::Usage,
            Self::Runner(err) => err.category(),
            Self::Signal(err) => err.category(),
            Self::Io(_) => ErrorCategory::Output,
        }
    }
}

impl ForkExecError {
    pub fn usage(reason: impl Into<String>) -> Self {
        Self::Usage {
            reason: reason.into(),
        }
    }

    /// Get a user-friendly error message with context and actionable suggestions.
    ///
    /// ```text
    /// Error: <user message>
    ///
    /// Context: <context if available>
    ///
    /// Suggestions:
    ///   • <suggestion 1>
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the launcher's exit code.
    ///
    /// Every launcher-owned failure exits 1; 127 is reserved for what the
    /// child reports.
    ///
    /// ```rust
    /// use forkexec_utils::error::ForkExecError;
    /// use forkexec_utils::exit_codes::ExitCode;
    ///
    /// let err = ForkExecError::usage("missing executable");
    /// assert_eq!(err.to_exit_code(), ExitCode::FAILURE);
    /// ```
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Usage { .. } | Self::Runner(_) | Self::Signal(_) | Self::Io(_) => {
                ExitCode::FAILURE
            }
        }
    }
}
