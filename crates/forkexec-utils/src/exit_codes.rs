//! Exit code constants for the forkexec launcher.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Child exited 0, or its status fell through unmatched |
//! | 1 | `FAILURE` | Usage error, fork failure, wait interrupted or failed |
//! | 127 | `EXEC_FAILED` | Child could not exec, or was killed by a signal |
//! | n | - | Any other normal child exit code is propagated as-is |

use forkexec_runner::{ChildTermination, EXEC_FAILURE_STATUS};

/// Process exit code of the launcher.
///
/// Use the named constants for launcher-owned failures and
/// [`From<ChildTermination>`] for codes derived from the child.
///
/// ```rust
/// use forkexec_utils::exit_codes::ExitCode;
/// use forkexec_runner::ChildTermination;
///
/// assert_eq!(ExitCode::from(ChildTermination::Exited(3)).as_i32(), 3);
/// assert_eq!(ExitCode::FAILURE.as_i32(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - the child exited 0
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Launcher failure - usage error or fork/wait failure
    pub const FAILURE: ExitCode = ExitCode(1);

    /// The child could not exec, or was killed by an uncaught signal
    pub const EXEC_FAILED: ExitCode = ExitCode(EXEC_FAILURE_STATUS);

    /// Get the numeric exit code value.
    ///
    /// Use this with `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl From<ChildTermination> for ExitCode {
    fn from(termination: ChildTermination) -> Self {
        ExitCode(termination.exit_code())
    }
}
