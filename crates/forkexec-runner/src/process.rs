use std::fmt;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::error::RunnerError;
use crate::launcher::EXEC_FAILURE_STATUS;

// ============================================================================
// ChildWaiter Trait - Status Collection Interface
// ============================================================================

/// Source of wait results for a specific child.
///
/// The production implementation is [`NixWaiter`], a blocking `waitpid` with no
/// flags. Tests substitute scripted results to drive the interrupted and
/// spurious-return paths that a real kernel does not produce on demand.
pub trait ChildWaiter {
    /// Block until the kernel reports a state change for `child`.
    fn wait_for(&mut self, child: Pid) -> nix::Result<WaitStatus>;
}

/// Blocking `waitpid(child, 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NixWaiter;

impl ChildWaiter for NixWaiter {
    fn wait_for(&mut self, child: Pid) -> nix::Result<WaitStatus> {
        waitpid(child, None)
    }
}

// ============================================================================
// ChildTermination - Decoded Termination Status
// ============================================================================

/// How the child ended, decoded from its wait status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildTermination {
    /// Normal exit with the given code
    Exited(i32),
    /// Killed by an uncaught signal
    Signaled(Signal),
    /// A state the blocking wait is not configured to report (stopped,
    /// continued, ptrace stops). Kept so callers can still log it.
    Unreported(WaitStatus),
}

impl ChildTermination {
    /// Decode a wait status already known to belong to the child.
    #[must_use]
    pub fn from_status(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(_, code) => Self::Exited(code),
            WaitStatus::Signaled(_, signal, _) => Self::Signaled(signal),
            other => Self::Unreported(other),
        }
    }

    /// Exit status the launcher propagates for this termination.
    ///
    /// | Termination | Code |
    /// |-------------|------|
    /// | `Exited(n)` | `n` |
    /// | `Signaled(_)` | 127 |
    /// | `Unreported(_)` | 0 |
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Exited(code) => *code,
            Self::Signaled(_) => EXEC_FAILURE_STATUS,
            Self::Unreported(_) => 0,
        }
    }

    /// Diagnostic line printed in verbose mode, if this termination has one.
    #[must_use]
    pub fn verbose_line(&self) -> Option<String> {
        match self {
            Self::Exited(code) => Some(format!(
                "child process finished normally, exit code = {code}"
            )),
            Self::Signaled(signal) => Some(format!(
                "child process killed by signal, signal = {}",
                *signal as i32
            )),
            Self::Unreported(_) => None,
        }
    }
}

impl fmt::Display for ChildTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with code {code}"),
            Self::Signaled(signal) => {
                write!(f, "killed by signal {} ({})", *signal as i32, signal.as_str())
            }
            Self::Unreported(status) => write!(f, "reported unexpected status {status:?}"),
        }
    }
}

// ============================================================================
// Wait Loop
// ============================================================================

/// Wait for `child` to terminate and decode its status.
///
/// Results that do not carry the child's pid are logged and the wait is
/// retried without bound. `EINTR` is terminal (no retry), as is any other
/// `waitpid` failure.
///
/// # Errors
///
/// * [`RunnerError::WaitInterrupted`] - the caller was signalled while blocked
/// * [`RunnerError::WaitFailure`] - any other `waitpid` failure
pub fn collect_termination<W>(waiter: &mut W, child: Pid) -> Result<ChildTermination, RunnerError>
where
    W: ChildWaiter + ?Sized,
{
    loop {
        match waiter.wait_for(child) {
            Ok(status) if status.pid() == Some(child) => {
                let termination = ChildTermination::from_status(status);
                if let ChildTermination::Unreported(status) = termination {
                    warn!(%child, ?status, "child reported a state that is not a termination");
                } else {
                    debug!(%child, %termination, "child terminated");
                }
                return Ok(termination);
            }
            Ok(status) => {
                warn!(%child, ?status, errno = Errno::last_raw(), "waitpid returned a non-matching status, retrying");
            }
            Err(Errno::EINTR) => return Err(RunnerError::WaitInterrupted),
            Err(errno) => return Err(RunnerError::WaitFailure { errno }),
        }
    }
}
