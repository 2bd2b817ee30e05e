use std::ffi::CString;
use std::io::Write;
use std::os::raw::c_char;
use std::ptr;

use nix::errno::Errno;
use nix::unistd::{ForkResult, Pid, fork, write};
use tracing::debug;

use crate::command_spec::CommandSpec;
use crate::error::RunnerError;
use crate::types::PathResolution;

/// Exit status of a child whose image could not be replaced.
///
/// Shell convention for "command could not be executed".
pub const EXEC_FAILURE_STATUS: i32 = 127;

/// Terminate the calling process immediately with `status`.
///
/// Skips atexit handlers and stdio flushing, so it is the only way a forked
/// child may leave without touching state it shares with the parent.
pub fn exit_immediately(status: i32) -> ! {
    // SAFETY: _exit(2) is async-signal-safe and never returns.
    unsafe { libc::_exit(status) }
}

/// Forks a child and replaces its image with a target command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Launcher {
    resolution: PathResolution,
}

impl Launcher {
    #[must_use]
    pub const fn new(resolution: PathResolution) -> Self {
        Self { resolution }
    }

    #[must_use]
    pub const fn resolution(&self) -> PathResolution {
        self.resolution
    }

    /// Fork a child that execs `cmd`, returning the child's pid to the parent.
    ///
    /// Never returns in the child: it either becomes the target program or
    /// exits with [`EXEC_FAILURE_STATUS`].
    ///
    /// # Errors
    ///
    /// * [`RunnerError::InteriorNul`] - an argv element cannot be passed to exec
    /// * [`RunnerError::Fork`] - the kernel refused to create the process
    pub fn spawn(&self, cmd: &CommandSpec) -> Result<Pid, RunnerError> {
        let argv = cmd.to_exec_argv()?;
        let argv_ptrs: Vec<*const c_char> = argv
            .iter()
            .map(|element| element.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();
        let failure_prefix = format!("exec failed: {}: ", cmd.program.to_string_lossy());

        debug!(
            command = %cmd.display(),
            resolution = self.resolution.as_str(),
            "forking child"
        );

        // Buffered output would otherwise be written twice, once per process.
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();

        // SAFETY: the child only calls execv(2)/execvp(3), write(2) and
        // _exit(2) on buffers built before the fork, and never allocates.
        match unsafe { fork() } {
            Ok(ForkResult::Parent { child }) => {
                debug!(%child, "forked child");
                Ok(child)
            }
            Ok(ForkResult::Child) => {
                exec_child(&argv, &argv_ptrs, self.resolution, failure_prefix.as_bytes())
            }
            Err(errno) => Err(RunnerError::Fork { errno }),
        }
    }
}

/// Child half of [`Launcher::spawn`].
///
/// `argv_ptrs` points into `argv` and is NULL-terminated.
fn exec_child(
    argv: &[CString],
    argv_ptrs: &[*const c_char],
    resolution: PathResolution,
    failure_prefix: &[u8],
) -> ! {
    let errno = match argv.first() {
        Some(program) => {
            // SAFETY: both pointers reference NUL-terminated strings owned by
            // `argv`, and `argv_ptrs` ends with a null pointer.
            let _ = unsafe {
                match resolution {
                    PathResolution::Search => libc::execvp(program.as_ptr(), argv_ptrs.as_ptr()),
                    PathResolution::Literal => libc::execv(program.as_ptr(), argv_ptrs.as_ptr()),
                }
            };
            // exec only returns on failure
            Errno::last()
        }
        None => Errno::EINVAL,
    };

    let stderr = std::io::stderr();
    let _ = write(&stderr, failure_prefix);
    let _ = write(&stderr, errno.desc().as_bytes());
    let _ = write(&stderr, b"\n");
    exit_immediately(EXEC_FAILURE_STATUS)
}
