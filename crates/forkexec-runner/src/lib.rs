//! Child process launching for the forkexec launcher
//!
//! Provides the fork/exec primitives and the wait-status state machine used by
//! the `forkexec` binary and the signal demonstrations.
//!
//! # Lifecycle
//!
//! 1. A [`CommandSpec`] is converted to NUL-terminated argv strings before forking.
//! 2. [`Launcher::spawn`] forks; the child replaces its image with `execvp` or
//!    `execv` depending on [`PathResolution`], or exits with
//!    [`EXEC_FAILURE_STATUS`] through [`exit_immediately`].
//! 3. [`collect_termination`] blocks in `waitpid` until the child's own status
//!    is observed and decodes it into a [`ChildTermination`].

pub mod command_spec;
pub mod error;
pub mod launcher;
pub mod process;
pub mod types;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use launcher::{EXEC_FAILURE_STATUS, Launcher, exit_immediately};
pub use process::{ChildTermination, ChildWaiter, NixWaiter, collect_termination};
pub use types::{LaunchOptions, PathResolution};

pub use nix::unistd::Pid;
