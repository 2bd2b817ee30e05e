//! forkexec - fork/exec/wait launcher and POSIX signal demonstrations
//!
//! The `forkexec` binary forks a child, replaces the child's image with a
//! target program, waits for it, and exits with a status derived from the
//! child's:
//!
//! ```bash
//! forkexec --verbose ls -l /tmp     # exits with ls's status
//! forkexec --no-path ./tool arg     # no PATH search for ./tool
//! ```
//!
//! Two companion binaries demonstrate signal handling:
//!
//! - `pause-signal` installs a SIGINT handler and blocks until it runs.
//! - `send-signal` forks a child that catches a set of signals and sends it one.
//!
//! The process and signal primitives live in the `forkexec-runner` and
//! `forkexec-signals` crates; exit codes, error reporting and logging live in
//! `forkexec-utils`.

pub mod cli;
pub mod demos;

pub use forkexec_runner::{ChildTermination, CommandSpec, LaunchOptions, PathResolution};
pub use forkexec_utils::error::ForkExecError;
pub use forkexec_utils::exit_codes::ExitCode;
