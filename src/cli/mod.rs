//! Command-line interfaces for forkexec
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions and parsing structures (clap)
//! - `run`: Entry points and dispatch for the three binaries
//! - `tests`: Test module (cfg(test) only)

pub mod args;
mod run;


// Re-export argument types
pub use args::{
    Cli, PauseSignalCli, SendSignalCli, SendSignalOptions, USAGE, build_cli, parse_invocation,
};

// Re-export run functions
pub use run::{launch, run, run_from, run_pause_signal, run_send_signal};
