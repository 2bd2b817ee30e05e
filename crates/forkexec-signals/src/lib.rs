//! One-shot POSIX signal handling
//!
//! Installs a recording handler with `sigaction`, blocks until exactly one
//! delivery arrives, and reports which signal it was. Sending goes through
//! `kill(2)`.
//!
//! Handlers never print: the handler stores the signal number in an atomic
//! and the caller reports it once the wait returns.

pub mod catalog;
pub mod error;
pub mod gate;
pub mod handler;
pub mod send;

pub use catalog::{DEMO_SIGNALS, catchable_signals, legend_lines, signal_from_number};
pub use error::SignalError;
pub use gate::{PauseOutcome, SignalGate};
pub use handler::{install_recording_handler, take_delivered};
pub use send::send_signal;

pub use nix::sys::signal::Signal;
