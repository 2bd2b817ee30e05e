use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use tracing::debug;

use crate::error::SignalError;

/// Send `signal` to `pid`; `None` only checks that the process exists.
///
/// # Errors
///
/// Returns [`SignalError::Send`] with the errno from `kill(2)`.
pub fn send_signal(pid: Pid, signal: Option<Signal>) -> Result<(), SignalError> {
    debug!(%pid, signal = signal.map_or("probe", Signal::as_str), "sending signal");
    kill(pid, signal).map_err(|errno| SignalError::Send { errno })
}
