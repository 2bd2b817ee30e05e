use std::io::Write;

use nix::errno::Errno;

use forkexec_signals::{PauseOutcome, Signal, SignalGate, install_recording_handler};
use forkexec_utils::error::ForkExecError;

/// Catch exactly one SIGINT and report it to `out`.
///
/// SIGINT is blocked before the handler is installed and only unblocked
/// inside the wait, so a signal sent as soon as `PAUSING...` appears (or
/// earlier) is never lost.
///
/// # Errors
///
/// Mask, handler installation or suspend failures, and write failures on
/// `out`.
pub fn run<W: Write + ?Sized>(out: &mut W) -> Result<PauseOutcome, ForkExecError> {
    let gate = SignalGate::close(&[Signal::SIGINT])?;
    install_recording_handler(Signal::SIGINT)?;

    writeln!(out, "PAUSING...")?;
    out.flush()?;

    let outcome = gate.pause_until_delivery()?;
    if let Some(signal) = outcome.signal {
        writeln!(out, "signal handler: signal = {signal}")?;
    }
    writeln!(out, "pause returned -1, errno = {}", outcome.errno as i32)?;
    writeln!(out, "  (EINTR = {})", Errno::EINTR as i32)?;
    out.flush()?;

    Ok(outcome)
}
