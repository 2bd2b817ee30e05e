use std::ffi::c_int;
use std::sync::atomic::{AtomicI32, Ordering};

use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use tracing::debug;

use crate::error::SignalError;

/// Number of the most recently caught signal, 0 when none is pending report.
static DELIVERED: AtomicI32 = AtomicI32::new(0);

extern "C" fn record_delivery(signal: c_int) {
    DELIVERED.store(signal, Ordering::SeqCst);
}

/// Install the recording handler for `signal` (empty mask, no flags).
///
/// # Errors
///
/// Returns [`SignalError::Install`] when the kernel rejects the handler, as it
/// does for `SIGKILL` and `SIGSTOP`.
pub fn install_recording_handler(signal: Signal) -> Result<(), SignalError> {
    let action = SigAction::new(
        SigHandler::Handler(record_delivery),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler only performs an atomic store.
    unsafe { sigaction(signal, &action) }.map_err(|errno| SignalError::Install {
        signal: signal as i32,
        errno,
    })?;
    debug!(signal = signal.as_str(), "installed recording handler");
    Ok(())
}

/// Take the number of the last caught signal, clearing it.
pub fn take_delivered() -> Option<i32> {
    match DELIVERED.swap(0, Ordering::SeqCst) {
        0 => None,
        signal => Some(signal),
    }
}
