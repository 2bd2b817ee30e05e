use nix::errno::Errno;
use nix::sys::signal::{SigSet, SigmaskHow, Signal};

use crate::error::SignalError;
use crate::handler::take_delivered;

/// Result of waiting for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseOutcome {
    /// Signal caught by the recording handler
    pub signal: Option<i32>,
    /// errno reported by the interrupted wait, always `EINTR`
    pub errno: Errno,
}

/// Keeps a set of signals blocked so deliveries stay pending until
/// [`pause_until_delivery`](Self::pause_until_delivery).
///
/// Blocking before handlers are installed (and, for a child, before forking)
/// means a signal sent early is never lost to the default action or to the
/// gap between installing a handler and calling `pause`. The previous mask is
/// restored on drop.
#[derive(Debug)]
pub struct SignalGate {
    previous: SigSet,
}

impl SignalGate {
    /// Block `signals` for the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Mask`] if the mask cannot be changed.
    pub fn close(signals: &[Signal]) -> Result<Self, SignalError> {
        let mut set = SigSet::empty();
        for signal in signals {
            set.add(*signal);
        }
        let previous = set
            .thread_swap_mask(SigmaskHow::SIG_BLOCK)
            .map_err(|errno| SignalError::Mask { errno })?;
        Ok(Self { previous })
    }

    /// Sleep until a signal is caught, with the pre-gate mask in effect.
    ///
    /// Restoring the mask and sleeping happen atomically (`sigsuspend`), so a
    /// signal already pending is handled immediately. The gate is closed again
    /// once this returns.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Suspend`] if `sigsuspend` fails for any reason
    /// other than a caught signal.
    pub fn pause_until_delivery(&self) -> Result<PauseOutcome, SignalError> {
        self.previous
            .suspend()
            .map_err(|errno| SignalError::Suspend { errno })?;
        Ok(PauseOutcome {
            signal: take_delivered(),
            errno: Errno::EINTR,
        })
    }
}

impl Drop for SignalGate {
    fn drop(&mut self) {
        let _ = self.previous.thread_set_mask();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::install_recording_handler;
    use nix::sys::signal::raise;

    #[test]
    fn test_pending_signal_is_caught_after_gate_opens() {
        install_recording_handler(Signal::SIGUSR1).unwrap();
        let gate = SignalGate::close(&[Signal::SIGUSR1]).unwrap();

        // Pending while blocked: the handler has not run yet.
        raise(Signal::SIGUSR1).unwrap();
        assert_eq!(take_delivered(), None);

        let outcome = gate.pause_until_delivery().unwrap();
        assert_eq!(outcome.signal, Some(libc::SIGUSR1));
        assert_eq!(outcome.errno, Errno::EINTR);
    }
}
