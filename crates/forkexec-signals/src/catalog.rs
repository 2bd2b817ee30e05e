//! The signals the demonstrations report on.

use nix::sys::signal::Signal;

use crate::error::SignalError;

/// Signals shown in the legend, in the order handlers are installed.
///
/// `SIGKILL` is listed for reference; the kernel refuses handlers for it.
pub const DEMO_SIGNALS: [Signal; 8] = [
    Signal::SIGHUP,
    Signal::SIGILL,
    Signal::SIGINT,
    Signal::SIGKILL,
    Signal::SIGPIPE,
    Signal::SIGSEGV,
    Signal::SIGTERM,
    Signal::SIGWINCH,
];

/// Legend lines, one per demo signal: `  SIGHUP = 1`.
#[must_use]
pub fn legend_lines() -> Vec<String> {
    DEMO_SIGNALS
        .iter()
        .map(|signal| format!("  {} = {}", signal.as_str(), *signal as i32))
        .collect()
}

/// Demo signals a handler is requested for.
///
/// With `include_uncatchable` the list keeps `SIGKILL`, so the attempt to
/// install a handler for it can be observed failing.
#[must_use]
pub fn catchable_signals(include_uncatchable: bool) -> Vec<Signal> {
    DEMO_SIGNALS
        .iter()
        .copied()
        .filter(|signal| include_uncatchable || !matches!(signal, Signal::SIGKILL | Signal::SIGSTOP))
        .collect()
}

/// Map a raw signal number to a signal; `0` is the existence probe (`None`).
///
/// # Errors
///
/// Returns [`SignalError::UnknownSignal`] for numbers the platform does not
/// define.
pub fn signal_from_number(number: i32) -> Result<Option<Signal>, SignalError> {
    if number == 0 {
        return Ok(None);
    }
    Signal::try_from(number)
        .map(Some)
        .map_err(|_| SignalError::UnknownSignal { number })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_lists_every_demo_signal() {
        let lines = legend_lines();
        assert_eq!(lines.len(), DEMO_SIGNALS.len());
        assert_eq!(lines[0], format!("  SIGHUP = {}", libc::SIGHUP));
        assert!(lines.contains(&format!("  SIGTERM = {}", libc::SIGTERM)));
        assert!(lines.contains(&format!("  SIGWINCH = {}", libc::SIGWINCH)));
    }

    #[test]
    fn test_catchable_signals_skip_sigkill_by_default() {
        let signals = catchable_signals(false);
        assert!(!signals.contains(&Signal::SIGKILL));
        assert_eq!(signals.len(), DEMO_SIGNALS.len() - 1);
        assert!(catchable_signals(true).contains(&Signal::SIGKILL));
    }

    #[test]
    fn test_signal_from_number() {
        assert_eq!(signal_from_number(0), Ok(None));
        assert_eq!(signal_from_number(libc::SIGTERM), Ok(Some(Signal::SIGTERM)));
        assert_eq!(
            signal_from_number(-3),
            Err(SignalError::UnknownSignal { number: -3 })
        );
    }
}
