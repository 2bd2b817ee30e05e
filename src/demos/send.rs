use std::io::Write;
use std::thread;

use nix::errno::Errno;
use nix::unistd::{ForkResult, fork};
use tracing::debug;

use forkexec_runner::{
    ChildTermination, EXEC_FAILURE_STATUS, NixWaiter, RunnerError, collect_termination,
    exit_immediately,
};
use forkexec_signals::{
    Signal, SignalGate, catchable_signals, install_recording_handler, legend_lines, send_signal,
};
use forkexec_utils::error::ForkExecError;

use crate::cli::SendSignalOptions;

/// Fork a child that catches the demo signals, send it `options.signal`, and
/// report how it ended.
///
/// The handled signals are blocked before forking, so the child inherits them
/// blocked and a signal sent before its handlers are in place stays pending.
/// When the requested signal is not one the child catches (the probe, or a
/// signal whose default action is to ignore or stop), the parent follows up
/// with SIGKILL so the wait always completes.
///
/// # Errors
///
/// Mask, fork and wait failures. A failed `kill` is reported on standard
/// output and is not an error.
pub fn run(options: &SendSignalOptions) -> Result<ChildTermination, ForkExecError> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "SIGNAL VALUES")?;
    for line in legend_lines() {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;

    let handled = catchable_signals(options.impossible_signals);
    let gate = SignalGate::close(&handled)?;

    // SAFETY: the binary is single-threaded; the child only installs
    // handlers, writes to stdout and leaves through exit_immediately.
    let child = match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => child,
        Ok(ForkResult::Child) => child_main(&gate, &handled),
        Err(errno) => return Err(RunnerError::Fork { errno }.into()),
    };
    drop(gate);

    thread::sleep(options.delay);
    let number = options.signal.map_or(0, |signal| signal as i32);
    writeln!(stdout, "PARENT: Sending signal {number} to child (pid = {child})")?;
    stdout.flush()?;
    if let Err(err) = send_signal(child, options.signal) {
        let errno = err.errno().map_or(0, |errno| errno as i32);
        writeln!(stdout, "PARENT: kill failed: errno = {errno}")?;
    }

    let caught = options.signal.is_some_and(|signal| handled.contains(&signal));
    if !caught {
        debug!(%child, "requested signal is not caught by the child, following up with SIGKILL");
        let _ = send_signal(child, Some(Signal::SIGKILL));
    }

    let termination = collect_termination(&mut NixWaiter, child)?;
    writeln!(stdout, "PARENT: child {termination}")?;
    stdout.flush()?;
    Ok(termination)
}

/// Child half of [`run`]: install handlers, wait for one signal, exit.
fn child_main(gate: &SignalGate, handled: &[Signal]) -> ! {
    let mut stdout = std::io::stdout();

    for signal in handled {
        match install_recording_handler(*signal) {
            Ok(()) => {
                let _ = writeln!(stdout, "sigaction signal = {} OK", *signal as i32);
            }
            Err(err) => {
                let errno = err.errno().map_or(0, |errno| errno as i32);
                let _ = stdout.flush();
                eprintln!("ERROR sigaction: signal = {}, errno = {errno}", *signal as i32);
                exit_immediately(EXEC_FAILURE_STATUS);
            }
        }
    }

    let _ = writeln!(stdout, "CHILD: pausing...");
    let _ = stdout.flush();

    let outcome = match gate.pause_until_delivery() {
        Ok(outcome) => outcome,
        Err(err) => {
            let _ = stdout.flush();
            eprintln!("CHILD: {err}");
            exit_immediately(EXEC_FAILURE_STATUS);
        }
    };
    if let Some(signal) = outcome.signal {
        let _ = writeln!(stdout, "CHILD: signal handler: signal = {signal}");
    }
    let _ = writeln!(
        stdout,
        "CHILD: pause returned -1, errno = {}",
        outcome.errno as i32
    );
    let _ = writeln!(stdout, "CHILD:   (EINTR = {})", Errno::EINTR as i32);
    let _ = stdout.flush();
    exit_immediately(0)
}
