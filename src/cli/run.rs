//! CLI entry points and dispatch logic
//!
//! Each binary's `main` calls one function here. These functions own ALL
//! output, including error reports, and return `Result<(), ExitCode>`; `main`
//! only maps the error to `std::process::exit`.

use std::ffi::OsString;
use std::io::Write;

use clap::Parser;
use tracing::{debug, warn};

use forkexec_runner::{
    ChildTermination, ChildWaiter, CommandSpec, LaunchOptions, Launcher, NixWaiter,
    collect_termination,
};
use forkexec_utils::error::ForkExecError;
use forkexec_utils::exit_codes::ExitCode;
use forkexec_utils::logging::init_tracing;

use super::args::{PauseSignalCli, SendSignalCli, USAGE, parse_invocation};
use crate::demos;

/// Entry point of the `forkexec` binary.
pub fn run() -> Result<(), ExitCode> {
    run_from(std::env::args_os().skip(1))
}

/// Launcher entry point over explicit arguments (program name excluded).
pub fn run_from<I, T>(args: I) -> Result<(), ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let (options, command) = match parse_invocation(args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{USAGE}");
            eprint!("{}", err.display_for_user());
            return Err(err.to_exit_code());
        }
    };

    // Debug logs stay behind RUST_LOG: -v owns stdout's VERBOSE lines only.
    // A second subscriber (embedding callers, tests) is not an error here.
    let _ = init_tracing(false);

    let code = match launch(options, &command, &mut NixWaiter, &mut std::io::stdout()) {
        Ok(termination) => ExitCode::from(termination),
        Err(err) => {
            eprint!("{}", err.display_for_user());
            err.to_exit_code()
        }
    };

    if code.is_success() { Ok(()) } else { Err(code) }
}

/// Fork, exec and wait for one child, writing verbose lines to `out`.
///
/// Verbose lines are best effort: a failed write is logged and the child is
/// still waited for, so its status always decides the exit code.
///
/// # Errors
///
/// Fork and wait failures; exec failures arrive as `Exited(127)`.
pub fn launch<W, O>(
    options: LaunchOptions,
    command: &CommandSpec,
    waiter: &mut W,
    out: &mut O,
) -> Result<ChildTermination, ForkExecError>
where
    W: ChildWaiter + ?Sized,
    O: Write + ?Sized,
{
    let child = Launcher::new(options.resolution).spawn(command)?;
    if options.verbose {
        write_verbose(out, &format!("pid = {child}"));
    }

    let termination = collect_termination(waiter, child)?;
    debug!(%child, %termination, "launch finished");

    if options.verbose {
        if let Some(line) = termination.verbose_line() {
            write_verbose(out, &line);
        }
    }
    Ok(termination)
}

fn write_verbose<O: Write + ?Sized>(out: &mut O, line: &str) {
    if let Err(err) = writeln!(out, "VERBOSE: {line}").and_then(|()| out.flush()) {
        warn!(error = %err, "could not write verbose line");
    }
}

/// Entry point of the `pause-signal` binary.
pub fn run_pause_signal() -> Result<(), ExitCode> {
    let Some(cli) = parse_demo_args::<PauseSignalCli>()? else {
        return Ok(());
    };
    let _ = init_tracing(cli.verbose);

    demos::pause::run(&mut std::io::stdout()).map(drop).map_err(report)
}

/// Entry point of the `send-signal` binary.
pub fn run_send_signal() -> Result<(), ExitCode> {
    let Some(cli) = parse_demo_args::<SendSignalCli>()? else {
        return Ok(());
    };
    let _ = init_tracing(cli.verbose);

    let options = cli.into_options().map_err(report)?;
    demos::send::run(&options).map(drop).map_err(report)
}

/// Parse a demo's arguments; `None` once help or version has been printed.
///
/// Any other clap failure is a usage error and exits 1.
fn parse_demo_args<P: Parser>() -> Result<Option<P>, ExitCode> {
    match P::try_parse() {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => {
            let _ = err.print();
            if err.use_stderr() {
                Err(ExitCode::FAILURE)
            } else {
                Ok(None)
            }
        }
    }
}

fn report(err: ForkExecError) -> ExitCode {
    eprint!("{}", err.display_for_user());
    err.to_exit_code()
}
