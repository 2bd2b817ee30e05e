//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interfaces of the three binaries using
//! clap: the `forkexec` launcher and the two signal demonstrations.

use std::ffi::{OsStr, OsString};
use std::time::Duration;

use clap::{CommandFactory, Parser};

use forkexec_runner::{CommandSpec, LaunchOptions, PathResolution};
use forkexec_signals::{Signal, signal_from_number};
use forkexec_utils::error::ForkExecError;

/// Usage line printed on every launcher usage error.
pub const USAGE: &str = "Usage: forkexec [options] executable [args...]";

/// forkexec - run a program in a forked child and exit with its status
///
/// Options must precede the executable and are matched as whole tokens; the
/// first token that is not one of them starts the child command, which is
/// passed through untouched.
#[derive(Parser, Debug)]
#[command(name = "forkexec")]
#[command(about = "Fork a child, exec a program in it, and exit with the child's status")]
#[command(override_usage = "forkexec [options] executable [args...]")]
#[command(after_help = r#"
EXIT STATUS:
  n     the child exited normally with status n
  127   the child could not exec the program, or was killed by a signal
  1     usage error, or the launcher failed while forking or waiting

EXAMPLES:
  forkexec --verbose ls -l /tmp
  forkexec --no-path ./build/tool --flag
  forkexec -- -program-starting-with-dash
"#)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Resolve the executable by searching PATH (default)
    #[arg(short = 'p', long = "use-path", overrides_with = "no_path")]
    pub use_path: bool,

    /// Use the executable path as given, without searching PATH
    #[arg(long = "no-path", overrides_with = "use_path")]
    pub no_path: bool,

    /// Print the child's pid and how it terminated
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Executable followed by its arguments
    #[arg(
        value_name = "EXECUTABLE",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

impl Cli {
    /// Split the parsed arguments into launch options and the child command.
    ///
    /// # Errors
    ///
    /// Returns a usage error if no child command was given.
    pub fn into_invocation(self) -> Result<(LaunchOptions, CommandSpec), ForkExecError> {
        let resolution = if self.no_path {
            PathResolution::Literal
        } else {
            PathResolution::Search
        };
        let options = LaunchOptions {
            verbose: self.verbose,
            resolution,
        };
        let command = CommandSpec::from_argv(self.command)
            .ok_or_else(|| ForkExecError::usage("missing executable"))?;
        Ok((options, command))
    }
}

/// Whether `token` is exactly one of the launcher's options.
///
/// Clusters (`-vp`) and attached values (`--verbose=1`) are not options; they
/// start the child command like any other unrecognised token.
fn is_launcher_option(token: &OsStr) -> bool {
    matches!(
        token.to_str(),
        Some("-p" | "--use-path" | "--no-path" | "-v" | "--verbose")
    )
}

/// Parse launcher arguments, excluding the program name.
///
/// The option prefix is split off by exact token match, followed by an
/// optional `--`; clap then validates the prefix with the child command
/// placed after an explicit `--`.
///
/// # Errors
///
/// Any clap failure (in practice: no executable given) is a usage error.
pub fn parse_invocation<I, T>(args: I) -> Result<(LaunchOptions, CommandSpec), ForkExecError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let prefix_len = args
        .iter()
        .position(|token| !is_launcher_option(token))
        .unwrap_or(args.len());
    let (options, rest) = args.split_at(prefix_len);
    let command = match rest.split_first() {
        Some((first, command)) if first == "--" => command,
        _ => rest,
    };

    let argv = std::iter::once(OsString::from("forkexec"))
        .chain(options.iter().cloned())
        .chain(std::iter::once(OsString::from("--")))
        .chain(command.iter().cloned());
    let cli = Cli::try_parse_from(argv).map_err(|err| {
        let reason = match err.kind() {
            clap::error::ErrorKind::MissingRequiredArgument => "missing executable".to_string(),
            kind => kind.to_string(),
        };
        ForkExecError::usage(reason)
    })?;
    cli.into_invocation()
}

/// Build the launcher's clap command, for help rendering and introspection.
#[must_use]
pub fn build_cli() -> clap::Command {
    Cli::command()
}

/// pause-signal - wait for SIGINT and report it
#[derive(Parser, Debug)]
#[command(name = "pause-signal")]
#[command(about = "Install a SIGINT handler, pause until it runs, and report the signal")]
#[command(version)]
pub struct PauseSignalCli {
    /// Emit debug logs to standard error
    #[arg(short, long)]
    pub verbose: bool,
}

/// send-signal - fork a child that catches signals, then signal it
#[derive(Parser, Debug)]
#[command(name = "send-signal")]
#[command(about = "Fork a child that catches the demo signals, then send it one")]
#[command(version)]
pub struct SendSignalCli {
    /// Signal number to send; 0 only checks that the child exists
    #[arg(long, value_name = "N", default_value_t = Signal::SIGTERM as i32, allow_negative_numbers = true)]
    pub signal: i32,

    /// Also try to catch SIGKILL, which the kernel refuses
    #[arg(long)]
    pub impossible_signals: bool,

    /// Milliseconds the parent waits before sending the signal
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub delay_ms: u64,

    /// Emit debug logs to standard error
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated send-signal options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendSignalOptions {
    /// `None` is the existence probe (signal 0)
    pub signal: Option<Signal>,
    pub impossible_signals: bool,
    pub delay: Duration,
}

impl SendSignalCli {
    /// # Errors
    ///
    /// Returns a signal error for a number the platform does not define.
    pub fn into_options(self) -> Result<SendSignalOptions, ForkExecError> {
        Ok(SendSignalOptions {
            signal: signal_from_number(self.signal)?,
            impossible_signals: self.impossible_signals,
            delay: Duration::from_millis(self.delay_ms),
        })
    }
}
