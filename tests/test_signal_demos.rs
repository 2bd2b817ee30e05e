//! Integration tests for the pause-signal and send-signal demonstrations

use anyhow::{Context, Result};
use assert_cmd::assert::OutputAssertExt;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

fn send_signal_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("send-signal"));
    cmd.stdin(Stdio::null());
    cmd
}

// ============================================================================
// pause-signal
// ============================================================================

#[test]
fn pause_signal_reports_sigint() -> Result<()> {
    let mut child = Command::new(assert_cmd::cargo::cargo_bin!("pause-signal"))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().context("stdout is piped")?;
    let mut reader = BufReader::new(stdout);
    let mut first = String::new();
    reader.read_line(&mut first)?;
    assert_eq!(first, "PAUSING...\n");

    kill(Pid::from_raw(i32::try_from(child.id())?), Signal::SIGINT)?;

    let mut rest = String::new();
    reader.read_to_string(&mut rest)?;
    let status = child.wait()?;

    assert!(status.success(), "pause-signal failed: {status:?}");
    assert!(rest.contains("signal handler: signal = 2"), "{rest}");
    assert!(rest.contains("pause returned -1, errno = 4"), "{rest}");
    assert!(rest.contains("  (EINTR = 4)"), "{rest}");
    Ok(())
}

#[test]
fn pause_signal_rejects_unknown_option() {
    Command::new(assert_cmd::cargo::cargo_bin!("pause-signal"))
        .stdin(Stdio::null())
        .arg("--bogus")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("PAUSING").not());
}

// ============================================================================
// send-signal
// ============================================================================

#[test]
fn send_signal_default_is_caught_by_child() {
    send_signal_cmd()
        .args(["--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SIGNAL VALUES"))
        .stdout(predicate::str::contains("  SIGTERM = 15"))
        .stdout(predicate::str::contains("sigaction signal = 15 OK"))
        .stdout(predicate::str::contains("sigaction signal = 9 OK").not())
        .stdout(predicate::str::contains("PARENT: Sending signal 15 to child"))
        .stdout(predicate::str::contains("CHILD: signal handler: signal = 15"))
        .stdout(predicate::str::contains("PARENT: child exited with code 0"));
}

#[test]
fn send_signal_sigkill_terminates_child() {
    send_signal_cmd()
        .args(["--signal", "9", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CHILD: signal handler").not())
        .stdout(predicate::str::contains("PARENT: child killed by signal 9"));
}

#[test]
fn send_signal_probe_is_followed_by_sigkill() {
    send_signal_cmd()
        .args(["--signal", "0", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PARENT: Sending signal 0 to child"))
        .stdout(predicate::str::contains("PARENT: kill failed").not())
        .stdout(predicate::str::contains("PARENT: child killed by signal 9"));
}

#[test]
fn send_signal_impossible_signals_child_fails() {
    send_signal_cmd()
        .args(["--impossible-signals", "--delay-ms", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "ERROR sigaction: signal = 9, errno = 22",
        ))
        .stdout(predicate::str::contains("PARENT: child exited with code 127"));
}

#[test]
fn send_signal_rejects_unknown_option() {
    send_signal_cmd().arg("--bogus").assert().code(1);
}

#[test]
fn send_signal_help_exits_zero() {
    send_signal_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--impossible-signals"));
}
