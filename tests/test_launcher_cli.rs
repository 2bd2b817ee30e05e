//! Integration tests for the forkexec launcher binary
//!
//! These tests execute the compiled binary directly using `assert_cmd` and
//! check exit statuses and the verbose report.

use anyhow::Result;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::process::{Command, Stdio};

fn forkexec_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("forkexec"));
    cmd.stdin(Stdio::null());
    cmd
}

// ============================================================================
// Usage errors
// ============================================================================

#[test]
fn no_arguments_is_usage_error() {
    forkexec_cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Usage: forkexec [options] executable [args...]",
        ));
}

#[test]
fn only_options_is_usage_error() {
    forkexec_cmd()
        .args(["--verbose", "--no-path"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("missing executable"));
}

// ============================================================================
// Exit status propagation
// ============================================================================

#[test]
fn verbose_true_after_double_dash() {
    forkexec_cmd()
        .args(["--verbose", "--", "/bin/true"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^VERBOSE: pid = \d+$").unwrap())
        .stdout(predicate::str::contains(
            "VERBOSE: child process finished normally, exit code = 0",
        ));
}

#[test]
fn child_exit_code_is_propagated() {
    forkexec_cmd()
        .args(["sh", "-c", "exit 7"])
        .assert()
        .code(7)
        .stdout(predicate::str::is_empty());
}

#[test]
fn child_arguments_reach_the_program() {
    forkexec_cmd()
        .args(["echo", "-v", "--no-path", "hello"])
        .assert()
        .success()
        .stdout("-v --no-path hello\n");
}

#[test]
fn nonexistent_program_exits_127() {
    forkexec_cmd()
        .args(["forkexec-definitely-not-a-program", "arg1"])
        .assert()
        .code(127)
        .stderr(predicate::str::contains("forkexec-definitely-not-a-program"));
}

#[test]
fn no_path_does_not_search_path() {
    forkexec_cmd().args(["--no-path", "true"]).assert().code(127);

    forkexec_cmd()
        .args(["--no-path", "/nonexistent/program"])
        .assert()
        .code(127);
}

#[test]
fn last_resolution_flag_wins() {
    forkexec_cmd()
        .args(["--no-path", "--use-path", "true"])
        .assert()
        .success();
}

#[test]
fn signalled_child_exits_127() {
    forkexec_cmd()
        .args(["-v", "sh", "-c", "kill -KILL $$"])
        .assert()
        .code(127)
        .stdout(predicate::str::contains(
            "VERBOSE: child process killed by signal, signal = 9",
        ));
}

#[test]
fn quiet_run_prints_no_verbose_lines() {
    forkexec_cmd()
        .args(["sh", "-c", "exit 0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VERBOSE").not());
}

#[test]
fn verbose_pid_is_the_child_pid() -> Result<()> {
    let output = forkexec_cmd()
        .args(["--verbose", "sh", "-c", "echo $$"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "unexpected output: {stdout}");
    let reported = lines[0].strip_prefix("VERBOSE: pid = ").unwrap();
    assert_eq!(reported, lines[1]);
    Ok(())
}

#[test]
fn script_run_by_literal_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let script = dir.path().join("exit-five");
    std::fs::write(&script, "#!/bin/sh\nexit 5\n")?;
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;

    forkexec_cmd().arg("--no-path").arg(&script).assert().code(5);
    Ok(())
}

#[test]
fn flag_cluster_is_executed_as_command() {
    forkexec_cmd()
        .args(["-vp", "true"])
        .assert()
        .code(127)
        .stdout(predicate::str::contains("VERBOSE").not())
        .stderr(predicate::str::contains("exec failed: -vp: "));

    forkexec_cmd()
        .args(["--verbose=1", "true"])
        .assert()
        .code(127)
        .stderr(predicate::str::contains("exec failed: --verbose=1: "));
}

#[test]
fn verbose_does_not_enable_debug_logs() {
    forkexec_cmd()
        .env_remove("RUST_LOG")
        .args(["--verbose", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VERBOSE: pid = "))
        .stderr(predicate::str::is_empty());
}
