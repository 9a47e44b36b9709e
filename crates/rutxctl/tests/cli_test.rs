//! Integration tests for the `rutxctl` binary.
//!
//! These cover argument parsing, help output, shell completions, and
//! pre-flight error handling, all without a router on the network.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the binary with env isolation so tests never
/// pick up the operator's RUTX_* variables.
fn rutxctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("rutxctl");
    cmd.env_remove("RUTX_DEVICE")
        .env_remove("RUTX_USERNAME")
        .env_remove("RUTX_PASSWORD")
        .env_remove("RUTX_TIMEOUT")
        .env_remove("ROBOT_MODEL");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = rutxctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    rutxctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("RUTX11")
            .and(predicate::str::contains("restore-defaults"))
            .and(predicate::str::contains("wifi"))
            .and(predicate::str::contains("lease"))
            .and(predicate::str::contains("setup")),
    );
}

#[test]
fn test_version_flag() {
    rutxctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rutxctl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    rutxctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    rutxctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = rutxctl_cmd().arg("frobnicate").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("frobnicate"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_restore_requires_model_and_serial() {
    let output = rutxctl_cmd().arg("restore-defaults").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("--model") || text.contains("--serial"),
        "Expected missing-argument error:\n{text}"
    );
}

#[test]
fn test_setup_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    rutxctl_cmd()
        .args(["setup", "--config", missing.to_str().unwrap(), "--no-wait"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("setup file").or(predicate::str::contains("nope.json")));
}

#[test]
fn test_setup_rejects_short_wifi_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"wifi_client": [{"ssid": "Net", "password": "short"}]}"#,
    )
    .unwrap();

    rutxctl_cmd()
        .args(["setup", "--config", path.to_str().unwrap(), "--no-wait"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("minimal length"));
}

#[test]
fn test_setup_rejects_bad_radio_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"wifi_client_radio": 2}"#).unwrap();

    rutxctl_cmd()
        .args(["setup", "--config", path.to_str().unwrap(), "--no-wait"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0 or 1"));
}

#[test]
fn test_invalid_output_format() {
    let output = rutxctl_cmd()
        .args(["--output", "xml", "wifi", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_wifi_subcommands_exist() {
    rutxctl_cmd().args(["wifi", "--help"]).assert().success().stdout(
        predicate::str::contains("connect")
            .and(predicate::str::contains("disconnect"))
            .and(predicate::str::contains("list")),
    );
}

#[test]
fn test_lease_subcommands_exist() {
    rutxctl_cmd().args(["lease", "--help"]).assert().success().stdout(
        predicate::str::contains("add")
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("reset")),
    );
}
