//! Integration tests for the `vpnwatch` binary.
//!
//! These validate argument parsing, help output, shell completions, the
//! check command's pre-flight and failure paths, and record-view errors —
//! all without requiring a live gateway or mail relay.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `vpnwatch` binary with env isolation.
///
/// Clears all `VPNWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn vpnwatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vpnwatch");
    cmd.env("HOME", "/tmp/vpnwatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vpnwatch-cli-test-nonexistent")
        .env_remove("VPNWATCH_PROFILE")
        .env_remove("VPNWATCH_HOSTNAME")
        .env_remove("VPNWATCH_USERNAME")
        .env_remove("VPNWATCH_PASSWORD")
        .env_remove("VPNWATCH_TIMEOUT")
        .env_remove("VPNWATCH_LOG_DIR");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vpnwatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    vpnwatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Gaia")
            .and(predicate::str::contains("check"))
            .and(predicate::str::contains("record"))
            .and(predicate::str::contains("report")),
    );
}

#[test]
fn test_version_flag() {
    vpnwatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vpnwatch"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    vpnwatch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    vpnwatch_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Check: usage errors ─────────────────────────────────────────────

#[test]
fn test_check_missing_args_is_a_usage_error() {
    let output = vpnwatch_cmd().arg("check").output().unwrap();
    assert_eq!(
        output.status.code(),
        Some(2),
        "Expected clap usage exit code 2"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("required") || text.contains("Usage"),
        "Expected usage error:\n{text}"
    );
}

#[test]
fn test_check_inverted_thresholds_exits_unknown_without_network() {
    // warning >= critical is a configuration error caught pre-flight;
    // no connection is attempted, so this must return immediately.
    let output = vpnwatch_cmd()
        .args([
            "check", "-H", "192.0.2.1", "-u", "monitor", "-p", "secret", "-w", "20", "-c", "10",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected Unknown exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Unknown - "), "stdout: {stdout}");
    assert!(stdout.contains("warning level 20"), "stdout: {stdout}");
}

#[test]
fn test_check_equal_thresholds_are_rejected() {
    let output = vpnwatch_cmd()
        .args([
            "check", "-H", "192.0.2.1", "-u", "monitor", "-p", "secret", "-w", "10", "-c", "10",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

// ── Check: collection failures ──────────────────────────────────────

#[test]
fn test_check_unreachable_host_exits_unknown_and_names_host() {
    // Port 9 on localhost is the discard port; nothing listens there, so
    // the connection is refused quickly.
    let output = vpnwatch_cmd()
        .args([
            "check",
            "-H",
            "127.0.0.1",
            "--port",
            "9",
            "--timeout",
            "2",
            "-u",
            "monitor",
            "-p",
            "secret",
            "-w",
            "10",
            "-c",
            "20",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected Unknown exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Unknown - "), "stdout: {stdout}");
    assert!(stdout.contains("127.0.0.1"), "stdout: {stdout}");
    // Exactly one line of stdout for the monitoring system.
    assert_eq!(stdout.trim_end().lines().count(), 1, "stdout: {stdout}");
}

// ── Record / report / show without configuration ────────────────────

#[test]
fn test_record_without_profile_fails_with_guidance() {
    vpnwatch_cmd()
        .args(["record", "--no-mail"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("profile")
                .or(predicate::str::contains("Profile"))
                .or(predicate::str::contains("config")),
        );
}

#[test]
fn test_show_missing_record_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = vpnwatch_cmd()
        .args([
            "show",
            "--log-dir",
            dir.path().to_str().unwrap(),
            "--date",
            "20240101",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "Expected not-found exit code");
    let text = combined_output(&output);
    assert!(text.contains("vpnusers_20240101.csv"), "output:\n{text}");
}

#[test]
fn test_show_rejects_malformed_date() {
    let output = vpnwatch_cmd()
        .args(["show", "--date", "2024-01-01"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(text.contains("YYYYMMDD"), "output:\n{text}");
}

#[test]
fn test_show_renders_existing_record_as_table() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vpnusers_20240101.csv"),
        "Time,VpnUsers,PeakUsers\n09:30,12,40\n10:00,15,40\n",
    )
    .unwrap();

    vpnwatch_cmd()
        .args([
            "show",
            "--log-dir",
            dir.path().to_str().unwrap(),
            "--date",
            "20240101",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("09:30")
                .and(predicate::str::contains("12"))
                .and(predicate::str::contains("Peak Users")),
        );
}

#[test]
fn test_show_plain_output_for_scripting() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vpnusers_20240101.csv"),
        "Time,VpnUsers,PeakUsers\n09:30,12,40\n",
    )
    .unwrap();

    vpnwatch_cmd()
        .args([
            "show",
            "--log-dir",
            dir.path().to_str().unwrap(),
            "--date",
            "20240101",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:30 12 40"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_check_help_documents_plugin_flags() {
    vpnwatch_cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--hostname")
                .and(predicate::str::contains("--warning"))
                .and(predicate::str::contains("--critical")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    vpnwatch_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    vpnwatch_cmd().args(["config", "show"]).assert().success();
}
