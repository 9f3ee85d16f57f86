//! Smoke tests for the chums-runner CLI
//!
//! Everything here runs without a browser; `run` uses `--simulated`.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the chums-runner binary
fn runner() -> Command {
    let mut cmd = Command::cargo_bin("chums-runner").expect("chums-runner binary should exist");
    cmd.env_remove("CHUMS_BASE_URL")
        .env_remove("CHUMS_CHURCH")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    runner()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    runner()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_fails() {
    runner().assert().failure();
}

#[test]
fn test_run_subcommand_help() {
    runner()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--fail-fast"))
        .stdout(predicate::str::contains("--simulated"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_prints_catalogue() {
    runner()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth::login_and_select_church"))
        .stdout(predicate::str::contains("donations::create_non_deductible_fund"));
}

#[test]
fn test_list_smoke_suite() {
    runner()
        .args(["list", "--suite", "smoke"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[smoke]"))
        .stdout(predicate::str::contains("people::crud").not());
}

#[test]
fn test_list_unknown_suite_fails() {
    runner()
        .args(["list", "--suite", "bingo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bingo"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_prints_yaml() {
    runner()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url: http://localhost:3000"))
        .stdout(predicate::str::contains("church: Grace Community Church"));
}

#[test]
fn test_config_env_override() {
    runner()
        .arg("config")
        .env("CHUMS_BASE_URL", "https://staging.chums.example/")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url: https://staging.chums.example\n"));
}

#[test]
fn test_config_invalid_file_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("chums.yaml");
    fs::write(&path, "base_url: ftp://nope\n").unwrap();

    runner()
        .args(["config", "--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

// ============================================================================
// run --simulated
// ============================================================================

#[test]
fn test_simulated_smoke_run_passes() {
    let temp = TempDir::new().unwrap();

    runner()
        .args(["--color", "never", "run", "--simulated", "--suite", "smoke", "--output"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"))
        .stdout(predicate::str::contains("0 failed"));

    let report = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().path().join("report.json"))
        .find(|path| path.exists())
        .expect("report.json written under the output directory");
    let json = fs::read_to_string(report).unwrap();
    assert!(json.contains("\"run_id\""));
    assert!(json.contains("dashboard::search_and_open_person"));
}

#[test]
fn test_run_unmatched_filter_fails() {
    runner()
        .args(["run", "--simulated", "--filter", "no-such-spec"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no specs match"));
}

#[test]
fn test_quiet_flag_overrides_rust_log() {
    let temp = TempDir::new().unwrap();

    runner()
        .args(["-q", "--color", "never", "run", "--simulated", "--suite", "smoke", "--output"])
        .arg(temp.path())
        .env("RUST_LOG", "chums_harness=info")
        .assert()
        .success()
        .stderr(predicate::str::contains("run started").not());
}

#[test]
fn test_rust_log_applies_without_flags() {
    let temp = TempDir::new().unwrap();

    runner()
        .args(["--color", "never", "run", "--simulated", "--suite", "smoke", "--output"])
        .arg(temp.path())
        .env("RUST_LOG", "chums_harness=info")
        .assert()
        .success()
        .stderr(predicate::str::contains("run started"));
}
