//! Smoke tests for the desk-calc CLI
//!
//! These tests run the built binary against a throwaway history file.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the desk-calc binary, writing history inside `dir`
fn desk_calc(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("desk-calc").expect("desk-calc binary should exist");
    cmd.env_remove("RUST_LOG")
        .env("DESK_CALC_HISTORY", dir.path().join("history.txt"));
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.2.0"));
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("convert"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir).arg("frobnicate").assert().failure();
}

// ============================================================================
// Eval Tests
// ============================================================================

#[test]
fn test_eval_chained_addition() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["eval", "5", "+", "3", "+", "2", "="])
        .assert()
        .success()
        .stdout("10\n");

    let text = fs::read_to_string(dir.path().join("history.txt")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("] 5 + 3 = 8"));
    assert!(lines[1].ends_with("] 8 + 2 = 10"));
}

#[test]
fn test_eval_subtraction_token() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["eval", "--no-history", "9", "-", "4", "="])
        .assert()
        .success()
        .stdout("5\n");
    assert!(!dir.path().join("history.txt").exists());
}

#[test]
fn test_eval_divide_by_zero_reports_on_stderr() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["eval", "7", "/", "0", "="])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Cannot divide by zero"));
}

#[test]
fn test_eval_unknown_token_fails() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["eval", "2", "^", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown input"));
}

#[test]
fn test_eval_requires_tokens() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir).arg("eval").assert().failure();
}

// ============================================================================
// History Tests
// ============================================================================

#[test]
fn test_history_empty() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout("No history available\n");
}

#[test]
fn test_history_list_and_clear() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["eval", "4", "sqr"])
        .assert()
        .success()
        .stdout("16\n");

    desk_calc(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqr(4) = 16"));

    desk_calc(&dir)
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared successfully"));

    desk_calc(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout("No history available\n");
}

#[test]
fn test_history_keeps_hand_written_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.txt");
    fs::write(&path, "my note\n[2024-01-02 03:04:05] 1 + 1 = 2\n").unwrap();

    desk_calc(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout("[2024-01-02 03:04:05] 1 + 1 = 2\nmy note\n");

    desk_calc(&dir)
        .args(["eval", "2", "+", "2", "="])
        .assert()
        .success()
        .stdout("4\n");

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "my note");
    assert_eq!(lines[1], "[2024-01-02 03:04:05] 1 + 1 = 2");
    assert!(lines[2].ends_with("] 2 + 2 = 4"));
}

#[test]
fn test_history_survives_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.txt");
    fs::write(&path, b"[2024-01-02 03:04:05] 2 + 2 = 4\ncaf\xE9\n").unwrap();

    desk_calc(&dir)
        .args(["eval", "1", "+", "1", "="])
        .assert()
        .success()
        .stdout("2\n");

    let text = String::from_utf8_lossy(&fs::read(&path).unwrap()).into_owned();
    assert!(text.contains("[2024-01-02 03:04:05] 2 + 2 = 4"));
    assert!(text.contains("caf"));
    assert!(text.contains("1 + 1 = 2"));
}

#[test]
fn test_history_file_flag_overrides_env() {
    let dir = TempDir::new().unwrap();
    let other = dir.path().join("other.txt");
    desk_calc(&dir)
        .arg("--history-file")
        .arg(&other)
        .args(["eval", "3", "*", "3", "="])
        .assert()
        .success();
    assert!(other.exists());
    assert!(!dir.path().join("history.txt").exists());
}

// ============================================================================
// Tool Tests
// ============================================================================

#[test]
fn test_age() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["age", "1990-06-15", "--today", "2024-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("34 years, 0 months, 0 days"));
}

#[test]
fn test_age_future_birth_date_fails() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["age", "2030-01-01", "--today", "2024-01-01"])
        .assert()
        .failure();
}

#[test]
fn test_convert() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["convert", "100", "USD", "EUR"])
        .assert()
        .success()
        .stdout("100.00 USD = 92.00 EUR\n");
}

#[test]
fn test_convert_unknown_currency_fails() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .args(["convert", "100", "USD", "XYZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown currency"));
}

#[test]
fn test_currencies() {
    let dir = TempDir::new().unwrap();
    desk_calc(&dir)
        .arg("currencies")
        .assert()
        .success()
        .stdout(predicate::str::contains("USD - US Dollar"))
        .stdout(predicate::str::contains("TZS - Tanzanian Shilling"));
}
