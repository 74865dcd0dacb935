//! Exit codes and error reporting of the `card-wallet` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary inside `dir` with a private config file and no wallet env vars
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_card-wallet"))
        .args(args)
        .arg("--config")
        .arg(dir.join("config.toml"))
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("WALLET_FILE")
        .env_remove("WALLET_OUTPUT_FORMAT")
        .env_remove("WALLET_BALANCE_PARSING")
        .env_remove("WALLET_CONFIG")
        .output()
        .expect("run card-wallet")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_add_view_remove_exit_zero() {
    let dir = TempDir::new().unwrap();

    let added = run(dir.path(), &["add", "123456", "Jane", "Doe", "500"]);
    assert_eq!(added.status.code(), Some(0));
    assert!(stdout(&added).contains("Card added successfully!"));

    let viewed = run(dir.path(), &["view"]);
    assert_eq!(viewed.status.code(), Some(0));
    assert!(stdout(&viewed).contains("500.00"));

    let missing = run(dir.path(), &["remove", "999"]);
    assert_eq!(missing.status.code(), Some(0));
    assert!(stdout(&missing).contains("Card not found!"));
}

#[test]
fn test_usage_errors_exit_two() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["add", "1", "Jane"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("wallet.txt").exists());

    let output = run(dir.path(), &["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_rejected_add_exits_one() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["add", "12ab", "Jane", "Doe", "5"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    assert!(stderr(&output).contains("only digits"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_json_mode_reports_errors_on_stdout() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["add", "7", "Jane", "Doe", "5"]);

    let output = run(dir.path(), &["--output", "json", "add", "7", "Jane", "Doe", "5"]);
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("already exists"));
}

#[test]
fn test_malformed_config_does_not_block_card_commands() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "garbage = [").unwrap();
    fs::write(dir.path().join("wallet.txt"), "1 A B 5.00\n").unwrap();

    let viewed = run(dir.path(), &["view"]);
    assert_eq!(viewed.status.code(), Some(0));
    assert!(stdout(&viewed).contains("5.00"));

    let listed = run(dir.path(), &["config", "list"]);
    assert_eq!(listed.status.code(), Some(1));
    assert!(stderr(&listed).contains("Failed to parse config file"));
}
