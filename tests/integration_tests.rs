//! Integration tests for the stockbook CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! Nothing here talks to a real endpoint: network-dependent paths are
//! driven against an unreachable local address.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a stockbook command with a hermetic environment
fn stockbook() -> Command {
    let mut cmd = Command::cargo_bin("stockbook").unwrap();
    cmd.env_remove("STOCKBOOK_BASE_URL");
    cmd.env_remove("STOCKBOOK_LOGIN");
    cmd.env_remove("STOCKBOOK_PASSWORD");
    cmd
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    stockbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stockbook"));
}

#[test]
fn test_version_displays() {
    stockbook()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockbook"));
}

#[test]
fn test_unknown_command_fails() {
    stockbook()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_generate() {
    stockbook()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stockbook"));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_shows_unset_credentials() {
    stockbook()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("login: (not set)"))
        .stdout(predicate::str::contains("password: (not set)"));
}

#[test]
fn test_config_masks_password() {
    stockbook()
        .arg("config")
        .env("STOCKBOOK_LOGIN", "alice")
        .env("STOCKBOOK_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("login: alice"))
        .stdout(predicate::str::contains("password: ********"))
        .stdout(predicate::str::contains("hunter2").not());
}

// ============================================================================
// Network Command Tests (against an unreachable endpoint)
// ============================================================================

#[test]
fn test_list_without_credentials_fails() {
    stockbook()
        .args(["list", "product"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no credentials configured"));
}

#[test]
fn test_list_unknown_entity_type_fails() {
    stockbook()
        .args(["list", "gadget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown entity type"));
}

#[test]
fn test_list_unreachable_endpoint_reports_page_context() {
    stockbook()
        .args(["list", "product"])
        .env("STOCKBOOK_BASE_URL", "http://127.0.0.1:9")
        .env("STOCKBOOK_LOGIN", "alice")
        .env("STOCKBOOK_PASSWORD", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page fetch for product"));
}

#[test]
fn test_show_unreachable_endpoint_fails() {
    stockbook()
        .args(["show", "product", "6f9619ff-8b86-d011-b42d-00c04fc964ff"])
        .env("STOCKBOOK_BASE_URL", "http://127.0.0.1:9")
        .env("STOCKBOOK_LOGIN", "alice")
        .env("STOCKBOOK_PASSWORD", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("request to"));
}

#[test]
fn test_update_requires_changes() {
    stockbook()
        .args(["update", "product", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}
