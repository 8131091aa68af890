//! Runs the `scholar` binary against an isolated config and session file.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn scholar(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("config.toml");
    std::fs::write(&config, "timeout_secs = 2\n").unwrap();
    Command::new(env!("CARGO_BIN_EXE_scholar"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("SCHOLAR_SESSION_FILE", dir.join("session.json"))
        // Nothing listens here, so any network call fails fast.
        .env("SCHOLAR_BASE_URL", "http://127.0.0.1:9")
        .env_remove("RUST_LOG")
        .env_remove("SCHOLAR_PASSWORD")
        .output()
        .expect("binary should run")
}

#[test]
fn test_whoami_without_session_needs_no_network() {
    let dir = TempDir::new().unwrap();
    let out = scholar(dir.path(), &["whoami"]);

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "Not signed in\n");
}

#[test]
fn test_json_flag_prints_json() {
    let dir = TempDir::new().unwrap();
    let out = scholar(dir.path(), &["whoami", "--json"]);

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["action"], "whoami");
}

#[test]
fn test_list_falls_back_to_empty_when_portal_is_down() {
    let dir = TempDir::new().unwrap();
    let out = scholar(dir.path(), &["curricula", "list"]);

    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_login_failure_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let out = scholar(dir.path(), &["login", "-u", "ada", "--password", "secret"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("login failed"));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_login_requires_password() {
    let dir = TempDir::new().unwrap();
    let out = scholar(dir.path(), &["login", "-u", "ada"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--password"));
}

#[test]
fn test_corrupt_session_is_discarded() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    std::fs::write(&session, "{not json").unwrap();

    let out = scholar(dir.path(), &["logout"]);
    assert!(out.status.success());
    assert!(!session.exists());

    std::fs::write(&session, "{not json").unwrap();
    let out = scholar(dir.path(), &["whoami"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "Not signed in\n");
}

#[test]
fn test_invalid_base_url_flag_is_rejected() {
    let dir = TempDir::new().unwrap();
    let out = scholar(dir.path(), &["curricula", "list", "--base-url", "not a url"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid --base-url"));
}
