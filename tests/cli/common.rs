//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("runmark")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Runmark turns inline markup"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("runmark")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("runmark")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("runmark")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_parse_help() {
    cargo_bin_cmd!("runmark")
        .args(["parse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--placeholder"));
}

#[test]
fn test_missing_config_file_fails() {
    cargo_bin_cmd!("runmark")
        .args(["parse", "--config", "/definitely/not/here.toml"])
        .write_stdin("x")
        .assert()
        .failure();
}

#[test]
fn test_unknown_theme_lists_choices() {
    cargo_bin_cmd!("runmark")
        .args(["parse", "--theme", "sepia"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sepia"))
        .stderr(predicate::str::contains("light"))
        .stderr(predicate::str::contains("dark"));
}

#[test]
fn test_invalid_explicit_config_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("runmark.toml");
    std::fs::write(&config, "max_nesting_depth = 0\n").unwrap();

    cargo_bin_cmd!("runmark")
        .arg("parse")
        .arg("--config")
        .arg(&config)
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_nesting_depth"));
}
