//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn parse_json(args: &[&str], stdin: &str) -> serde_json::Value {
    let output = cargo_bin_cmd!("runmark")
        .arg("parse")
        .arg("--json")
        .args(args)
        .write_stdin(stdin)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_parse_stdin_debug_output() {
    cargo_bin_cmd!("runmark")
        .arg("parse")
        .write_stdin("Hello **bold** world\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Text("))
        .stdout(predicate::str::contains("\"bold\""));
}

#[test]
fn test_parse_json_runs() {
    let json = parse_json(&[], "Hello **bold** world\n");
    let runs = json.as_array().unwrap();
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0]["type"], "text");
    assert_eq!(runs[0]["text"], "Hello ");
    assert_eq!(runs[1]["text"], "bold");
    assert_eq!(runs[1]["style"]["font_weight"], "bold");
    assert_eq!(runs[2]["text"], " world");
}

#[test]
fn test_parse_json_link() {
    let json = parse_json(&[], "[go](example.com)");
    let object = &json[0]["object"];
    assert_eq!(json[0]["type"], "embedded");
    assert_eq!(object["kind"], "link");
    assert_eq!(object["url"], "https://example.com");
    assert_eq!(object["content"]["text"], "go");
}

#[test]
fn test_parse_placeholder_argument() {
    let json = parse_json(&["--placeholder", "name=Ada"], "Hi {name}!");
    let runs = json.as_array().unwrap();
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[1]["object"]["kind"], "placeholder");
    assert_eq!(runs[1]["object"]["value"], "Ada");
}

#[test]
fn test_parse_bad_placeholder_argument() {
    cargo_bin_cmd!("runmark")
        .args(["parse", "--placeholder", "oops"])
        .write_stdin("x")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Expected KEY=TEXT"));
}

#[test]
fn test_parse_diagnostics_to_stderr() {
    cargo_bin_cmd!("runmark")
        .args(["parse", "--diagnostics"])
        .write_stdin("*a~~b*c~~")
        .assert()
        .success()
        .stderr(predicate::str::contains("cross another pair"));
}

#[test]
fn test_parse_file_with_discovered_config() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("message.txt");
    fs::write(&test_file, "`code`").unwrap();
    fs::write(
        temp_dir.path().join(".runmark.toml"),
        "[styles.code]\nfont_family = \"Iosevka\"\n",
    )
    .unwrap();

    let output = cargo_bin_cmd!("runmark")
        .args(["parse", "--json", test_file.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["style"]["font_family"], "Iosevka");
}

#[test]
fn test_parse_theme_flag() {
    let light = parse_json(&["--theme", "light"], "`x`");
    let dark = parse_json(&["--theme", "dark"], "`x`");
    assert_ne!(
        light[0]["style"]["background"],
        dark[0]["style"]["background"]
    );
}

#[test]
fn test_parse_explicit_config_depth() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("custom.toml");
    fs::write(&config_file, "max_nesting_depth = 1").unwrap();

    let json = parse_json(
        &["--config", config_file.to_str().unwrap()],
        "**a*b*a**",
    );
    let runs = json.as_array().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["text"], "a*b*a");
}
