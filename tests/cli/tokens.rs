//! Tokens subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn test_tokens_one_per_line() {
    let output = cargo_bin_cmd!("runmark")
        .arg("tokens")
        .write_stdin("a **b** \\*")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"0 TEXT "a ""#,
            r#"2 BOLD "**""#,
            r#"4 TEXT "b""#,
            r#"5 BOLD "**""#,
            r#"7 TEXT " ""#,
            r#"8 TEXT "\\*""#,
        ]
    );
}

#[test]
fn test_tokens_link_window() {
    let output = cargo_bin_cmd!("runmark")
        .arg("tokens")
        .write_stdin("[a](b)\n")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let kinds: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split(' ').nth(1))
        .collect();
    assert_eq!(
        kinds,
        vec!["LINK_START", "TEXT", "LINK_SEPARATOR", "TEXT", "LINK_END"]
    );
}

#[test]
fn test_tokens_ignores_config() {
    // Tokenizing never reads configuration, so a bad --config is harmless
    cargo_bin_cmd!("runmark")
        .args(["tokens", "--config", "/definitely/not/here.toml"])
        .write_stdin("x")
        .assert()
        .success()
        .stdout("0 TEXT \"x\"\n");
}
