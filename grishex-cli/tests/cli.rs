use assert_cmd::cargo::cargo_bin_cmd;
use grishex_lexer::testing::SAMPLE_CONTRACT;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_source(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write source");
    path
}

#[test]
fn tokens_table_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "a.grx", "contract A {}\n");

    cargo_bin_cmd!("grishex")
        .current_dir(dir.path())
        .arg("tokens")
        .arg(&path)
        .arg("--no-whitespace")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1:1   Keyword        \"contract\"")
                .and(predicate::str::contains("Bracket        \"{\""))
                .and(predicate::str::contains("Whitespace").not()),
        );
}

#[test]
fn tokens_simple_from_stdin_round_trips() {
    cargo_bin_cmd!("grishex")
        .arg("tokens")
        .arg("-")
        .arg("--format")
        .arg("simple")
        .write_stdin(SAMPLE_CONTRACT)
        .assert()
        .success()
        .stdout(SAMPLE_CONTRACT);
}

#[test]
fn tokens_json_is_parseable() {
    let output = cargo_bin_cmd!("grishex")
        .args(["tokens", "-", "--format", "json"])
        .write_stdin("x >>>= 2")
        .output()
        .unwrap();
    assert!(output.status.success());
    let tokens: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tokens[2]["kind"], "Operator");
    assert_eq!(tokens[2]["lexeme"], ">>>=");
}

#[test]
fn unknown_format_exits_with_usage_error() {
    cargo_bin_cmd!("grishex")
        .args(["tokens", "-", "--format", "xml"])
        .write_stdin("x")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown format 'xml'"));
}

#[test]
fn missing_file_exits_with_usage_error() {
    cargo_bin_cmd!("grishex")
        .args(["check", "does-not-exist.grx"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: cannot read does-not-exist.grx"));
}

#[test]
fn check_clean_source() {
    cargo_bin_cmd!("grishex")
        .args(["check", "-"])
        .write_stdin("contract A {\n    state {\n        x: uint\n    }\n}\n")
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn check_reports_errors_and_fails() {
    cargo_bin_cmd!("grishex")
        .args(["check", "-"])
        .write_stdin("contract A {\n    s = \"open\n")
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("<stdin>:1:12: error[unmatched-opener]")
                .and(predicate::str::contains("<stdin>:2:9: error[unterminated-string]")),
        );
}

#[test]
fn structure_lists_region_folds() {
    let output = cargo_bin_cmd!("grishex")
        .args(["structure", "-"])
        .write_stdin(SAMPLE_CONTRACT)
        .output()
        .unwrap();
    assert!(output.status.success());
    let structure: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let regions: Vec<_> = structure["folds"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|fold| fold["kind"] == "RegionMarker")
        .map(|fold| (fold["start_line"].as_u64().unwrap(), fold["end_line"].as_u64().unwrap()))
        .collect();
    assert_eq!(regions, vec![(0, 35), (17, 27)]);
}

#[test]
fn config_file_and_tab_size_flag() {
    let dir = TempDir::new().unwrap();
    let config = write_source(&dir, "custom.toml", "[folding]\nindentation = false\n");
    let source = "  a\n\tb\n";

    // Indentation folding disabled by the file
    cargo_bin_cmd!("grishex")
        .current_dir(dir.path())
        .args(["structure", "-", "--config"])
        .arg(&config)
        .write_stdin(source)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"folds\": []"));

    // A tab of 2 columns puts both lines at the same depth
    cargo_bin_cmd!("grishex")
        .current_dir(dir.path())
        .args(["structure", "-", "--tab-size", "2"])
        .write_stdin(source)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"folds\": []"));

    cargo_bin_cmd!("grishex")
        .current_dir(dir.path())
        .args(["structure", "-"])
        .write_stdin(source)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"Indentation\""));
}

#[test]
fn project_config_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write_source(&dir, "grishex.toml", "[output]\nformat = \"simple\"\n");

    cargo_bin_cmd!("grishex")
        .current_dir(dir.path())
        .args(["tokens", "-"])
        .write_stdin("a + b")
        .assert()
        .success()
        .stdout("a + b");
}

#[test]
fn language_configuration_as_json() {
    cargo_bin_cmd!("grishex")
        .arg("language")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"id\": \"grishex\"")
                .and(predicate::str::contains("\"line_comment\": \"//\"")),
        );
}
