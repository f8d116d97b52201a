use crate::cli::support::{scorecard, write, GAPPED_RUBRIC, TINY_RUBRIC};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Rubric command tests
// ============================================================================

#[test]
fn test_rubric_prints_builtin_as_toml() {
    let dir = tempdir().unwrap();

    scorecard()
        .current_dir(dir.path())
        .arg("rubric")
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"spa-typescript\""))
        .stdout(predicate::str::contains("type = \"ratio_threshold\""));
}

#[test]
fn test_rubric_json_output() {
    let dir = tempdir().unwrap();

    let output = scorecard()
        .current_dir(dir.path())
        .args(["--format", "json", "rubric"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["structure", "api", "types", "config"]);
}

#[test]
fn test_rubric_prints_configured_rubric() {
    let dir = tempdir().unwrap();
    write(dir.path(), "tiny.toml", TINY_RUBRIC);

    scorecard()
        .current_dir(dir.path())
        .args(["--rubric", "tiny.toml", "rubric"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"tiny\""))
        .stdout(predicate::str::contains("spa-typescript").not());
}

#[test]
fn test_rubric_check_valid_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "tiny.toml", TINY_RUBRIC);

    scorecard()
        .current_dir(dir.path())
        .args(["rubric", "--check", "tiny.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid: rubric tiny with 1 categories, max score 2"));
}

#[test]
fn test_rubric_check_band_gap_exits_2() {
    let dir = tempdir().unwrap();
    write(dir.path(), "gapped.toml", GAPPED_RUBRIC);

    scorecard()
        .current_dir(dir.path())
        .args(["rubric", "--check", "gapped.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("gap"));
}

#[test]
fn test_rubric_check_json_error_envelope() {
    let dir = tempdir().unwrap();
    write(dir.path(), "gapped.toml", GAPPED_RUBRIC);

    scorecard()
        .current_dir(dir.path())
        .args(["--format", "json", "rubric", "--check", "gapped.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"invalid_rubric\""));
}

#[test]
fn test_rubric_check_directory_is_usage_error() {
    let dir = tempdir().unwrap();

    scorecard()
        .current_dir(dir.path())
        .args(["--format", "json", "rubric", "--check", "."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}
