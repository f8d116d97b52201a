use std::fs;

use crate::cli::support::{fixture_project, scorecard, write, TINY_RUBRIC};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Evaluate command tests
// ============================================================================

#[test]
fn test_evaluate_prints_summary_and_writes_report() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("claude");
    fixture_project(&project);

    scorecard()
        .current_dir(dir.path())
        .args(["evaluate", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking Project structure..."))
        .stdout(predicate::str::contains("  1. Project structure: 5.0/10"))
        .stdout(predicate::str::contains("  2. API implementation: 5.0/10"))
        .stdout(predicate::str::contains("Total: 16.3/33 (49.5%)"))
        .stdout(predicate::str::contains("✗ src/services/account.ts missing"))
        .stdout(predicate::str::contains("Report saved"));

    let saved: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(project.join("evaluation-report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(saved["rubric"]["name"], "spa-typescript");
    assert_eq!(saved["rubric"]["fingerprint"].as_str().unwrap().len(), 64);
    assert_eq!(saved["categoryScores"]["structure"]["score"], 5.0);
    assert_eq!(saved["fileStats"]["filesByExtensionGroup"]["components"], 1);
    assert_eq!(saved["percentage"], 49.5);
    assert!(saved["projectPath"].as_str().unwrap().ends_with("claude"));
}

#[test]
fn test_evaluate_no_write_leaves_project_untouched() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    scorecard()
        .args(["evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved").not());

    assert!(!dir.path().join("evaluation-report.json").exists());
}

#[test]
fn test_evaluate_missing_path_exits_1() {
    let dir = tempdir().unwrap();

    scorecard()
        .current_dir(dir.path())
        .args(["evaluate", "does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("evaluation root not found"));
}

#[test]
fn test_evaluate_low_score_still_succeeds() {
    let dir = tempdir().unwrap();

    scorecard()
        .args(["evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 0.0/33 (0.0%)"));
}

#[test]
fn test_evaluate_json_output() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    let output = scorecard()
        .args(["--format", "json", "evaluate", "--no-write"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalScore"].as_f64().map(|t| (t * 10.0).round()), Some(163.0));
    assert_eq!(json["maxScore"], 33.0);
    let categories: Vec<&String> = json["categoryScores"].as_object().unwrap().keys().collect();
    assert_eq!(categories.len(), 4);
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_evaluate_quiet_prints_only_total() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    scorecard()
        .args(["-q", "evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("Total: 16.3/33 (49.5%)\n");
}

#[test]
fn test_evaluate_with_custom_rubric() {
    let dir = tempdir().unwrap();
    write(dir.path(), "rubric.toml", TINY_RUBRIC);
    write(dir.path(), "project/README.md", "# Tool\n\n## Usage\n");

    scorecard()
        .current_dir(dir.path())
        .args(["--rubric", "rubric.toml", "evaluate", "project", "--no-write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rubric: tiny"))
        .stdout(predicate::str::contains("  1. Documentation: 2.0/2"))
        .stdout(predicate::str::contains("✓ README.md contains \"Usage\""));
}

#[test]
fn test_evaluate_with_yaml_rubric() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "rubric.yaml",
        "name: yaml-rubric\ncategories:\n  - name: docs\n    maxPoints: 1\n    checks:\n      - type: path_exists\n        path: README.md\n        weight: 1\n",
    );
    fs::create_dir_all(dir.path().join("project")).unwrap();

    scorecard()
        .current_dir(dir.path())
        .args(["--rubric", "rubric.yaml", "-q", "evaluate", "project", "--no-write"])
        .assert()
        .success()
        .stdout("Total: 0.0/1 (0.0%)\n");
}

#[test]
fn test_evaluate_invalid_rubric_exits_2() {
    let dir = tempdir().unwrap();
    write(dir.path(), "rubric.toml", "[[categories]]\nname = \"a\"\nmax_points = -1.0\n");
    fs::create_dir_all(dir.path().join("project")).unwrap();

    scorecard()
        .current_dir(dir.path())
        .args(["--rubric", "rubric.toml", "evaluate", "project"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_points must be positive"));

    assert!(!dir.path().join("project/evaluation-report.json").exists());
}

#[test]
fn test_evaluate_uses_local_config() {
    let dir = tempdir().unwrap();
    write(dir.path(), "rubric.toml", TINY_RUBRIC);
    write(
        dir.path(),
        "scorecard.toml",
        "rubric = \"rubric.toml\"\nreport_file = \"score.json\"\n",
    );
    write(dir.path(), "project/README.md", "no usage section");

    scorecard()
        .current_dir(dir.path())
        .args(["-q", "evaluate", "project"])
        .assert()
        .success()
        .stdout("Total: 1.0/2 (50.0%)\n");

    assert!(dir.path().join("project/score.json").exists());
    assert!(!dir.path().join("project/evaluation-report.json").exists());
}

#[test]
fn test_evaluate_missing_config_file_is_usage_error() {
    let dir = tempdir().unwrap();

    scorecard()
        .current_dir(dir.path())
        .args(["--config", "missing.toml", "evaluate", "."])
        .assert()
        .code(2);
}
