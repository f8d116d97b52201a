use std::fs;

use crate::cli::support::{bare_project, fixture_project, scorecard, write};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Compare command tests
// ============================================================================

fn workspace() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    bare_project(&dir.path().join("alpha"));
    fixture_project(&dir.path().join("beta"));
    bare_project(&dir.path().join(".cache"));
    bare_project(&dir.path().join("node_modules"));
    fs::create_dir_all(dir.path().join("notes")).unwrap();
    dir
}

#[test]
fn test_compare_ranks_targets_and_writes_reports() {
    let dir = workspace();

    scorecard()
        .current_dir(dir.path())
        .arg("compare")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 target(s):"))
        .stdout(predicate::str::contains("Evaluating: alpha"))
        .stdout(predicate::str::contains("  1. beta: 16.3/33 (49.5%)"))
        .stdout(predicate::str::contains("  2. alpha: 1.0/33 (3.0%)"))
        .stdout(predicate::str::contains(".cache").not());

    assert!(dir.path().join("alpha/evaluation-report.json").exists());
    assert!(dir.path().join("beta/evaluation-report.json").exists());
    assert!(!dir.path().join("node_modules/evaluation-report.json").exists());

    let comparison: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("comparison-report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(comparison["total"], 2);
    assert_eq!(comparison["complete"], true);
    assert_eq!(comparison["results"][0]["label"], "beta");
    assert_eq!(comparison["results"][1]["label"], "alpha");
    assert_eq!(comparison["failures"].as_array().unwrap().len(), 0);

    let markdown = fs::read_to_string(dir.path().join("COMPARISON_REPORT.md")).unwrap();
    assert!(markdown.contains("| 1 | beta | 16.3/33 | 49.5% |"));
    assert!(markdown.contains("### Type definitions"));
    assert!(markdown.contains("| Target | Total files | typescript | components |"));
}

#[test]
fn test_compare_explicit_root_json() {
    let dir = workspace();

    let output = scorecard()
        .args(["--format", "json", "compare", "--no-write"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["results"][0]["label"], "beta");
    assert_eq!(json["results"][0]["categoryScores"]["config"]["score"], 3.0);
    assert!(!dir.path().join("comparison-report.json").exists());
    assert!(!dir.path().join("beta/evaluation-report.json").exists());
}

#[test]
fn test_compare_without_targets_warns_and_succeeds() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();

    scorecard()
        .current_dir(dir.path())
        .arg("compare")
        .assert()
        .success()
        .stderr(predicate::str::contains("no targets found"));

    assert!(!dir.path().join("comparison-report.json").exists());
}

#[test]
fn test_compare_missing_root_exits_1() {
    let dir = tempdir().unwrap();

    scorecard()
        .current_dir(dir.path())
        .args(["compare", "nowhere"])
        .assert()
        .code(1);
}

#[test]
fn test_compare_uses_configured_discovery() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "scorecard.toml",
        "comparison_markdown = \"RANKING.md\"\n[discovery]\nmarker = \"Cargo.toml\"\nexclude = []\n",
    );
    write(dir.path(), "crate-a/Cargo.toml", "[package]\n");
    bare_project(&dir.path().join("web"));

    scorecard()
        .current_dir(dir.path())
        .args(["-q", "compare"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. crate-a: 0.0/33 (0.0%)"))
        .stdout(predicate::str::contains("web").not());

    assert!(dir.path().join("RANKING.md").exists());
}
