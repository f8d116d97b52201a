use crate::cli::support::{fixture_project, scorecard};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Logging tests
// ============================================================================

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    scorecard()
        .args(["--log-level", "debug", "evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("evaluation complete"));
}

#[test]
fn test_default_level_hides_debug_messages() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    scorecard()
        .args(["evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("evaluation complete").not());
}

#[test]
fn test_verbose_shows_debug_messages() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    scorecard()
        .args(["-v", "evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("category scored"));
}

#[test]
fn test_log_json_emits_structured_lines() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    scorecard()
        .args(["--log-level", "debug", "--log-json", "evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("\"message\":\"evaluation complete\""));
}

#[test]
fn test_scorecard_log_env_overrides_level() {
    let dir = tempdir().unwrap();
    fixture_project(dir.path());

    scorecard()
        .env("SCORECARD_LOG", "scorecard_core=debug")
        .args(["evaluate", "--no-write"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("evaluation complete"));
}
