use crate::cli::support::scorecard;
use predicates::prelude::*;

// ============================================================================
// Help, version and exit code tests
// ============================================================================

#[test]
fn test_help_flag() {
    scorecard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: scorecard"))
        .stdout(predicate::str::contains("evaluate"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("rubric"));
}

#[test]
fn test_version_flag() {
    scorecard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scorecard"));
}

#[test]
fn test_no_command_prints_hint() {
    scorecard()
        .assert()
        .success()
        .stdout(predicate::str::contains("Run `scorecard --help`"));
}

#[test]
fn test_unknown_format_exit_code_2() {
    scorecard()
        .args(["--format", "records", "rubric"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_argument_json_usage_error() {
    scorecard()
        .args(["--format", "json", "evaluate", ".", "--bogus-flag"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_missing_argument_exit_code_2() {
    scorecard().arg("evaluate").assert().code(2);
}
