//! Writing reports to disk
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! destination, so readers never observe a half-written report. Any failure
//! becomes [`ScorecardError::ReportPersist`]; the in-memory report is never
//! affected.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::compare::{ComparisonReport, Failure, RankedResult};
use crate::error::{Result, ScorecardError};
use crate::report::EvaluationReport;
use crate::rubric::Rubric;

/// Rubric identity recorded next to a persisted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RubricStamp {
    pub name: String,
    /// Hex SHA-256 of the rubric's canonical JSON
    pub fingerprint: String,
}

impl RubricStamp {
    pub fn of(rubric: &Rubric) -> Result<Self> {
        Ok(Self {
            name: rubric.name.clone(),
            fingerprint: rubric.fingerprint()?,
        })
    }
}

/// Envelope for a per-target report file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedReport<'a> {
    pub timestamp: String,
    pub project_path: String,
    pub rubric: RubricStamp,
    #[serde(flatten)]
    pub report: &'a EvaluationReport,
}

impl<'a> PersistedReport<'a> {
    pub fn new(
        report: &'a EvaluationReport,
        project_path: &Path,
        rubric: RubricStamp,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: rfc3339(timestamp),
            project_path: project_path.display().to_string(),
            rubric,
            report,
        }
    }
}

/// Envelope for the aggregate comparison file
#[derive(Debug, Serialize)]
pub struct PersistedComparison<'a> {
    pub timestamp: String,
    /// Number of successfully evaluated targets
    pub total: usize,
    pub complete: bool,
    pub results: &'a [RankedResult],
    pub failures: &'a [Failure],
}

impl<'a> PersistedComparison<'a> {
    pub fn new(comparison: &'a ComparisonReport, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: rfc3339(timestamp),
            total: comparison.results.len(),
            complete: comparison.complete,
            results: &comparison.results,
            failures: &comparison.failures,
        }
    }
}

fn rfc3339(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serialize `value` as pretty JSON and write it atomically
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut data =
        serde_json::to_vec_pretty(value).map_err(|e| ScorecardError::report_persist(path, e))?;
    data.push(b'\n');
    write_bytes(path, &data)
}

/// Write text atomically
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    let tmp_path = temp_path(path)?;
    let written = write_temp(&tmp_path, data).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(ScorecardError::report_persist(path, e));
    }
    tracing::debug!(path = %path.display(), bytes = data.len(), "report written");
    Ok(())
}

fn write_temp(tmp_path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ScorecardError::report_persist(path, "not a file path"))?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::report::{CategoryScore, FileStats};
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn report() -> EvaluationReport {
        EvaluationReport::new(
            vec![CategoryScore {
                name: "structure".to_string(),
                title: "structure".to_string(),
                score: 4.0,
                max: 10.0,
                details: vec!["✓ src exists".to_string()],
            }],
            FileStats::default(),
        )
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_persisted_report_flattens_report_fields() {
        let report = report();
        let stamp = RubricStamp {
            name: "tiny".to_string(),
            fingerprint: "abc".to_string(),
        };
        let envelope = PersistedReport::new(&report, Path::new("/tmp/project"), stamp, timestamp());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["timestamp"], "2026-03-01T12:00:00.000Z");
        assert_eq!(value["projectPath"], "/tmp/project");
        assert_eq!(value["rubric"]["name"], "tiny");
        assert_eq!(value["totalScore"], 4.0);
        assert_eq!(value["categoryScores"]["structure"]["score"], 4.0);
    }

    #[test]
    fn test_write_json_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("evaluation-report.json");
        fs::write(&path, "stale").unwrap();

        write_json(&path, &report()).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["percentage"], 40.0);
        assert!(!dir.path().join(".evaluation-report.json.tmp").exists());
    }

    #[test]
    fn test_unwritable_destination_is_report_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("report.json");
        let err = write_json(&path, &report()).unwrap_err();
        assert!(matches!(err, ScorecardError::ReportPersist { .. }));
        assert_eq!(err.exit_code(), crate::error::ExitCode::Data);
    }

    #[test]
    fn test_persisted_comparison_counts_results() {
        let comparison = compare(vec![
            ("a".to_string(), Ok(report())),
            ("b".to_string(), Err("boom".to_string())),
        ]);
        let value = serde_json::to_value(PersistedComparison::new(&comparison, timestamp())).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["complete"], true);
        assert_eq!(value["results"][0]["label"], "a");
        assert_eq!(value["failures"][0]["error"], "boom");
    }
}
