//! Ranking several evaluated targets
//!
//! [`compare`] is a pure transformation over already-computed reports: it
//! never touches the filesystem. Rendering to Markdown lives here too, since
//! it only depends on the comparison data.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::report::EvaluationReport;

/// One successfully evaluated target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub label: String,
    #[serde(flatten)]
    pub report: EvaluationReport,
}

/// A target whose evaluation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub label: String,
    pub error: String,
}

/// One target's score in a single category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub label: String,
    pub score: f64,
    pub max: f64,
    pub percentage: f64,
}

/// All ranked targets' scores for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub title: String,
    pub rows: Vec<CategoryRow>,
}

/// Ranked results of evaluating several targets with one rubric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Successful evaluations, best first
    pub results: Vec<RankedResult>,
    pub failures: Vec<Failure>,
    /// Per-category tables, in the order categories first appear
    pub categories: Vec<CategoryBreakdown>,
    /// False when the run stopped before every target was evaluated
    pub complete: bool,
}

impl ComparisonReport {
    /// Ranked labels, best first
    pub fn labels(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.failures.is_empty()
    }
}

/// Rank evaluation outcomes by descending total score.
///
/// The sort is stable: targets with equal totals keep their input order.
/// Failed evaluations are kept aside as [`Failure`]s in input order.
pub fn compare<E>(entries: Vec<(String, Result<EvaluationReport, E>)>) -> ComparisonReport
where
    E: std::fmt::Display,
{
    let mut results = Vec::new();
    let mut failures = Vec::new();
    for (label, outcome) in entries {
        match outcome {
            Ok(report) => results.push(RankedResult { label, report }),
            Err(e) => failures.push(Failure {
                label,
                error: e.to_string(),
            }),
        }
    }

    results.sort_by(|a, b| b.report.total_score.total_cmp(&a.report.total_score));
    let categories = breakdown(&results);

    ComparisonReport {
        results,
        failures,
        categories,
        complete: true,
    }
}

fn breakdown(results: &[RankedResult]) -> Vec<CategoryBreakdown> {
    let mut categories: Vec<CategoryBreakdown> = Vec::new();
    for result in results {
        for score in &result.report.category_scores {
            if !categories.iter().any(|c| c.name == score.name) {
                categories.push(CategoryBreakdown {
                    name: score.name.clone(),
                    title: score.title.clone(),
                    rows: Vec::new(),
                });
            }
        }
    }

    for category in &mut categories {
        let default_max = results
            .iter()
            .find_map(|r| r.report.category(&category.name))
            .map(|c| c.max)
            .unwrap_or(0.0);
        category.rows = results
            .iter()
            .map(|r| match r.report.category(&category.name) {
                Some(score) => CategoryRow {
                    label: r.label.clone(),
                    score: score.score,
                    max: score.max,
                    percentage: score.percentage(),
                },
                None => CategoryRow {
                    label: r.label.clone(),
                    score: 0.0,
                    max: default_max,
                    percentage: 0.0,
                },
            })
            .collect();
    }
    categories
}

/// Render a comparison as a Markdown document
pub fn render_markdown(report: &ComparisonReport, timestamp: DateTime<Utc>) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# Scorecard Comparison Report\n");
    let _ = writeln!(md, "Generated: {}\n", timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    if !report.complete {
        let _ = writeln!(md, "> Interrupted: only part of the targets were evaluated.\n");
    }

    let _ = writeln!(md, "## Ranking\n");
    let _ = writeln!(md, "| Rank | Target | Score | Percentage |");
    let _ = writeln!(md, "|------|--------|-------|------------|");
    for (index, result) in report.results.iter().enumerate() {
        let _ = writeln!(
            md,
            "| {} | {} | {:.1}/{} | {:.1}% |",
            index + 1,
            result.label,
            result.report.total_score,
            result.report.max_score,
            result.report.percentage
        );
    }

    if !report.categories.is_empty() {
        let _ = writeln!(md, "\n## Categories\n");
    }
    for category in &report.categories {
        let _ = writeln!(md, "### {}\n", category.title);
        let _ = writeln!(md, "| Target | Score | Percentage |");
        let _ = writeln!(md, "|--------|-------|------------|");
        for row in &category.rows {
            let _ = writeln!(
                md,
                "| {} | {:.1}/{} | {:.1}% |",
                row.label, row.score, row.max, row.percentage
            );
        }
        md.push('\n');
    }

    render_file_stats(&mut md, report);

    if !report.failures.is_empty() {
        let _ = writeln!(md, "\n## Failures\n");
        for failure in &report.failures {
            let _ = writeln!(md, "- {}: {}", failure.label, failure.error);
        }
    }
    md
}

fn render_file_stats(md: &mut String, report: &ComparisonReport) {
    let groups: Vec<&str> = report
        .results
        .first()
        .map(|r| {
            r.report
                .file_stats
                .files_by_extension_group
                .iter()
                .map(|g| g.name.as_str())
                .collect()
        })
        .unwrap_or_default();

    let _ = writeln!(md, "## File Statistics\n");
    let mut header = String::from("| Target | Total files |");
    let mut rule = String::from("|--------|-------------|");
    for group in &groups {
        let _ = write!(header, " {} |", group);
        rule.push_str(&format!("{}|", "-".repeat(group.len() + 2)));
    }
    let _ = writeln!(md, "{}\n{}", header, rule);

    for result in &report.results {
        let stats = &result.report.file_stats;
        let _ = write!(md, "| {} | {} |", result.label, stats.total_files);
        for group in &groups {
            let _ = write!(md, " {} |", stats.group(group));
        }
        md.push('\n');
    }
}
