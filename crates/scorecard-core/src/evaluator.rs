//! Rubric evaluation
//!
//! [`Evaluator::evaluate`] scores one target tree against one rubric. It is
//! synchronous and keeps no state between calls: every category gets a fresh
//! [`rules::CategoryContext`] and re-reads whatever files it needs.

mod metrics;
mod rules;
mod stats;

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::error::{Result, ScorecardError};
use crate::report::{CategoryScore, EvaluationReport};
use crate::rubric::{validate, Category, Rubric};
use crate::sink::{ReportSink, SinkLevel, TracingSink};
use crate::trace_time;

pub use stats::collect_file_stats;

/// Scores target trees against rubrics, reporting progress to a sink
pub struct Evaluator<'a> {
    sink: &'a dyn ReportSink,
}

impl<'a> Evaluator<'a> {
    pub fn new(sink: &'a dyn ReportSink) -> Self {
        Self { sink }
    }

    /// Evaluate `root` against `rubric`.
    ///
    /// The rubric is validated before anything is read, and the root must be
    /// a readable directory. Per-file read failures never fail the call.
    pub fn evaluate(&self, root: &Path, rubric: &Rubric) -> Result<EvaluationReport> {
        let start = Instant::now();

        validate(rubric)?;
        ensure_root(root)?;

        self.sink.emit(
            SinkLevel::Info,
            &format!("Evaluating {} with rubric {}", root.display(), rubric.name),
        );

        let scores: Vec<CategoryScore> = rubric
            .categories
            .iter()
            .map(|category| self.score_category(root, category))
            .collect();

        let file_stats = collect_file_stats(root, &rubric.file_stats);
        let report = EvaluationReport::new(scores, file_stats);

        trace_time!(start, "evaluate");
        tracing::debug!(
            root = %root.display(),
            total = report.total_score,
            max = report.max_score,
            percentage = report.percentage,
            "evaluation complete"
        );
        Ok(report)
    }

    fn score_category(&self, root: &Path, category: &Category) -> CategoryScore {
        let start = Instant::now();
        self.sink
            .emit(SinkLevel::Info, &format!("Checking {}...", category.label()));

        let (accumulated, details) = match &category.requires {
            Some(required) if !root.join(required).exists() => {
                (0.0, vec![format!("✗ {} missing, checks skipped", required)])
            }
            _ => run_checks(root, category),
        };

        let score = accumulated.clamp(0.0, category.max_points);
        let level = if score >= category.good_threshold() {
            SinkLevel::Success
        } else {
            SinkLevel::Warning
        };
        self.sink.emit(
            level,
            &format!("  Score: {:.1}/{}", score, category.max_points),
        );

        trace_time!(start, "score_category", category = category.name.as_str());
        tracing::debug!(
            category = %category.name,
            accumulated,
            score,
            max = category.max_points,
            "category scored"
        );

        CategoryScore {
            name: category.name.clone(),
            title: category.label().to_string(),
            score,
            max: category.max_points,
            details,
        }
    }
}

/// Apply every rule of a category in order, returning the unclamped sum and
/// one detail per rule
fn run_checks(root: &Path, category: &Category) -> (f64, Vec<String>) {
    let mut ctx = rules::CategoryContext::new(root);
    let mut accumulated = 0.0;
    let mut details = Vec::with_capacity(category.checks.len());

    for rule in &category.checks {
        let outcome = rules::apply(rule, &mut ctx);
        tracing::trace!(
            category = %category.name,
            rule = rule.kind(),
            contribution = outcome.contribution,
            satisfied = outcome.satisfied,
            "rule evaluated"
        );
        accumulated += outcome.contribution;
        if outcome.satisfied {
            ctx.satisfied += 1;
        }
        details.push(outcome.detail);
    }

    (accumulated, details)
}

fn ensure_root(root: &Path) -> Result<()> {
    let readable_dir = root.is_dir() && fs::read_dir(root).is_ok();
    if readable_dir {
        Ok(())
    } else {
        Err(ScorecardError::RootNotFound {
            path: root.to_path_buf(),
        })
    }
}

/// Evaluate `root` against `rubric`, reporting progress through `tracing`
pub fn evaluate(root: &Path, rubric: &Rubric) -> Result<EvaluationReport> {
    Evaluator::new(&TracingSink).evaluate(root, rubric)
}
