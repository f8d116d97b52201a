//! `scorecard compare` - evaluate every project below a root and rank them

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use scorecard_core::compare::{compare, render_markdown, ComparisonReport};
use scorecard_core::config::ScorecardConfig;
use scorecard_core::error::{Result, ScorecardError};
use scorecard_core::evaluator::Evaluator;
use scorecard_core::format::OutputFormat;
use scorecard_core::persist::{write_json, write_text, PersistedComparison, PersistedReport, RubricStamp};
use scorecard_core::report::EvaluationReport;
use scorecard_core::rubric::Rubric;
use scorecard_core::sink::{ReportSink, SinkLevel};

use super::console::{progress_sink, rule};
use super::dispatch::CommandContext;

/// Execute the compare command
pub fn execute(ctx: &CommandContext, root: Option<&Path>, no_write: bool) -> Result<()> {
    let config = ctx.config()?;
    let rubric = ctx.rubric(&config)?;
    let root = ctx.resolve(root.unwrap_or_else(|| Path::new(".")));
    let human = ctx.cli.format == OutputFormat::Human && !ctx.cli.quiet;

    let targets = config.discovery.discover(&root)?;
    if targets.is_empty() {
        tracing::warn!(root = %root.display(), marker = %config.discovery.marker, "no targets found");
        if ctx.cli.format == OutputFormat::Json {
            let empty = compare::<ScorecardError>(Vec::new());
            println!(
                "{}",
                serde_json::to_string_pretty(&PersistedComparison::new(&empty, Utc::now()))?
            );
        } else if !ctx.cli.quiet {
            eprintln!(
                "warning: no targets found under {} (each target needs a {})",
                root.display(),
                config.discovery.marker
            );
        }
        return Ok(());
    }

    if human {
        println!("Found {} target(s):", targets.len());
        for (label, _) in &targets {
            println!("  - {}", label);
        }
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    let _ = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    });

    let sink = progress_sink(ctx.cli);
    let run = TargetRun {
        ctx,
        config: &config,
        rubric: &rubric,
        stamp: RubricStamp::of(&rubric)?,
        sink: sink.as_ref(),
        no_write,
    };
    let mut entries = Vec::with_capacity(targets.len());
    for (label, path) in &targets {
        if interrupted.load(Ordering::SeqCst) {
            tracing::info!(
                evaluated = entries.len(),
                total = targets.len(),
                "comparison interrupted, saving partial results"
            );
            break;
        }
        entries.push((label.clone(), run.evaluate(label, path)));
    }

    let mut comparison = compare(entries);
    comparison.complete = comparison.results.len() + comparison.failures.len() == targets.len();

    let now = Utc::now();
    if !no_write {
        save_comparison(&root, &config, &comparison, now, human)?;
    }
    output_comparison(ctx, &comparison, now)?;

    tracing::debug!(elapsed = ?ctx.start.elapsed(), "compare");
    if comparison.complete {
        Ok(())
    } else {
        Err(ScorecardError::Interrupted)
    }
}

/// Shared state for evaluating the targets of one comparison
struct TargetRun<'a> {
    ctx: &'a CommandContext<'a>,
    config: &'a ScorecardConfig,
    rubric: &'a Rubric,
    stamp: RubricStamp,
    sink: &'a dyn ReportSink,
    no_write: bool,
}

impl TargetRun<'_> {
    /// Evaluate one target and persist its report. A failed write is
    /// reported but keeps the evaluation result.
    fn evaluate(&self, label: &str, path: &Path) -> Result<EvaluationReport> {
        let cli = self.ctx.cli;
        if cli.format == OutputFormat::Human && !cli.quiet {
            println!("\n{}\nEvaluating: {}\n{}", rule(), label, rule());
        }

        let report = match Evaluator::new(self.sink).evaluate(path, self.rubric) {
            Ok(report) => report,
            Err(e) => {
                self.sink.emit(
                    SinkLevel::Error,
                    &format!("Evaluation failed: {}: {}", label, e),
                );
                return Err(e);
            }
        };

        if !self.no_write {
            let envelope = PersistedReport::new(&report, path, self.stamp.clone(), Utc::now());
            if let Err(e) = write_json(&path.join(&self.config.report_file), &envelope) {
                self.sink.emit(
                    SinkLevel::Warning,
                    &format!("Report not saved: {}: {}", label, e),
                );
            }
        }
        Ok(report)
    }
}

fn save_comparison(
    root: &Path,
    config: &ScorecardConfig,
    comparison: &ComparisonReport,
    timestamp: DateTime<Utc>,
    human: bool,
) -> Result<()> {
    let json_path = root.join(&config.comparison_json);
    write_json(&json_path, &PersistedComparison::new(comparison, timestamp))?;

    let markdown_path = root.join(&config.comparison_markdown);
    write_text(&markdown_path, &render_markdown(comparison, timestamp))?;

    if human {
        println!("\n✓ Comparison saved: {}", json_path.display());
        println!("✓ Markdown report saved: {}", markdown_path.display());
    }
    Ok(())
}

fn output_comparison(
    ctx: &CommandContext,
    comparison: &ComparisonReport,
    timestamp: DateTime<Utc>,
) -> Result<()> {
    match ctx.cli.format {
        OutputFormat::Json => {
            let document = PersistedComparison::new(comparison, timestamp);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        OutputFormat::Human => {
            println!("\n{}\nComparison\n{}", rule(), rule());
            println!("\nRanking:");
            for (index, result) in comparison.results.iter().enumerate() {
                println!(
                    "  {}. {}: {:.1}/{} ({:.1}%)",
                    index + 1,
                    result.label,
                    result.report.total_score,
                    result.report.max_score,
                    result.report.percentage
                );
            }

            if !ctx.cli.quiet {
                for category in &comparison.categories {
                    println!("\n{}:", category.title);
                    for row in &category.rows {
                        println!("  {}: {:.1}/{}", row.label, row.score, row.max);
                    }
                }
            }

            if !comparison.failures.is_empty() {
                println!("\nFailures:");
                for failure in &comparison.failures {
                    println!("  {}: {}", failure.label, failure.error);
                }
            }
        }
    }
    Ok(())
}
