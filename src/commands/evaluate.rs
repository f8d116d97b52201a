//! `scorecard evaluate` - score one project directory

use std::path::Path;

use chrono::Utc;
use scorecard_core::error::Result;
use scorecard_core::evaluator::Evaluator;
use scorecard_core::format::OutputFormat;
use scorecard_core::persist::{write_json, PersistedReport, RubricStamp};
use scorecard_core::report::EvaluationReport;
use scorecard_core::rubric::Rubric;

use super::console::{progress_sink, rule};
use super::dispatch::CommandContext;

/// Execute the evaluate command
pub fn execute(ctx: &CommandContext, path: &Path, no_write: bool) -> Result<()> {
    let config = ctx.config()?;
    let rubric = ctx.rubric(&config)?;
    let root = ctx.resolve(path);

    let sink = progress_sink(ctx.cli);
    let report = Evaluator::new(sink.as_ref()).evaluate(&root, &rubric)?;

    let envelope = PersistedReport::new(&report, &root, RubricStamp::of(&rubric)?, Utc::now());
    let report_path = root.join(&config.report_file);
    if !no_write {
        write_json(&report_path, &envelope)?;
    }

    match ctx.cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        OutputFormat::Human => {
            if ctx.cli.quiet {
                println!("{}", total_line(&report));
            } else {
                print_summary(&root, &rubric, &report);
                if !no_write {
                    println!("\n✓ Report saved: {}", report_path.display());
                }
            }
        }
    }

    tracing::debug!(elapsed = ?ctx.start.elapsed(), "evaluate");
    Ok(())
}

fn total_line(report: &EvaluationReport) -> String {
    format!(
        "Total: {:.1}/{} ({:.1}%)",
        report.total_score, report.max_score, report.percentage
    )
}

fn print_summary(root: &Path, rubric: &Rubric, report: &EvaluationReport) {
    println!("\n{}", rule());
    println!("Evaluation report");
    println!("{}", rule());

    println!("\nProject: {}", root.display());
    println!("Rubric: {}", rubric.name);

    println!("\nFiles:");
    println!("  - total: {}", report.file_stats.total_files);
    for group in &report.file_stats.files_by_extension_group {
        println!("  - {}: {}", group.name, group.count);
    }

    println!("\nScores:");
    for (index, category) in report.category_scores.iter().enumerate() {
        println!(
            "  {}. {}: {:.1}/{}",
            index + 1,
            category.title,
            category.score,
            category.max
        );
    }

    println!("\n{}", total_line(report));

    println!("\nDetails:");
    for category in &report.category_scores {
        for detail in &category.details {
            println!("  {}", detail);
        }
    }
    println!("\n{}", rule());
}
