//! `scorecard rubric` - print or validate rubrics

use std::path::Path;

use scorecard_core::bail_usage;
use scorecard_core::error::Result;
use scorecard_core::format::OutputFormat;
use scorecard_core::rubric::{load_rubric, Rubric};

use super::dispatch::CommandContext;

/// Execute the rubric command
pub fn execute(ctx: &CommandContext, check: Option<&Path>) -> Result<()> {
    match check {
        Some(path) => check_rubric(ctx, &ctx.resolve(path)),
        None => {
            let config = ctx.config()?;
            let rubric = ctx.rubric(&config)?;
            print_rubric(ctx, &rubric)
        }
    }
}

fn print_rubric(ctx: &CommandContext, rubric: &Rubric) -> Result<()> {
    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rubric)?),
        OutputFormat::Human => print!("{}", rubric.to_toml_string()?),
    }
    Ok(())
}

fn check_rubric(ctx: &CommandContext, path: &Path) -> Result<()> {
    if path.is_dir() {
        bail_usage!(format!(
            "{} is a directory, expected a rubric file",
            path.display()
        ));
    }

    let rubric = load_rubric(path)?;
    let fingerprint = rubric.fingerprint()?;

    match ctx.cli.format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "valid": true,
                "path": path.display().to_string(),
                "name": rubric.name,
                "categories": rubric.categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
                "maxScore": rubric.max_score(),
                "fingerprint": fingerprint,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!(
                    "✓ {} is valid: rubric {} with {} categories, max score {}",
                    path.display(),
                    rubric.name,
                    rubric.categories.len(),
                    rubric.max_score()
                );
            }
        }
    }
    Ok(())
}
