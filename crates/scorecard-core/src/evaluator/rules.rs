//! Per-rule scoring
//!
//! Each rule yields exactly one [`RuleOutcome`]: a weight contribution, a
//! satisfied flag and one human-readable detail line.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use super::metrics::{compute, format_number, select_band};
use crate::files::{read_concatenated, read_text, resolve_file_set};
use crate::rubric::{Band, CheckRule, FileSet, MetricSource};

const FOUND: &str = "✓";
const PARTIAL: &str = "⚠";
const MISSING: &str = "✗";

/// Working state shared by the rules of one category
pub(crate) struct CategoryContext<'a> {
    pub root: &'a Path,
    /// Rules satisfied so far
    pub satisfied: usize,
    /// Metrics recorded so far, by name
    pub metrics: HashMap<String, f64>,
}

impl<'a> CategoryContext<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            satisfied: 0,
            metrics: HashMap::new(),
        }
    }
}

/// Result of applying one rule
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleOutcome {
    pub contribution: f64,
    pub satisfied: bool,
    pub detail: String,
}

impl RuleOutcome {
    fn hit(weight: f64, detail: String) -> Self {
        Self {
            contribution: weight,
            satisfied: true,
            detail,
        }
    }

    fn miss(detail: String) -> Self {
        Self {
            contribution: 0.0,
            satisfied: false,
            detail,
        }
    }
}

pub(crate) fn apply(rule: &CheckRule, ctx: &mut CategoryContext<'_>) -> RuleOutcome {
    match rule {
        CheckRule::PathExists { path, weight } => path_exists(ctx.root, path, *weight),
        CheckRule::ContentContains {
            files,
            substring,
            alternatives,
            weight,
        } => content_contains(ctx.root, files, substring, alternatives, *weight),
        CheckRule::RatioThreshold {
            metric,
            numerator,
            denominator,
            bands,
        } => ratio_threshold(ctx, metric, numerator, denominator, bands),
        CheckRule::CountThreshold {
            metric,
            count,
            bands,
        } => count_threshold(ctx, metric, count, bands),
        CheckRule::ScaledCount {
            metric,
            count,
            per_unit,
            cap,
        } => scaled_count(ctx, metric, count, *per_unit, *cap),
        CheckRule::JsonValue {
            path,
            any_of,
            weight,
        } => json_value(ctx.root, path, any_of, *weight),
    }
}

fn path_exists(root: &Path, path: &str, weight: f64) -> RuleOutcome {
    if root.join(path).exists() {
        RuleOutcome::hit(weight, format!("{} {} exists", FOUND, path))
    } else {
        RuleOutcome::miss(format!("{} {} missing", MISSING, path))
    }
}

fn content_contains(
    root: &Path,
    files: &FileSet,
    substring: &str,
    alternatives: &[String],
    weight: f64,
) -> RuleOutcome {
    let paths = resolve_file_set(root, files);
    if paths.is_empty() {
        return RuleOutcome::miss(format!("{} {} missing", MISSING, files));
    }

    let text = read_concatenated(&paths);
    let candidates = std::iter::once(substring).chain(alternatives.iter().map(String::as_str));
    let mut tried = Vec::new();
    for candidate in candidates {
        if text.contains(candidate) {
            return RuleOutcome::hit(
                weight,
                format!("{} {} contains \"{}\"", FOUND, files, candidate),
            );
        }
        tried.push(format!("\"{}\"", candidate));
    }

    RuleOutcome::miss(format!(
        "{} {} does not contain {}",
        MISSING,
        files,
        tried.join(" or ")
    ))
}

fn ratio_threshold(
    ctx: &mut CategoryContext<'_>,
    metric: &str,
    numerator: &MetricSource,
    denominator: &MetricSource,
    bands: &[Band],
) -> RuleOutcome {
    let num = compute(numerator, ctx);
    let den = compute(denominator, ctx);
    let ratio = if den > 0.0 { num / den } else { 0.0 };
    ctx.metrics.insert(metric.to_string(), ratio);

    let weight = select_band(bands, ratio);
    banded(
        weight,
        bands,
        format!(
            "{} {:.2}% ({}/{})",
            metric,
            ratio * 100.0,
            format_number(num),
            format_number(den)
        ),
    )
}

fn count_threshold(
    ctx: &mut CategoryContext<'_>,
    metric: &str,
    count: &MetricSource,
    bands: &[Band],
) -> RuleOutcome {
    let value = compute(count, ctx);
    ctx.metrics.insert(metric.to_string(), value);

    let weight = select_band(bands, value);
    banded(weight, bands, format!("{}: {}", metric, format_number(value)))
}

fn scaled_count(
    ctx: &mut CategoryContext<'_>,
    metric: &str,
    count: &MetricSource,
    per_unit: f64,
    cap: f64,
) -> RuleOutcome {
    let value = compute(count, ctx);
    ctx.metrics.insert(metric.to_string(), value);

    let weight = (value * per_unit).min(cap);
    let mark = if weight >= cap && weight > 0.0 {
        FOUND
    } else if weight > 0.0 {
        PARTIAL
    } else {
        MISSING
    };
    RuleOutcome {
        contribution: weight,
        satisfied: weight > 0.0,
        detail: format!(
            "{} {}: {} (+{:.1}/{})",
            mark,
            metric,
            format_number(value),
            weight,
            format_number(cap)
        ),
    }
}

/// Outcome for a band-selected weight: full marks when the best band was hit
fn banded(weight: f64, bands: &[Band], summary: String) -> RuleOutcome {
    let best = bands.iter().map(|b| b.weight).fold(0.0, f64::max);
    let mark = if weight > 0.0 && weight >= best {
        FOUND
    } else if weight > 0.0 {
        PARTIAL
    } else {
        MISSING
    };
    RuleOutcome {
        contribution: weight,
        satisfied: weight > 0.0,
        detail: format!("{} {}", mark, summary),
    }
}

fn json_value(root: &Path, path: &str, any_of: &[String], weight: f64) -> RuleOutcome {
    let file = root.join(path);
    if !file.is_file() {
        return RuleOutcome::miss(format!("{} {} missing", MISSING, path));
    }

    let document: Value = match read_text(&file).map(|text| serde_json::from_str::<Value>(&text)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            tracing::debug!(path = %file.display(), error = %e, "invalid JSON");
            return RuleOutcome::miss(format!("{} {} could not be parsed", MISSING, path));
        }
        Err(e) => {
            tracing::debug!(error = %e, "unreadable JSON file");
            return RuleOutcome::miss(format!("{} {} could not be read", MISSING, path));
        }
    };

    for pointer in any_of {
        if let Some(value) = document.pointer(pointer).filter(|v| is_truthy(v)) {
            return RuleOutcome::hit(
                weight,
                format!("{} {} {} = {}", FOUND, path, pointer, render_value(value)),
            );
        }
    }

    RuleOutcome::miss(format!(
        "{} {} has no {}",
        MISSING,
        path,
        any_of.join(" or ")
    ))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
