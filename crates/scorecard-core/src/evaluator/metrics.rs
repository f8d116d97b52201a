//! Metric computation and band selection

use regex::Regex;

use super::rules::CategoryContext;
use crate::files::{read_concatenated, resolve_file_set};
use crate::rubric::{sorted_bands, Band, MetricSource, Pattern};

/// Compute the numeric value of a metric source.
///
/// Missing files count as empty text. A reference to an unknown metric
/// yields 0; validation rejects such rubrics before evaluation starts.
pub(crate) fn compute(source: &MetricSource, ctx: &CategoryContext<'_>) -> f64 {
    match source {
        MetricSource::FileCount { files } => resolve_file_set(ctx.root, files).len() as f64,
        MetricSource::Occurrences { files, pattern } => {
            let text = read_concatenated(&resolve_file_set(ctx.root, files));
            count_occurrences(&text, pattern) as f64
        }
        MetricSource::Lines { files } => {
            let text = read_concatenated(&resolve_file_set(ctx.root, files));
            line_count(&text) as f64
        }
        MetricSource::DistinctMatches { files, substrings } => {
            let text = read_concatenated(&resolve_file_set(ctx.root, files));
            substrings.iter().filter(|s| text.contains(s.as_str())).count() as f64
        }
        MetricSource::Satisfied => ctx.satisfied as f64,
        MetricSource::Metric { name } => ctx.metrics.get(name).copied().unwrap_or(0.0),
    }
}

/// Non-overlapping occurrences of `pattern` in `text`
pub(crate) fn count_occurrences(text: &str, pattern: &Pattern) -> usize {
    match pattern {
        Pattern::Literal(literal) if literal.is_empty() => 0,
        Pattern::Literal(literal) => text.matches(literal.as_str()).count(),
        Pattern::Regex(source) => match Regex::new(source) {
            Ok(re) => re.find_iter(text).count(),
            Err(e) => {
                tracing::debug!(pattern = %source, error = %e, "invalid pattern");
                0
            }
        },
    }
}

/// Number of newline-separated segments; empty text is one line
pub(crate) fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Weight of the band containing `value`.
///
/// Bands are searched in ascending order of `from`; the last band whose lower
/// bound is at or below `value` wins. Values below every band score 0.
pub(crate) fn select_band(bands: &[Band], value: f64) -> f64 {
    sorted_bands(bands)
        .into_iter()
        .rev()
        .find(|band| band.from <= value)
        .map(|band| band.weight)
        .unwrap_or(0.0)
}

/// Render a metric value, dropping the fraction when it is whole
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
