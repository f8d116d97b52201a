//! Rubric validation
//!
//! Every structural problem is reported before any category is scored, so an
//! evaluation either runs against a well-formed rubric or not at all.

use std::collections::HashSet;
use std::path::{Component, Path};

use regex::Regex;

use super::types::{Band, Category, CheckRule, FileSet, MetricSource, Pattern, Rubric};
use crate::bail_rubric;
use crate::error::Result;

/// Validate a rubric, failing on the first problem found
pub fn validate(rubric: &Rubric) -> Result<()> {
    let mut names = HashSet::new();
    for category in &rubric.categories {
        if category.name.trim().is_empty() {
            bail_rubric!("category names must not be empty");
        }
        if !names.insert(category.name.as_str()) {
            bail_rubric!("duplicate category name: {}", category.name);
        }
        validate_category(category)?;
    }

    validate_relative_path("file_stats", &rubric.file_stats.dir, true)?;
    let mut groups = HashSet::new();
    for group in &rubric.file_stats.groups {
        if !groups.insert(group.name.as_str()) {
            bail_rubric!("duplicate file group name: {}", group.name);
        }
    }

    Ok(())
}

fn validate_category(category: &Category) -> Result<()> {
    let name = &category.name;
    if !category.max_points.is_finite() || category.max_points <= 0.0 {
        bail_rubric!(
            "category {}: max_points must be positive, got {}",
            name,
            category.max_points
        );
    }
    if let Some(good_at) = category.good_at {
        if !good_at.is_finite() || good_at < 0.0 || good_at > category.max_points {
            bail_rubric!(
                "category {}: good_at must be within 0..={}, got {}",
                name,
                category.max_points,
                good_at
            );
        }
    }
    if let Some(requires) = &category.requires {
        validate_relative_path(name, requires, false)?;
    }

    // Metrics visible to later rules, in declaration order
    let mut metrics: HashSet<&str> = HashSet::new();
    for (index, rule) in category.checks.iter().enumerate() {
        let context = format!("category {} rule #{} ({})", name, index + 1, rule.kind());
        validate_rule(&context, rule, &metrics)?;
        if let Some(metric) = rule.metric_name() {
            if metric.trim().is_empty() {
                bail_rubric!("{}: metric name must not be empty", context);
            }
            if !metrics.insert(metric) {
                bail_rubric!("{}: duplicate metric name: {}", context, metric);
            }
        }
    }
    Ok(())
}

fn validate_rule(context: &str, rule: &CheckRule, metrics: &HashSet<&str>) -> Result<()> {
    match rule {
        CheckRule::PathExists { path, weight } => {
            validate_relative_path(context, path, false)?;
            validate_weight(context, "weight", *weight)
        }
        CheckRule::ContentContains {
            files,
            substring,
            alternatives,
            weight,
        } => {
            validate_file_set(context, files)?;
            if substring.is_empty() || alternatives.iter().any(String::is_empty) {
                bail_rubric!("{}: substrings must not be empty", context);
            }
            validate_weight(context, "weight", *weight)
        }
        CheckRule::RatioThreshold {
            numerator,
            denominator,
            bands,
            ..
        } => {
            validate_source(context, numerator, metrics)?;
            validate_source(context, denominator, metrics)?;
            validate_bands(context, bands)
        }
        CheckRule::CountThreshold { count, bands, .. } => {
            validate_source(context, count, metrics)?;
            validate_bands(context, bands)
        }
        CheckRule::ScaledCount {
            count,
            per_unit,
            cap,
            ..
        } => {
            validate_source(context, count, metrics)?;
            validate_weight(context, "per_unit", *per_unit)?;
            validate_weight(context, "cap", *cap)
        }
        CheckRule::JsonValue {
            path,
            any_of,
            weight,
        } => {
            validate_relative_path(context, path, false)?;
            if any_of.is_empty() {
                bail_rubric!("{}: any_of must list at least one JSON pointer", context);
            }
            if let Some(pointer) = any_of.iter().find(|p| !p.is_empty() && !p.starts_with('/')) {
                bail_rubric!("{}: JSON pointer must start with '/': {}", context, pointer);
            }
            validate_weight(context, "weight", *weight)
        }
    }
}

fn validate_source(context: &str, source: &MetricSource, metrics: &HashSet<&str>) -> Result<()> {
    match source {
        MetricSource::FileCount { files } | MetricSource::Lines { files } => {
            validate_file_set(context, files)
        }
        MetricSource::Occurrences { files, pattern } => {
            validate_file_set(context, files)?;
            match pattern {
                Pattern::Literal(literal) if literal.is_empty() => {
                    bail_rubric!("{}: literal pattern must not be empty", context)
                }
                Pattern::Literal(_) => Ok(()),
                Pattern::Regex(expr) => match Regex::new(expr) {
                    Ok(_) => Ok(()),
                    Err(e) => bail_rubric!("{}: invalid regex {:?}: {}", context, expr, e),
                },
            }
        }
        MetricSource::DistinctMatches { files, substrings } => {
            validate_file_set(context, files)?;
            if substrings.is_empty() || substrings.iter().any(String::is_empty) {
                bail_rubric!("{}: substrings must be a non-empty list of non-empty strings", context);
            }
            Ok(())
        }
        MetricSource::Satisfied => Ok(()),
        MetricSource::Metric { name } => {
            if metrics.contains(name.as_str()) {
                Ok(())
            } else {
                bail_rubric!(
                    "{}: metric {} is not computed by an earlier rule of this category",
                    context,
                    name
                )
            }
        }
    }
}

fn validate_file_set(context: &str, files: &FileSet) -> Result<()> {
    match files {
        FileSet::Path(path) => validate_relative_path(context, path, false),
        FileSet::Tree { dir, extensions } => {
            validate_relative_path(context, dir, true)?;
            if extensions.iter().any(String::is_empty) {
                bail_rubric!("{}: extensions must not be empty strings", context);
            }
            Ok(())
        }
    }
}

fn validate_weight(context: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail_rubric!("{}: {} must be a non-negative number, got {}", context, field, value);
    }
    Ok(())
}

/// Bands must cover `[0, inf)` exactly: start at 0, no gaps, no overlaps,
/// unbounded last band.
fn validate_bands(context: &str, bands: &[Band]) -> Result<()> {
    if bands.is_empty() {
        bail_rubric!("{}: at least one band is required", context);
    }
    for band in bands {
        validate_weight(context, "band weight", band.weight)?;
        if !band.from.is_finite() {
            bail_rubric!("{}: band lower bound must be finite", context);
        }
        if let Some(to) = band.to {
            if !to.is_finite() || to <= band.from {
                bail_rubric!(
                    "{}: band [{}, {}) is empty or has a non-finite bound",
                    context,
                    band.from,
                    to
                );
            }
        }
    }

    let sorted = sorted_bands(bands);
    let mut expected_from = 0.0;
    for (index, band) in sorted.iter().enumerate() {
        if band.from != expected_from {
            let kind = if band.from > expected_from { "gap" } else { "overlap" };
            bail_rubric!(
                "{}: bands have a {} at {} (next band starts at {})",
                context,
                kind,
                expected_from,
                band.from
            );
        }
        match band.to {
            Some(to) => expected_from = to,
            None if index + 1 == sorted.len() => return Ok(()),
            None => bail_rubric!("{}: only the last band may be unbounded", context),
        }
    }

    bail_rubric!(
        "{}: bands are not exhaustive, nothing covers values from {}",
        context,
        expected_from
    )
}

/// Bands in ascending order of their lower bound
pub fn sorted_bands(bands: &[Band]) -> Vec<&Band> {
    let mut sorted: Vec<&Band> = bands.iter().collect();
    sorted.sort_by(|a, b| a.from.total_cmp(&b.from));
    sorted
}

fn validate_relative_path(context: &str, path: &str, allow_empty: bool) -> Result<()> {
    if path.is_empty() {
        if allow_empty {
            return Ok(());
        }
        bail_rubric!("{}: path must not be empty", context);
    }
    let escapes = Path::new(path).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        bail_rubric!("{}: path must stay inside the evaluated root: {}", context, path);
    }
    Ok(())
}
