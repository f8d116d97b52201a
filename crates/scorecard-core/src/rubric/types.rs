//! Rubric type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name given to rubrics that do not declare one
pub const DEFAULT_RUBRIC_NAME: &str = "default";

/// Share of `max_points` at which a category without `good_at` counts as good
pub const DEFAULT_GOOD_RATIO: f64 = 0.7;

fn default_rubric_name() -> String {
    DEFAULT_RUBRIC_NAME.to_string()
}

/// A declarative, ordered set of scoring categories applied to a target tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    /// Rubric name, recorded in persisted reports
    #[serde(default = "default_rubric_name")]
    pub name: String,

    /// Scoring categories, evaluated in declaration order
    #[serde(default)]
    pub categories: Vec<Category>,

    /// File statistics gathered alongside the scores
    #[serde(default)]
    pub file_stats: FileStatsConfig,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            name: default_rubric_name(),
            categories: Vec::new(),
            file_stats: FileStatsConfig::default(),
        }
    }
}

/// A named, capped group of check rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    /// Human label used when rendering reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Upper bound for the category score
    #[serde(alias = "maxPoints")]
    pub max_points: f64,

    /// Score at which the category counts as good (default: 70% of max)
    #[serde(default, alias = "goodAt", skip_serializing_if = "Option::is_none")]
    pub good_at: Option<f64>,

    /// Relative path that must exist for the checks to run at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,

    #[serde(default)]
    pub checks: Vec<CheckRule>,
}

impl Category {
    /// Title if set, otherwise the name
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Score from which the category is reported as good
    pub fn good_threshold(&self) -> f64 {
        self.good_at.unwrap_or(self.max_points * DEFAULT_GOOD_RATIO)
    }
}

/// One atomic, independently weighted scoring criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckRule {
    /// File or directory presence
    PathExists { path: String, weight: f64 },

    /// Case-sensitive substring containment in the text of a file set
    ContentContains {
        files: FileSet,
        substring: String,
        /// Further substrings, any of which also satisfies the rule
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alternatives: Vec<String>,
        weight: f64,
    },

    /// `numerator / denominator` mapped to a weight through bands
    RatioThreshold {
        metric: String,
        numerator: MetricSource,
        denominator: MetricSource,
        bands: Vec<Band>,
    },

    /// A raw count mapped to a weight through bands
    CountThreshold {
        metric: String,
        count: MetricSource,
        bands: Vec<Band>,
    },

    /// `min(count * per_unit, cap)`
    ScaledCount {
        metric: String,
        count: MetricSource,
        per_unit: f64,
        cap: f64,
    },

    /// A JSON document has a truthy value at any of the given pointers
    JsonValue {
        path: String,
        any_of: Vec<String>,
        weight: f64,
    },
}

impl CheckRule {
    /// Stable identifier of the rule kind
    pub fn kind(&self) -> &'static str {
        match self {
            CheckRule::PathExists { .. } => "path_exists",
            CheckRule::ContentContains { .. } => "content_contains",
            CheckRule::RatioThreshold { .. } => "ratio_threshold",
            CheckRule::CountThreshold { .. } => "count_threshold",
            CheckRule::ScaledCount { .. } => "scaled_count",
            CheckRule::JsonValue { .. } => "json_value",
        }
    }

    /// Name of the metric this rule records, if any
    pub fn metric_name(&self) -> Option<&str> {
        match self {
            CheckRule::RatioThreshold { metric, .. }
            | CheckRule::CountThreshold { metric, .. }
            | CheckRule::ScaledCount { metric, .. } => Some(metric),
            _ => None,
        }
    }
}

/// The files a content rule or metric reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileSet {
    /// A single file, or every file below a directory
    Path(String),
    /// Files below `dir` whose name ends with one of `extensions`
    Tree {
        dir: String,
        #[serde(default)]
        extensions: Vec<String>,
    },
}

impl FileSet {
    /// The relative path the set is rooted at
    pub fn base(&self) -> &str {
        match self {
            FileSet::Path(path) => path,
            FileSet::Tree { dir, .. } => dir,
        }
    }

    /// Extension filter; empty accepts every file
    pub fn extensions(&self) -> &[String] {
        match self {
            FileSet::Path(_) => &[],
            FileSet::Tree { extensions, .. } => extensions,
        }
    }
}

impl fmt::Display for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSet::Path(path) => write!(f, "{}", path),
            FileSet::Tree { dir, extensions } if extensions.is_empty() => {
                write!(f, "{}/**", dir)
            }
            FileSet::Tree { dir, extensions } => {
                write!(f, "{}/**/*{{{}}}", dir, extensions.join(","))
            }
        }
    }
}

/// How a numeric input for a threshold rule is computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MetricSource {
    /// Number of files in the set
    FileCount { files: FileSet },
    /// Occurrences of a pattern in the concatenated text
    Occurrences { files: FileSet, pattern: Pattern },
    /// Line count of the concatenated text
    Lines { files: FileSet },
    /// How many of the listed substrings occur at least once
    #[serde(alias = "matched_substrings")]
    DistinctMatches {
        files: FileSet,
        substrings: Vec<String>,
    },
    /// Rules satisfied so far in the current category
    Satisfied,
    /// A metric recorded by an earlier rule of the same category
    Metric { name: String },
}

/// Text pattern counted by [`MetricSource::Occurrences`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Literal(String),
    Regex(String),
}

/// Half-open interval `[from, to)` mapped to a weight. `to = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub from: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    pub weight: f64,
}

/// Where and how files are counted for the report's file statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileStatsConfig {
    /// Relative directory to count below; empty means the evaluation root
    #[serde(default)]
    pub dir: String,
    #[serde(default)]
    pub groups: Vec<FileGroup>,
}

/// A named subset of files counted in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileGroup {
    pub name: String,
    /// Accepted name suffixes; empty accepts every file
    #[serde(default)]
    pub extensions: Vec<String>,
    /// If non-empty, the relative path must contain one of these
    #[serde(default)]
    pub path_contains: Vec<String>,
}
