//! Evaluation report types
//!
//! A report is built once per evaluation and never mutated afterwards. It
//! carries no timestamps or absolute paths, so evaluating the same tree with
//! the same rubric always serializes to the same bytes.

use serde::ser::Serializer;
use serde::Serialize;

/// Scored result of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    /// Category name (the key of `categoryScores`)
    #[serde(skip)]
    pub name: String,
    /// Display label
    #[serde(skip)]
    pub title: String,
    /// Clamped score in `[0, max]`
    pub score: f64,
    pub max: f64,
    /// One finding per rule, in rule declaration order
    pub details: Vec<String>,
}

impl CategoryScore {
    /// Score as a percentage of the category maximum
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.max)
    }
}

/// Count of files in one configured group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

/// File statistics for the evaluated tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub total_files: usize,
    #[serde(serialize_with = "serialize_group_counts")]
    pub files_by_extension_group: Vec<GroupCount>,
}

impl FileStats {
    /// Count for a named group, 0 when the group is unknown
    pub fn group(&self, name: &str) -> usize {
        self.files_by_extension_group
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.count)
            .unwrap_or(0)
    }
}

/// Structured result of evaluating one target against one rubric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    /// Category results keyed by name, in rubric order
    #[serde(serialize_with = "serialize_category_scores")]
    pub category_scores: Vec<CategoryScore>,
    pub file_stats: FileStats,
    pub total_score: f64,
    pub max_score: f64,
    /// `total_score / max_score * 100`, one decimal; 0 when `max_score` is 0
    pub percentage: f64,
}

impl EvaluationReport {
    /// Assemble a report, deriving the totals from the category scores
    pub fn new(category_scores: Vec<CategoryScore>, file_stats: FileStats) -> Self {
        let total_score = category_scores.iter().map(|c| c.score).sum();
        let max_score = category_scores.iter().map(|c| c.max).sum();
        Self {
            category_scores,
            file_stats,
            total_score,
            max_score,
            percentage: percentage(total_score, max_score),
        }
    }

    /// Look up a category result by name
    pub fn category(&self, name: &str) -> Option<&CategoryScore> {
        self.category_scores.iter().find(|c| c.name == name)
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `score / max * 100` rounded to one decimal, 0 when `max` is 0
pub fn percentage(score: f64, max: f64) -> f64 {
    if max > 0.0 {
        round1(score / max * 100.0)
    } else {
        0.0
    }
}

fn serialize_category_scores<S>(scores: &[CategoryScore], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(scores.iter().map(|c| (c.name.as_str(), c)))
}

fn serialize_group_counts<S>(groups: &[GroupCount], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(groups.iter().map(|g| (g.name.as_str(), g.count)))
}
