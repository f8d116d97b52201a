//! Rubric model, loading and validation
//!
//! Rubrics are plain serde structures. They can be built in code, loaded from
//! a TOML, YAML or JSON document, or taken from the built-in default.

pub mod types;
pub mod validate;

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, ScorecardError};

pub use types::{
    Band, Category, CheckRule, FileGroup, FileSet, FileStatsConfig, MetricSource, Pattern, Rubric,
    DEFAULT_RUBRIC_NAME,
};
pub use validate::{sorted_bands, validate};

/// Source of the built-in rubric
const BUILTIN_RUBRIC: &str = include_str!("rubric/default_rubric.toml");

impl Rubric {
    /// The built-in rubric for single-page TypeScript projects
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_RUBRIC)
    }

    /// Parse and validate a rubric from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rubric: Rubric = toml::from_str(content)
            .map_err(|e| ScorecardError::invalid_rubric(format!("malformed TOML: {}", e)))?;
        validate(&rubric)?;
        Ok(rubric)
    }

    /// Sum of every category's `max_points`
    pub fn max_score(&self) -> f64 {
        self.categories.iter().map(|c| c.max_points).sum()
    }

    /// Hex SHA-256 of the rubric's canonical JSON encoding
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Render the rubric as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load a rubric file, choosing the parser from its extension, and validate it.
///
/// Parse failures are reported as [`ScorecardError::InvalidRubric`] so that a
/// bad rubric file and a structurally invalid rubric surface the same way.
pub fn load_rubric(path: &Path) -> Result<Rubric> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScorecardError::invalid_rubric(format!("cannot read {}: {}", path.display(), e))
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let parsed: std::result::Result<Rubric, String> = match extension.as_str() {
        "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        other => {
            return Err(ScorecardError::invalid_rubric(format!(
                "unsupported rubric format {:?} for {} (expected .toml, .yaml, .yml or .json)",
                other,
                path.display()
            )))
        }
    };

    let rubric = parsed.map_err(|reason| {
        ScorecardError::invalid_rubric(format!("{}: {}", path.display(), reason))
    })?;

    validate(&rubric)?;
    tracing::debug!(
        path = %path.display(),
        name = %rubric.name,
        categories = rubric.categories.len(),
        "loaded rubric"
    );
    Ok(rubric)
}
