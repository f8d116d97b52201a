//! Scorecard configuration
//!
//! Looked up in order: an explicit `--config` file, `./scorecard.toml`, then
//! the global `<config_dir>/scorecard/config.toml`. Missing files fall back to
//! defaults; a file that exists but cannot be parsed is an error.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScorecardError};

const CONFIG_DIR: &str = "scorecard";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "SCORECARD_CONFIG_DIR";

/// File name of a project-local configuration
pub const LOCAL_CONFIG_FILE: &str = "scorecard.toml";

fn default_report_file() -> String {
    "evaluation-report.json".to_string()
}

fn default_comparison_json() -> String {
    "comparison-report.json".to_string()
}

fn default_comparison_markdown() -> String {
    "COMPARISON_REPORT.md".to_string()
}

fn default_marker() -> String {
    "package.json".to_string()
}

fn default_exclude() -> Vec<String> {
    vec!["node_modules".to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardConfig {
    /// Rubric file; relative paths are resolved against the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<PathBuf>,

    /// Per-target report file name
    #[serde(default = "default_report_file")]
    pub report_file: String,

    #[serde(default = "default_comparison_json")]
    pub comparison_json: String,

    #[serde(default = "default_comparison_markdown")]
    pub comparison_markdown: String,

    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            rubric: None,
            report_file: default_report_file(),
            comparison_json: default_comparison_json(),
            comparison_markdown: default_comparison_markdown(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// How `compare` finds targets below its root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File a directory must contain to count as a target
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Directory names never treated as targets
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            exclude: default_exclude(),
            include_hidden: false,
        }
    }
}

impl DiscoveryConfig {
    /// Immediate subdirectories of `root` that qualify as targets, as
    /// `(label, path)` pairs sorted by label
    pub fn discover(&self, root: &Path) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(root).map_err(|_| ScorecardError::RootNotFound {
            path: root.to_path_buf(),
        })?;

        let mut targets = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            let label = entry.file_name().to_string_lossy().into_owned();
            if path.is_dir() && self.accepts(&label) && path.join(&self.marker).is_file() {
                targets.push((label, path));
            }
        }
        targets.sort();
        Ok(targets)
    }

    fn accepts(&self, name: &str) -> bool {
        (self.include_hidden || !name.starts_with('.')) && !self.exclude.iter().any(|e| e == name)
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    Global(PathBuf),
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Local(path) | ConfigSource::Global(path) => {
                write!(f, "{}", path.display())
            }
            ConfigSource::Default => write!(f, "built-in defaults"),
        }
    }
}

impl ScorecardConfig {
    /// Path of the global config file, honoring `SCORECARD_CONFIG_DIR`
    pub fn global_path() -> Option<PathBuf> {
        let config_dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()?.join(CONFIG_DIR),
        };
        Some(config_dir.join(CONFIG_FILE))
    }

    /// Resolve the effective configuration for a run started in `cwd`
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, ConfigSource)> {
        Self::resolve_with(explicit, cwd, Self::global_path())
    }

    fn resolve_with(
        explicit: Option<&Path>,
        cwd: &Path,
        global: Option<PathBuf>,
    ) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ScorecardError::invalid_value(
                    "config file",
                    format!("{} does not exist", path.display()),
                ));
            }
            return Ok((Self::load(path)?, ConfigSource::Explicit(path.to_path_buf())));
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Ok((Self::load(&local)?, ConfigSource::Local(local)));
        }

        match global {
            Some(path) if path.is_file() => Ok((Self::load(&path)?, ConfigSource::Global(path))),
            _ => Ok((Self::default(), ConfigSource::Default)),
        }
    }

    /// Load a config file, resolving its rubric path against the file's directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScorecardError::invalid_value("config file", format!("{}: {}", path.display(), e))
        })?;
        let mut config: ScorecardConfig = toml::from_str(&content).map_err(|e| {
            ScorecardError::invalid_value("config file", format!("{}: {}", path.display(), e))
        })?;

        if let (Some(rubric), Some(dir)) = (&config.rubric, path.parent()) {
            if rubric.is_relative() {
                config.rubric = Some(dir.join(rubric));
            }
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
