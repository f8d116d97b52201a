//! Error types and exit codes for scorecard
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including a missing evaluation root)
//! - 2: Usage error (bad flags/args, invalid rubric)
//! - 3: Data error (report could not be persisted)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes used by the scorecard binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args or rubric (2)
    Usage = 2,
    /// Data error - report persistence (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading rubrics, evaluating targets and
/// persisting reports
#[derive(Error, Debug)]
pub enum ScorecardError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid rubric: {reason}")]
    InvalidRubric { reason: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("evaluation root not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// A single file could not be read during a content scan. The evaluator
    /// absorbs this; it only surfaces from the low-level read helpers.
    #[error("failed to read {}: {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("{0}")]
    Other(String),

    #[error("Comparison interrupted. Partial results were saved.")]
    Interrupted,

    // Data errors (exit code 3)
    #[error("failed to persist report to {}: {reason}", path.display())]
    ReportPersist { path: PathBuf, reason: String },
}

impl ScorecardError {
    /// Create an error for a rubric that failed validation
    pub fn invalid_rubric(reason: impl std::fmt::Display) -> Self {
        ScorecardError::InvalidRubric {
            reason: reason.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ScorecardError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a file that could not be read
    pub fn file_read(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        ScorecardError::FileRead {
            path: path.into(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a report that could not be written
    pub fn report_persist(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        ScorecardError::ReportPersist {
            path: path.into(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ScorecardError::UnknownFormat(_)
            | ScorecardError::UsageError(_)
            | ScorecardError::InvalidRubric { .. }
            | ScorecardError::InvalidValue { .. } => ExitCode::Usage,

            ScorecardError::ReportPersist { .. } => ExitCode::Data,

            ScorecardError::RootNotFound { .. }
            | ScorecardError::FileRead { .. }
            | ScorecardError::Io(_)
            | ScorecardError::Yaml(_)
            | ScorecardError::Json(_)
            | ScorecardError::Toml(_)
            | ScorecardError::TomlSer(_)
            | ScorecardError::Other(_)
            | ScorecardError::Interrupted => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ScorecardError::UnknownFormat(_) => "unknown_format",
            ScorecardError::UsageError(_) => "usage_error",
            ScorecardError::InvalidRubric { .. } => "invalid_rubric",
            ScorecardError::InvalidValue { .. } => "invalid_value",
            ScorecardError::RootNotFound { .. } => "root_not_found",
            ScorecardError::FileRead { .. } => "file_read_error",
            ScorecardError::Io(_) => "io_error",
            ScorecardError::Yaml(_) => "yaml_error",
            ScorecardError::Json(_) => "json_error",
            ScorecardError::Toml(_) | ScorecardError::TomlSer(_) => "toml_error",
            ScorecardError::Other(_) => "other",
            ScorecardError::Interrupted => "interrupted",
            ScorecardError::ReportPersist { .. } => "report_persist_error",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for scorecard operations
pub type Result<T> = std::result::Result<T, ScorecardError>;
