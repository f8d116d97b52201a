//! Scorecard Core Library
//!
//! Rubric model, evaluation engine, comparison and report persistence for the
//! scorecard tool.

pub mod compare;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod files;
pub mod format;
pub mod logging;
pub mod persist;
pub mod report;
pub mod rubric;
pub mod sink;

pub use compare::{compare, ComparisonReport};
pub use error::{Result, ScorecardError};
pub use evaluator::{evaluate, Evaluator};
pub use report::EvaluationReport;
pub use rubric::{load_rubric, Rubric};
