//! CLI argument parsing for scorecard
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json,
//! --config, --rubric

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use scorecard_core::format::OutputFormat;

/// Scorecard - score project trees against a declarative rubric
#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. "debug" or "scorecard_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (default: ./scorecard.toml, then the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Rubric file (.toml, .yaml, .yml or .json); overrides the configured rubric
    #[arg(long, global = true)]
    pub rubric: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate one project directory
    Evaluate {
        /// Project directory to evaluate
        path: PathBuf,

        /// Do not write the report into the project directory
        #[arg(long)]
        no_write: bool,
    },

    /// Evaluate every project below a directory and rank them
    Compare {
        /// Directory containing one subdirectory per project (default: current directory)
        root: Option<PathBuf>,

        /// Do not write any report files
        #[arg(long)]
        no_write: bool,
    },

    /// Print the effective rubric, or validate a rubric file
    Rubric {
        /// Validate this rubric file instead of printing
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
