//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use scorecard_core::config::ScorecardConfig;
use scorecard_core::error::Result;
use scorecard_core::rubric::{load_rubric, Rubric};

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub cwd: PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, cwd: PathBuf, start: Instant) -> Self {
        Self { cli, cwd, start }
    }

    /// Resolve a user-supplied path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Load the effective configuration
    pub fn config(&self) -> Result<ScorecardConfig> {
        let explicit = self.cli.config.as_deref().map(|p| self.resolve(p));
        let (config, source) = ScorecardConfig::resolve(explicit.as_deref(), &self.cwd)?;
        tracing::debug!(source = %source, elapsed = ?self.start.elapsed(), "config resolved");
        Ok(config)
    }

    /// Load the effective rubric: `--rubric`, then the configured rubric,
    /// then the built-in one
    pub fn rubric(&self, config: &ScorecardConfig) -> Result<Rubric> {
        let path = match (&self.cli.rubric, &config.rubric) {
            (Some(path), _) => Some(self.resolve(path)),
            (None, Some(path)) => Some(self.resolve(path)),
            (None, None) => None,
        };
        match path {
            Some(path) => load_rubric(&path),
            None => {
                tracing::debug!("using built-in rubric");
                Rubric::builtin()
            }
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("scorecard {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Scores project trees against a declarative rubric.");
        println!();
        println!("Run `scorecard --help` for usage information.");
        Ok(())
    }
}
