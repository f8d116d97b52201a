//! Command dispatch logic for scorecard

use std::time::Instant;

use crate::cli::{Cli, Commands};
use scorecard_core::error::Result;
use tracing::debug;

mod command;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let cwd = std::env::current_dir()?;

    debug!(elapsed = ?start.elapsed(), cwd = %cwd.display(), "resolve_cwd");

    let ctx = CommandContext::new(cli, cwd, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Evaluate { path, no_write } => {
                super::evaluate::execute(ctx, path, *no_write)
            }
            Commands::Compare { root, no_write } => {
                super::compare::execute(ctx, root.as_deref(), *no_write)
            }
            Commands::Rubric { check } => super::rubric::execute(ctx, check.as_deref()),
        }
    }
}
