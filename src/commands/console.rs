//! Terminal progress output

use scorecard_core::format::OutputFormat;
use scorecard_core::sink::{ReportSink, SinkLevel, TracingSink};

use crate::cli::Cli;

/// Prints evaluation progress to stdout
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn emit(&self, level: SinkLevel, message: &str) {
        match level {
            // Category headers get a blank line before them
            SinkLevel::Info if message.starts_with("Checking") => println!("\n{}", message),
            SinkLevel::Info => println!("{}", message),
            SinkLevel::Success => println!("{}", marked("✓", message)),
            SinkLevel::Warning => println!("{}", marked("⚠", message)),
            SinkLevel::Error => eprintln!("{}", marked("✗", message)),
        }
    }
}

/// Put `mark` in front of the message text, after its indentation
fn marked(mark: &str, message: &str) -> String {
    let text = message.trim_start();
    let indent = &message[..message.len() - text.len()];
    format!("{}{} {}", indent, mark, text)
}

/// Progress goes to the terminal only in human mode without `--quiet`;
/// otherwise it is routed through `tracing`.
pub fn progress_sink(cli: &Cli) -> Box<dyn ReportSink> {
    if cli.format == OutputFormat::Human && !cli.quiet {
        Box::new(ConsoleSink)
    } else {
        Box::new(TracingSink)
    }
}

/// Horizontal rule used around report sections
pub fn rule() -> String {
    "=".repeat(60)
}
