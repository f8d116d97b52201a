//! Progress reporting for evaluations
//!
//! The evaluator never prints. It emits leveled messages to an injected
//! [`ReportSink`]; the binary decides where they go.

use std::fmt;
use std::sync::Mutex;

/// Severity of a progress message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkLevel {
    /// Phase headers and neutral progress
    Info,
    /// A category or target scored well
    Success,
    /// A category or target scored poorly, or something was skipped
    Warning,
    /// A target failed
    Error,
}

impl fmt::Display for SinkLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkLevel::Info => write!(f, "info"),
            SinkLevel::Success => write!(f, "success"),
            SinkLevel::Warning => write!(f, "warning"),
            SinkLevel::Error => write!(f, "error"),
        }
    }
}

/// Destination for evaluation progress messages
pub trait ReportSink {
    fn emit(&self, level: SinkLevel, message: &str);
}

/// Forwards messages to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, level: SinkLevel, message: &str) {
        match level {
            SinkLevel::Info | SinkLevel::Success => tracing::info!(%level, "{}", message),
            SinkLevel::Warning => tracing::warn!("{}", message),
            SinkLevel::Error => tracing::error!("{}", message),
        }
    }
}

/// Records messages in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<(SinkLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn messages(&self) -> Vec<(SinkLevel, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, level: SinkLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}
