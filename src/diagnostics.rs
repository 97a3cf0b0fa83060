//! Caller-supplied diagnostics sinks
//!
//! Inference reports informational events (currently the number of rows the
//! rejection gate discarded) through a sink owned by the caller, never
//! through process-wide state.

use std::fmt;

/// Informational event raised during a prediction call.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The rejection gate ran over `total` rows and rejected `rejected` of them.
    RowsRejected { rejected: usize, total: usize, threshold: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowsRejected { rejected, total, threshold } => write!(
                f,
                "Rows rejected using reconstruction error: {rejected}/{total} (threshold={threshold})"
            ),
        }
    }
}

/// Receiver for diagnostics events.
pub trait DiagnosticsSink {
    fn emit(&mut self, event: Diagnostic);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn emit(&mut self, _event: Diagnostic) {}
}

/// Sink that forwards events to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

impl DiagnosticsSink for LoggingSink {
    fn emit(&mut self, event: Diagnostic) {
        match event {
            Diagnostic::RowsRejected { rejected, total, threshold } => {
                tracing::info!(rejected, total, threshold, "Rows rejected using reconstruction error");
            }
        }
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<Diagnostic>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Rejected-row count from the most recent rejection event.
    pub fn rejected_count(&self) -> Option<usize> {
        self.events.iter().rev().find_map(|e| match e {
            Diagnostic::RowsRejected { rejected, .. } => Some(*rejected),
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&mut self, event: Diagnostic) {
        self.events.push(event);
    }
}
