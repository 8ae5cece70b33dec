//! Diagnostic sinks for the solver core.
//!
//! The deck and the solving engine never log through a global logger; they
//! report to a [`DiagnosticSink`] handed to them. The CLI uses
//! [`TracingSink`], tests can use [`RecordingSink`] to inspect what was said.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Info,
    Debug,
}

/// Receiver for non-fatal diagnostics emitted while solving.
///
/// Must be `Send + Sync`: parallel solving reports from worker threads.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: fmt::Arguments<'_>);

    fn info(&self, message: fmt::Arguments<'_>);

    fn debug(&self, message: fmt::Arguments<'_>);

    /// Whether debug messages are kept at all. Callers may skip building
    /// expensive debug output when this is false.
    fn debug_enabled(&self) -> bool {
        true
    }
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: fmt::Arguments<'_>) {
        tracing::warn!("{}", message);
    }

    fn info(&self, message: fmt::Arguments<'_>) {
        tracing::info!("{}", message);
    }

    fn debug(&self, message: fmt::Arguments<'_>) {
        tracing::debug!("{}", message);
    }

    fn debug_enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::DEBUG)
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages recorded at `level`, in arrival order
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: Level, message: fmt::Arguments<'_>) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push((level, message.to_string()));
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, message: fmt::Arguments<'_>) {
        self.push(Level::Warn, message);
    }

    fn info(&self, message: fmt::Arguments<'_>) {
        self.push(Level::Info, message);
    }

    fn debug(&self, message: fmt::Arguments<'_>) {
        self.push(Level::Debug, message);
    }
}
