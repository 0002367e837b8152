//! In-memory logger that records every line.

use std::fmt::Arguments;
use std::sync::Mutex;

use crate::log::{LogLevel, Logger};

/// Logger that keeps every line it receives.
///
/// Used by tests to inspect what was logged,
/// in particular the `[dry-run]` lines emitted instead of mutations.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded lines, oldest first.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages only, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, msg)| msg).collect()
    }

    /// Whether any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|(_, msg)| msg.contains(needle))
    }

    /// Messages recorded at `level`.
    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        let line = args.to_string();
        match self.entries.lock() {
            Ok(mut guard) => guard.push((level, line)),
            Err(poisoned) => poisoned.into_inner().push((level, line)),
        }
    }
}
