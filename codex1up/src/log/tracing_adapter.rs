//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger implementation that delegates to the `tracing` crate.
///
/// `Plain`, `Info` and `Ok` all land at INFO; the level name is kept in a
/// `kind` field so the log file still distinguishes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing logger adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Plain => tracing::info!(kind = "plain", "{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Ok => tracing::info!(kind = "ok", "{}", args),
            LogLevel::Warn => tracing::warn!("{}", args),
            LogLevel::Error => tracing::error!("{}", args),
        }
    }
}
