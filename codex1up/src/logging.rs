//! Session log file for the installer.
//!
//! Every run writes a fresh `codex-1up.log` (truncated at session start)
//! next to the Codex config. Console output is handled separately by the
//! CLI's logger; this module only wires the `tracing` file sink.
//! The filter is configurable via the `RUST_LOG` environment variable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Path of the session log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialize file logging.
///
/// Creates `log_dir` if needed, clears any previous session log and
/// installs a global subscriber writing to it.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file (e.g. `~/.codex/log`)
/// * `log_file` - Log filename (e.g. `codex-1up.log`)
/// * `debug` - Force debug-level output regardless of `RUST_LOG`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be truncated.
pub fn init_logging(log_dir: &Path, log_file: &str, debug: bool) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false);

    let env_filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()))
    };

    // A subscriber may already be installed (tests, embedding); keep going.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
        path: log_path,
    })
}

/// Default filter directive when `RUST_LOG` is unset.
pub fn default_filter() -> &'static str {
    "info"
}

/// Default log directory under a home directory.
pub fn default_log_dir(home: &Path) -> PathBuf {
    home.join(".codex").join("log")
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    "codex-1up.log"
}
