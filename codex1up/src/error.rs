//! Error types for the installer core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::patch::BackupError;

/// Errors surfaced by installer steps, the resolver and the commands.
///
/// Missing optional tools are *not* errors: steps log a warning and carry
/// on. Everything here either aborts a required step or is swallowed into
/// a warning by a best-effort one.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// A bundled template or asset is absent; the install root is corrupt.
    #[error("Bundled asset not found: {}", .path.display())]
    MissingAsset { path: PathBuf },

    /// Filesystem operation failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// External command exited unsuccessfully or could not be spawned.
    #[error("Command failed ({status}): {command}")]
    CommandFailed { command: String, status: String },

    /// Backup-before-write failed; the target was left untouched.
    #[error(transparent)]
    Backup(#[from] BackupError),

    /// A user-supplied value could not be interpreted.
    #[error("Invalid {field} value '{value}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The interactive frontend failed (not a cancellation).
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// No supported audio player is installed.
    #[error("No audio player found (afplay/paplay/aplay/mpg123/ffplay)")]
    NoAudioPlayer,

    /// The config file could not be parsed.
    #[error("Failed to parse {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },
}

impl InstallerError {
    /// Wrap an io error with the action and path it relates to.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        InstallerError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type InstallerResult<T> = Result<T, InstallerError>;
