//! Backup-before-overwrite guard.
//!
//! Any write to a file that already exists is preceded by a copy to
//! `{target}.backup.{YYYYMMDD-HHMMSS}`. If the copy fails the write is not
//! attempted. Previous backups are never overwritten: a collision within the
//! same second gets a `.1`, `.2`, ... suffix.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::debug;

use crate::log::Logger;

/// Errors from a guarded write.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Copying the existing file aside failed; the target was not touched.
    #[error("Failed to back up {} to {}: {source}", .target.display(), .backup.display())]
    Copy {
        target: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The parent directory of the target could not be created.
    #[error("Failed to create directory {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The writer callback failed after any backup was taken.
    #[error("Failed to write {}: {source}", .target.display())]
    Write {
        target: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a guarded write did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Backup created before the write, if the target existed.
    pub backup: Option<PathBuf>,
    /// Whether the writer ran. False in dry-run mode.
    pub written: bool,
}

/// Timestamp component of backup names, in local time.
pub fn backup_timestamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// First free `{target}.backup.{stamp}[.N]` path.
pub fn unique_backup_path(target: &Path, stamp: &str) -> PathBuf {
    let mut base = OsString::from(target.as_os_str());
    base.push(".backup.");
    base.push(stamp);

    let candidate = PathBuf::from(&base);
    if !candidate.exists() {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let mut name = base.clone();
        name.push(format!(".{n}"));
        let candidate = PathBuf::from(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Scoped overwrite of existing files.
///
/// Holds the dry-run flag and the logger so every call site gets the same
/// backup and reporting behavior.
pub struct BackupGuard<'a> {
    dry_run: bool,
    logger: &'a dyn Logger,
}

impl<'a> BackupGuard<'a> {
    pub fn new(dry_run: bool, logger: &'a dyn Logger) -> Self {
        Self { dry_run, logger }
    }

    /// Back up `target` if it exists, then run `writer`.
    ///
    /// In dry-run mode nothing is touched; the planned backup and write are
    /// logged instead.
    pub fn scoped_overwrite<F>(&self, target: &Path, writer: F) -> Result<WriteOutcome, BackupError>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        let exists = target.exists();

        if self.dry_run {
            if exists {
                let planned = unique_backup_path(target, &backup_timestamp());
                self.logger.plain(format_args!(
                    "[dry-run] cp {} {}",
                    target.display(),
                    planned.display()
                ));
            }
            self.logger
                .plain(format_args!("[dry-run] write {}", target.display()));
            return Ok(WriteOutcome::default());
        }

        let backup = if exists {
            let backup = unique_backup_path(target, &backup_timestamp());
            fs::copy(target, &backup).map_err(|source| BackupError::Copy {
                target: target.to_path_buf(),
                backup: backup.clone(),
                source,
            })?;
            debug!(target = %target.display(), backup = %backup.display(), "Backup created");
            self.logger
                .info(format_args!("Backed up {} to {}", target.display(), backup.display()));
            Some(backup)
        } else {
            if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| BackupError::CreateDir {
                    dir: parent.to_path_buf(),
                    source,
                })?;
            }
            None
        };

        writer(target).map_err(|source| BackupError::Write {
            target: target.to_path_buf(),
            source,
        })?;

        Ok(WriteOutcome {
            backup,
            written: true,
        })
    }

    /// Guarded write of a whole file's contents.
    pub fn write_text(&self, target: &Path, contents: &str) -> Result<WriteOutcome, BackupError> {
        self.scoped_overwrite(target, |path| fs::write(path, contents))
    }
}
