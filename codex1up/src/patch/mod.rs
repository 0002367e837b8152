//! Idempotent text-file surgery.
//!
//! Everything the installer writes into files it does not own goes through
//! this module:
//!
//! - [`marker`] - named `>>> name >>>` / `<<< name <<<` blocks (upsert, strip)
//! - [`legacy`] - removal of block encodings written by older releases
//! - [`key`] - find-or-insert of a single `key = "value"` line
//! - [`backup`] - timestamped backup before any overwrite of an existing file
//!
//! The codec functions are pure `&str -> String` transformations; only the
//! backup guard touches the filesystem.

pub mod backup;
pub mod key;
pub mod legacy;
pub mod marker;

pub use backup::{backup_timestamp, unique_backup_path, BackupError, BackupGuard, WriteOutcome};
pub use key::{
    patch_scalar_key, read_scalar_key, set_scalar_key, AssignmentStyle, KeyOutcome, KeyPatch,
};
pub use legacy::{remove_legacy_blocks, LegacyCleanup, PROJECT_MARKER};
pub use marker::{strip, upsert, MarkerBlock, MarkerStyle};
