//! `codex-1up uninstall`: undo what the installer wired into the shell.

use std::fs;
use std::path::PathBuf;

use crate::context::InstallerContext;
use crate::error::{InstallerError, InstallerResult};
use crate::installers::cleanup_legacy_rc_files;
use crate::patch::{backup_timestamp, unique_backup_path};
use crate::{log_info, log_ok, log_plain, log_warn};

/// What the uninstall changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub cleaned_rc_files: Vec<PathBuf>,
    /// Where `notify.sh` was moved, if it existed.
    pub notify_backup: Option<PathBuf>,
}

/// Strip rc blocks and move the notify hook aside.
///
/// `config.toml`, installed sounds and AGENTS.md files are user data and
/// stay where they are.
pub fn uninstall(ctx: &InstallerContext) -> InstallerResult<UninstallReport> {
    let cleaned_rc_files = cleanup_legacy_rc_files(ctx)?;
    if cleaned_rc_files.is_empty() {
        log_info!(ctx.logger, "No codex-1up blocks found in shell rc files");
    }

    let script = ctx.paths().notify_script;
    let notify_backup = if script.exists() {
        let backup = unique_backup_path(&script, &backup_timestamp());
        if ctx.dry_run() {
            log_plain!(
                ctx.logger,
                "[dry-run] mv {} {}",
                script.display(),
                backup.display()
            );
        } else {
            fs::rename(&script, &backup)
                .map_err(|e| InstallerError::io("Failed to move", &script, e))?;
            log_ok!(ctx.logger, "Moved notify hook to {}", backup.display());
        }
        Some(backup)
    } else {
        None
    };

    if notify_backup.is_some() && config_references_hook(&ctx.paths().config) {
        log_warn!(
            ctx.logger,
            "~/.codex/config.toml still points `notify` at notify.sh; remove that entry or reinstall the hook"
        );
    }

    log_info!(
        ctx.logger,
        "Left ~/.codex/config.toml, ~/.codex/sounds and AGENTS.md files in place; remove them manually if unwanted"
    );

    Ok(UninstallReport {
        cleaned_rc_files,
        notify_backup,
    })
}

fn config_references_hook(config: &std::path::Path) -> bool {
    fs::read_to_string(config)
        .map(|text| {
            text.lines()
                .any(|line| line.trim_start().starts_with("notify") && line.contains("notify.sh"))
        })
        .unwrap_or(false)
}
