//! Notification sound and legacy rc cleanup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::context::InstallerContext;
use crate::error::{InstallerError, InstallerResult};
use crate::options::{Decision, NotificationSound};
use crate::patch::key::patch_scalar_key;
use crate::patch::legacy::{legacy_rc_paths, remove_legacy_blocks, PROJECT_MARKER};
use crate::patch::{AssignmentStyle, KeyOutcome};
use crate::{log_info, log_ok, log_plain, log_warn};

use super::InstallStep;

/// Variable in `notify.sh` holding the sound file path.
pub const SOUND_VARIABLE: &str = "DEFAULT_CODEX_SOUND";

/// Value `DEFAULT_CODEX_SOUND` ends up with for the resolved choice.
///
/// `None` when the choice leaves the script alone or the sound file is
/// missing.
pub(super) fn sound_setting(ctx: &InstallerContext) -> Option<String> {
    match &ctx.options.notification_sound {
        NotificationSound::Unchanged => None,
        NotificationSound::Disabled => Some(String::new()),
        NotificationSound::Bundled(name) => ctx
            .assets()
            .sounds_dir
            .join(name)
            .is_file()
            .then(|| ctx.paths().sounds_dir.join(name).to_string_lossy().into_owned()),
        NotificationSound::Custom(path) => path
            .is_file()
            .then(|| path.to_string_lossy().into_owned()),
    }
}

/// Remove legacy `codex-1up` blocks from the shell rc files.
///
/// Returns the files that were (or in dry-run, would be) rewritten.
pub fn cleanup_legacy_rc_files(ctx: &InstallerContext) -> InstallerResult<Vec<PathBuf>> {
    let mut cleaned = Vec::new();

    for rc in legacy_rc_paths(&ctx.home_dir) {
        let Some(text) = ctx.read_optional(&rc)? else {
            continue;
        };
        let cleanup = remove_legacy_blocks(&text, PROJECT_MARKER);
        if cleanup.unterminated {
            log_warn!(
                ctx.logger,
                "{} has an unterminated {} block; left in place",
                rc.display(),
                PROJECT_MARKER
            );
        }
        if !cleanup.changed() {
            continue;
        }

        let outcome = ctx.guard().write_text(&rc, &cleanup.text)?;
        if outcome.written {
            log_ok!(
                ctx.logger,
                "Cleaned up legacy {} block from {}",
                PROJECT_MARKER,
                rc.display()
            );
        }
        cleaned.push(rc);
    }

    Ok(cleaned)
}

/// Configures `DEFAULT_CODEX_SOUND` in the notify script.
///
/// Always starts with the legacy rc cleanup, whatever the sound choice.
pub struct SoundStep;

impl InstallStep for SoundStep {
    fn name(&self) -> &'static str {
        "sound"
    }

    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()> {
        cleanup_legacy_rc_files(ctx)?;

        let assets = ctx.assets();
        let source = match &ctx.options.notification_sound {
            NotificationSound::Unchanged => {
                log_info!(ctx.logger, "Leaving notification sound setup unchanged");
                return Ok(());
            }
            NotificationSound::Disabled => {
                patch_notify_script(ctx, "")?;
                log_ok!(ctx.logger, "Notification sound disabled");
                return Ok(());
            }
            NotificationSound::Bundled(name) => assets.sounds_dir.join(name),
            NotificationSound::Custom(path) => path.clone(),
        };

        if !source.is_file() {
            log_warn!(
                ctx.logger,
                "Sound file {} not found; skipping sound setup",
                source.display()
            );
            return Ok(());
        }

        // Bundled sounds are copied next to the config; custom files are
        // referenced where they are.
        let dest = if source.starts_with(&assets.sounds_dir) {
            install_sound(ctx, &source)?
        } else {
            source
        };

        patch_notify_script(ctx, &dest.to_string_lossy())?;
        log_ok!(ctx.logger, "Notification sound configured: {}", dest.display());
        Ok(())
    }
}

/// Copy a bundled sound into `~/.codex/sounds`, skipping identical files.
fn install_sound(ctx: &InstallerContext, source: &Path) -> InstallerResult<PathBuf> {
    let sounds_dir = ctx.paths().sounds_dir;
    let file_name = source
        .file_name()
        .ok_or_else(|| InstallerError::InvalidValue {
            field: "sound",
            value: source.display().to_string(),
            reason: "not a file path".to_string(),
        })?;
    let dest = sounds_dir.join(file_name);

    let same = match (fs::read(source), fs::read(&dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        debug!(dest = %dest.display(), "Sound already installed");
        return Ok(dest);
    }

    if ctx.dry_run() {
        log_plain!(
            ctx.logger,
            "[dry-run] cp {} {}",
            source.display(),
            dest.display()
        );
        return Ok(dest);
    }
    ctx.ensure_dir(&sounds_dir)?;
    ctx.guard()
        .scoped_overwrite(&dest, |target| fs::copy(source, target).map(|_| ()))?;
    Ok(dest)
}

/// Point `DEFAULT_CODEX_SOUND` at `value` (empty disables the sound).
fn patch_notify_script(ctx: &InstallerContext, value: &str) -> InstallerResult<()> {
    let script = ctx.paths().notify_script;
    let Some(text) = ctx.read_optional(&script)? else {
        if ctx.dry_run() && ctx.options.notify() == Decision::Yes {
            // The hook step would have created it.
            log_plain!(
                ctx.logger,
                "[dry-run] patch {} {} -> {:?}",
                script.display(),
                SOUND_VARIABLE,
                value
            );
        } else {
            log_warn!(
                ctx.logger,
                "{} not found; sound preference not recorded",
                script.display()
            );
        }
        return Ok(());
    };

    let patch = patch_scalar_key(&text, SOUND_VARIABLE, value, AssignmentStyle::Shell);
    match patch.outcome {
        KeyOutcome::Missing => {
            log_warn!(
                ctx.logger,
                "{} does not declare {}; left unchanged",
                script.display(),
                SOUND_VARIABLE
            );
        }
        KeyOutcome::Unchanged => {
            debug!(script = %script.display(), "Sound already set");
        }
        KeyOutcome::Replaced(_) | KeyOutcome::Inserted => {
            ctx.guard().write_text(&script, &patch.text)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Environment;
    use crate::log::MemoryLogger;
    use crate::options::InstallerOptions;
    use std::sync::Arc;
    use tempfile::TempDir;

    const SCRIPT: &str = "#!/usr/bin/env bash\nDEFAULT_CODEX_SOUND=\"\"\nplay \"$DEFAULT_CODEX_SOUND\"\n";

    struct Fixture {
        home: TempDir,
        root: TempDir,
        logger: Arc<MemoryLogger>,
    }

    impl Fixture {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            fs::create_dir_all(root.path().join("sounds")).unwrap();
            fs::write(root.path().join("sounds/noti_1.wav"), b"RIFF1").unwrap();
            let home = TempDir::new().unwrap();
            fs::create_dir_all(home.path().join(".codex")).unwrap();
            fs::write(home.path().join(".codex/notify.sh"), SCRIPT).unwrap();
            Self {
                home,
                root,
                logger: Arc::new(MemoryLogger::new()),
            }
        }

        fn run(&self, sound: NotificationSound) -> InstallerResult<()> {
            let ctx = Environment::new(self.home.path(), self.root.path())
                .with_logger(self.logger.clone())
                .into_context(InstallerOptions {
                    notification_sound: sound,
                    ..InstallerOptions::default()
                });
            SoundStep.run(&ctx)
        }

        fn script(&self) -> String {
            fs::read_to_string(self.home.path().join(".codex/notify.sh")).unwrap()
        }
    }

    #[test]
    fn test_bundled_sound_copied_and_patched() {
        let fx = Fixture::new();
        fx.run(NotificationSound::Bundled("noti_1.wav".into())).unwrap();

        let dest = fx.home.path().join(".codex/sounds/noti_1.wav");
        assert_eq!(fs::read(&dest).unwrap(), b"RIFF1");
        assert!(fx
            .script()
            .contains(&format!("DEFAULT_CODEX_SOUND=\"{}\"", dest.display())));
    }

    #[test]
    fn test_rerun_is_stable() {
        let fx = Fixture::new();
        fx.run(NotificationSound::Bundled("noti_1.wav".into())).unwrap();
        let first = fx.script();
        fx.run(NotificationSound::Bundled("noti_1.wav".into())).unwrap();
        assert_eq!(fx.script(), first);

        let backups = fs::read_dir(fx.home.path().join(".codex"))
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .starts_with("notify.sh.backup.")
            })
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_custom_sound_referenced_in_place() {
        let fx = Fixture::new();
        let custom = fx.home.path().join("ding.ogg");
        fs::write(&custom, b"OggS").unwrap();
        fx.run(NotificationSound::Custom(custom.clone())).unwrap();
        assert!(fx.script().contains(&custom.display().to_string()));
        assert!(!fx.home.path().join(".codex/sounds/ding.ogg").exists());
    }

    #[test]
    fn test_disabled_clears_variable() {
        let fx = Fixture::new();
        fs::write(
            fx.home.path().join(".codex/notify.sh"),
            "DEFAULT_CODEX_SOUND=\"/x.wav\"\n",
        )
        .unwrap();
        fx.run(NotificationSound::Disabled).unwrap();
        assert_eq!(fx.script(), "DEFAULT_CODEX_SOUND=\"\"\n");
        assert!(fx.logger.contains("Notification sound disabled"));
    }

    #[test]
    fn test_missing_sound_warns_and_continues() {
        let fx = Fixture::new();
        fx.run(NotificationSound::Bundled("nope.wav".into())).unwrap();
        assert_eq!(fx.script(), SCRIPT);
        assert!(fx.logger.contains("skipping sound setup"));
    }

    #[test]
    fn test_legacy_cleanup_runs_even_when_unchanged() {
        let fx = Fixture::new();
        let rc = fx.home.path().join(".zshrc");
        fs::write(
            &rc,
            "export A=1\n# >>> codex-1up >>>\nalias cx=codex\n# <<< codex-1up <<<\n",
        )
        .unwrap();

        fx.run(NotificationSound::Unchanged).unwrap();
        assert_eq!(fs::read_to_string(&rc).unwrap(), "export A=1\n");
        assert_eq!(fx.script(), SCRIPT);
    }

    #[test]
    fn test_clean_rc_file_not_rewritten() {
        let fx = Fixture::new();
        let rc = fx.home.path().join(".bashrc");
        fs::write(&rc, "export A=1\n").unwrap();
        fx.run(NotificationSound::Unchanged).unwrap();
        let names: Vec<String> = fs::read_dir(fx.home.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(!names.iter().any(|n| n.starts_with(".bashrc.backup.")));
    }
}
