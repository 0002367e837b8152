//! `~/.codex/notify.sh`, the hook Codex runs on turn completion.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::context::InstallerContext;
use crate::error::InstallerResult;
use crate::options::Decision;
use crate::patch::{patch_scalar_key, AssignmentStyle};
use crate::{log_info, log_ok};

use super::sound::{sound_setting, SOUND_VARIABLE};
use super::InstallStep;

/// Installs the notify script when the hook is wanted and absent.
///
/// A new script is written with the chosen sound already filled in, so the
/// sound step finds nothing to patch on a fresh install. An existing script
/// is never replaced: it may carry local edits, and the sound step only
/// ever patches its `DEFAULT_CODEX_SOUND` line.
pub struct NotifyHookStep;

impl InstallStep for NotifyHookStep {
    fn name(&self) -> &'static str {
        "notify-hook"
    }

    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()> {
        if ctx.options.notify() != Decision::Yes {
            debug!("Notify hook not requested");
            return Ok(());
        }

        let paths = ctx.paths();
        if paths.notify_script.exists() {
            log_info!(
                ctx.logger,
                "Keeping existing notify hook at {}",
                paths.notify_script.display()
            );
            return Ok(());
        }

        let assets = ctx.assets();
        let template = ctx.read(ctx.require_asset(&assets.notify_template)?)?;
        let script = match sound_setting(ctx) {
            Some(value) => {
                patch_scalar_key(&template, SOUND_VARIABLE, &value, AssignmentStyle::Shell).text
            }
            None => template,
        };
        let outcome = ctx
            .guard()
            .scoped_overwrite(&paths.notify_script, |target| {
                fs::write(target, &script)?;
                make_executable(target)
            })?;
        if outcome.written {
            log_ok!(
                ctx.logger,
                "Installed notify hook at {}",
                paths.notify_script.display()
            );
        }
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
