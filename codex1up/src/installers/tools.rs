//! Auxiliary command-line tools through the system package manager.

use crate::context::InstallerContext;
use crate::error::{InstallerError, InstallerResult};
use crate::options::ToolsAction;
use crate::process::{tool_presence, PackageManager};
use crate::{log_info, log_ok, log_plain, log_warn};

use super::{ErrorPolicy, InstallStep};

/// Tools reported after installation.
pub const SUMMARY_TOOLS: &[&str] = &[
    "fd", "fdfind", "rg", "fzf", "jq", "yq", "difft", "difftastic", "delta", "ast-grep",
];

/// Installs fd, ripgrep, fzf, jq, yq and a structural diff tool.
pub struct ToolsStep;

impl InstallStep for ToolsStep {
    fn name(&self) -> &'static str {
        "tools"
    }

    fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::ContinueOnError
    }

    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()> {
        if ctx.options.tools == ToolsAction::Skip {
            log_info!(ctx.logger, "Skipping tool installation (--skip-tools)");
            return Ok(());
        }

        match PackageManager::detect(ctx.runner.as_ref()) {
            Some(pm) => {
                log_info!(ctx.logger, "Detected package manager: {}", pm.name());
                if let Err(e) = install_packages(ctx, pm) {
                    log_warn!(ctx.logger, "{e}; continuing with remaining tool setup");
                }
            }
            None => {
                log_warn!(
                    ctx.logger,
                    "Could not detect a supported package manager; please install tools manually"
                );
                return Ok(());
            }
        }

        ensure_difftastic(ctx)?;
        link_fdfind(ctx)?;

        for (tool, present) in tool_presence(ctx.runner.as_ref(), SUMMARY_TOOLS) {
            if present {
                log_ok!(ctx.logger, "{tool} \u{2713}");
            }
        }
        Ok(())
    }
}

fn install_packages(ctx: &InstallerContext, pm: PackageManager) -> InstallerResult<()> {
    let packages = pm.packages();
    let with = |prefix: &[&'static str]| -> Vec<&'static str> {
        prefix.iter().chain(packages.iter()).copied().collect()
    };

    match pm {
        PackageManager::Brew => {
            ctx.run("brew", &["update"])?;
            ctx.run("brew", &with(&["install"]))?;
        }
        PackageManager::Apt => {
            ctx.run("sudo", &["apt-get", "update", "-y"])?;
            ctx.run_tolerated("sudo", &with(&["apt-get", "install", "-y"]));
            if !ctx.runner.exists("fd") {
                ctx.run_tolerated("sudo", &["apt-get", "install", "-y", "fd-find"]);
            }
        }
        PackageManager::Dnf => {
            ctx.run_tolerated("sudo", &with(&["dnf", "install", "-y"]));
        }
        PackageManager::Pacman => {
            ctx.run_tolerated("sudo", &with(&["pacman", "-Sy", "--noconfirm"]));
        }
        PackageManager::Zypper => {
            ctx.run("sudo", &["zypper", "refresh"])?;
            ctx.run_tolerated("sudo", &with(&["zypper", "install", "-y"]));
        }
    }
    Ok(())
}

fn ensure_difftastic(ctx: &InstallerContext) -> InstallerResult<()> {
    if ctx.runner.exists("difft") || ctx.runner.exists("difftastic") {
        return Ok(());
    }
    if ctx.runner.exists("cargo") {
        log_info!(ctx.logger, "Installing difftastic via cargo");
        ctx.run("cargo", &["install", "difftastic"])
    } else {
        log_warn!(
            ctx.logger,
            "difftastic not found and Rust/cargo missing; falling back to git-delta"
        );
        Ok(())
    }
}

/// Debian ships fd as `fdfind`; expose it as `~/.local/bin/fd`.
fn link_fdfind(ctx: &InstallerContext) -> InstallerResult<()> {
    if ctx.runner.exists("fd") {
        return Ok(());
    }
    let Some(fdfind) = ctx.runner.locate("fdfind") else {
        return Ok(());
    };

    let local_bin = ctx.home_dir.join(".local").join("bin");
    let link = local_bin.join("fd");
    if link.exists() || link.symlink_metadata().is_ok() {
        return Ok(());
    }

    if ctx.dry_run() {
        log_plain!(
            ctx.logger,
            "[dry-run] ln -s {} {}",
            fdfind.display(),
            link.display()
        );
        return Ok(());
    }

    ctx.ensure_dir(&local_bin)?;
    symlink(&fdfind, &link).map_err(|e| InstallerError::io("Failed to link", &link, e))?;
    log_ok!(ctx.logger, "fd alias created at ~/.local/bin/fd");
    Ok(())
}

#[cfg(unix)]
fn symlink(src: &std::path::Path, dst: &std::path::Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(not(unix))]
fn symlink(src: &std::path::Path, dst: &std::path::Path) -> std::io::Result<()> {
    std::fs::copy(src, dst).map(|_| ())
}
