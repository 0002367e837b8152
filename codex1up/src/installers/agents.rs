//! AGENTS.md handling: the global `~/.codex/AGENTS.md` and starter files.

use std::path::{Path, PathBuf};

use crate::context::InstallerContext;
use crate::error::InstallerResult;
use crate::options::GlobalAgentsAction;
use crate::{log_info, log_ok, log_warn};

use super::InstallStep;

/// Copy the starter AGENTS.md template to `target`.
///
/// A directory target (relative paths resolve against the working
/// directory) receives `AGENTS.md` inside it. An existing file is backed up
/// first; a file that already matches the template is left alone. Returns
/// the resolved destination.
pub fn write_agents_file(ctx: &InstallerContext, target: &Path) -> InstallerResult<PathBuf> {
    let assets = ctx.assets();
    let template = ctx.read(ctx.require_asset(&assets.agents_template)?)?;

    let target = if target.is_absolute() {
        target.to_path_buf()
    } else {
        ctx.cwd.join(target)
    };
    let dest = if target.is_dir() {
        target.join("AGENTS.md")
    } else {
        target
    };

    match ctx.read_optional(&dest)? {
        Some(existing) if existing == template => {
            log_info!(ctx.logger, "{} already matches the template", dest.display());
            return Ok(dest);
        }
        Some(_) => log_warn!(ctx.logger, "{} already exists", dest.display()),
        None => {}
    }

    log_info!(ctx.logger, "Writing starter AGENTS.md to: {}", dest.display());
    let outcome = ctx.guard().write_text(&dest, &template)?;
    if outcome.written {
        log_ok!(ctx.logger, "Wrote AGENTS.md");
    }
    Ok(dest)
}

/// Append `addition` to `existing` with one blank line between them.
fn append_section(existing: &str, addition: &str) -> String {
    let separator = if existing.is_empty() || existing.ends_with("\n\n") {
        ""
    } else if existing.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };
    format!("{existing}{separator}{addition}")
}

/// Applies the chosen [`GlobalAgentsAction`] to `~/.codex/AGENTS.md`.
pub struct GlobalAgentsStep;

impl InstallStep for GlobalAgentsStep {
    fn name(&self) -> &'static str {
        "global-agents"
    }

    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()> {
        let action = ctx.options.global_agents;
        if action == GlobalAgentsAction::Skip {
            return Ok(());
        }

        let target = ctx.paths().global_agents;
        let assets = ctx.assets();
        let template = ctx.read(ctx.require_asset(&assets.agents_template)?)?;
        let existing = ctx.read_optional(&target)?;

        let new_text = match (action, existing.as_deref()) {
            (GlobalAgentsAction::CreateDefault, Some(_)) => {
                log_info!(ctx.logger, "~/.codex/AGENTS.md exists; leaving as-is");
                return Ok(());
            }
            (GlobalAgentsAction::OverwriteDefault, Some(current)) if current == template => {
                log_info!(ctx.logger, "~/.codex/AGENTS.md already matches the template");
                return Ok(());
            }
            (GlobalAgentsAction::AppendDefault, Some(current))
                if current.contains(template.trim()) =>
            {
                log_info!(ctx.logger, "~/.codex/AGENTS.md already contains the template");
                return Ok(());
            }
            (GlobalAgentsAction::AppendDefault, Some(current)) => append_section(current, &template),
            _ => template,
        };

        let outcome = ctx.guard().write_text(&target, &new_text)?;
        if outcome.written {
            let verb = match (action, existing.is_some()) {
                (GlobalAgentsAction::AppendDefault, true) => "Appended template to",
                (_, true) => "Overwrote",
                (_, false) => "Created",
            };
            log_ok!(ctx.logger, "{verb} ~/.codex/AGENTS.md");
        }
        Ok(())
    }
}

/// Writes the starter AGENTS.md requested with `--agents-md`.
pub struct StarterAgentsStep;

impl InstallStep for StarterAgentsStep {
    fn name(&self) -> &'static str {
        "agents"
    }

    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()> {
        if let Some(target) = &ctx.options.agents_md {
            write_agents_file(ctx, target)?;
        }
        Ok(())
    }
}
