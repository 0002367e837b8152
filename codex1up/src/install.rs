//! The `install` flow: gather facts, resolve options, run the pipeline.
//!
//! Cancellation anywhere in the wizard ends the flow before a single
//! file is touched.

use tracing::info;

use crate::context::Environment;
use crate::error::InstallerResult;
use crate::installers::{run_installer, PipelineReport};
use crate::options::InstallerOptions;
use crate::wizard::{
    resolve, Prompter, Resolution, SoundPreviewer, WizardFacts, WizardOutcome, WizardSeed,
};
use crate::{log_info, log_ok};

/// How an install ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Completed {
        options: InstallerOptions,
        report: PipelineReport,
    },
    Cancelled,
}

/// Run one install.
pub fn run_install(
    env: Environment,
    seed: &WizardSeed,
    resolution: Resolution,
    prompter: &mut dyn Prompter,
    previewer: &dyn SoundPreviewer,
) -> InstallerResult<InstallOutcome> {
    let facts = WizardFacts::gather(&env.paths(), &env.assets());
    info!(
        ?resolution,
        config_exists = facts.config_exists,
        notify_exists = facts.notify_exists,
        sounds = facts.sounds.len(),
        "Starting install"
    );

    let options = match resolve(seed, &facts, resolution, prompter, previewer)? {
        WizardOutcome::Resolved(options) => options,
        WizardOutcome::Cancelled => {
            info!("Install cancelled in wizard");
            return Ok(InstallOutcome::Cancelled);
        }
    };

    let ctx = env.into_context(options);
    log_info!(
        ctx.logger,
        "Profile: {} | sound: {} | global AGENTS.md: {}",
        ctx.options.profile,
        ctx.options.notification_sound.label(),
        ctx.options.global_agents.as_str()
    );
    if ctx.dry_run() {
        log_info!(ctx.logger, "Dry run: no files will be changed");
    }

    let report = run_installer(&ctx)?;
    if report.degraded.is_empty() {
        log_ok!(ctx.logger, "Install finished");
    } else {
        log_ok!(
            ctx.logger,
            "Install finished ({} step(s) with warnings)",
            report.degraded.len()
        );
    }

    Ok(InstallOutcome::Completed {
        options: ctx.options,
        report,
    })
}
