//! VS Code extension install.

use crate::context::InstallerContext;
use crate::error::InstallerResult;
use crate::{log_info, log_ok, log_warn};

use super::{ErrorPolicy, InstallStep};

pub struct VscodeStep;

impl InstallStep for VscodeStep {
    fn name(&self) -> &'static str {
        "vscode"
    }

    fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::ContinueOnError
    }

    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()> {
        if ctx.options.no_vscode {
            return Ok(());
        }
        let Some(id) = ctx.options.vscode_id.as_deref() else {
            log_info!(
                ctx.logger,
                "VS Code extension id not provided. Use: --vscode <publisher.extension>"
            );
            return Ok(());
        };
        if !ctx.runner.exists("code") {
            log_warn!(
                ctx.logger,
                "'code' (VS Code) not in PATH; skipping extension install"
            );
            return Ok(());
        }

        log_info!(ctx.logger, "Installing VS Code extension: {id}");
        ctx.run("code", &["--install-extension", id, "--force"])?;
        if !ctx.dry_run() {
            log_ok!(
                ctx.logger,
                "VS Code extension '{id}' installed (or already present)"
            );
        }
        Ok(())
    }
}
