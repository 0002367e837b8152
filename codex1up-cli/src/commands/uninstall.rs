//! Uninstall command - remove shell wiring and the notify hook.

use codex1up::options::InstallerOptions;
use codex1up::uninstall::uninstall;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the uninstall command.
pub fn run(dry_run: bool, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, dry_run)?;
    runner.log_startup("uninstall");

    let ctx = runner.context(InstallerOptions {
        dry_run,
        ..InstallerOptions::default()
    });
    let report = uninstall(&ctx)?;

    if report.cleaned_rc_files.is_empty() && report.notify_backup.is_none() {
        println!("Nothing to uninstall");
    }
    Ok(())
}
