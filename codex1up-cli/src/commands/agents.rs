//! Agents command - write the starter AGENTS.md into a repository.

use std::path::Path;

use codex1up::installers::write_agents_file;
use codex1up::options::InstallerOptions;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the agents command.
pub fn run(path: &Path, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, false)?;
    runner.log_startup("agents");

    let ctx = runner.context(InstallerOptions::default());
    let dest = write_agents_file(&ctx, path)?;
    println!("Wrote {}", dest.display());
    Ok(())
}
