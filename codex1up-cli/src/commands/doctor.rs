//! Doctor command - report the state of everything codex-1up manages.

use codex1up::doctor::DoctorReport;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the doctor command.
pub fn run(debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, false)?;
    runner.log_startup("doctor");

    let report = DoctorReport::collect(runner.environment());
    println!("{}", report);
    Ok(())
}
