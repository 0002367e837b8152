//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use codex1up::error::InstallerError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Home directory could not be determined
    NoHome,
    /// Invalid argument combination or value
    Usage(String),
    /// Failure inside the installer
    Install(InstallerError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Install(InstallerError::MissingAsset { .. }) => {
                eprintln!();
                eprintln!("The bundled templates could not be located. Either:");
                eprintln!("  1. Run codex-1up from its checkout or release directory");
                eprintln!("  2. Set CODEX_1UP_ROOT to the directory containing templates/");
            }
            CliError::Install(InstallerError::ConfigParse { .. }) => {
                eprintln!();
                eprintln!("Fix the file by hand or reinstall it with:");
                eprintln!("  codex-1up install --overwrite-config yes");
            }
            CliError::Install(InstallerError::CommandFailed { .. }) => {
                eprintln!();
                eprintln!("Re-run with --debug and check ~/.codex/log/codex-1up.log for details.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::NoHome => write!(f, "Could not determine the home directory"),
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Install(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Install(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InstallerError> for CliError {
    fn from(e: InstallerError) -> Self {
        CliError::Install(e)
    }
}
