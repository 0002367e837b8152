//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show`, `config profiles` and
//! `config set-profile` for the Codex config file.

use clap::Subcommand;
use codex1up::options::InstallerOptions;
use codex1up::profiles::{set_active_profile, ConfigProfiles};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the configuration file
    Show,

    /// List the active and available profiles
    Profiles,

    /// Persist the active profile
    SetProfile {
        /// Profile name from the [profiles] table
        name: String,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, false)?;
    runner.log_startup("config");
    let path = runner.environment().paths().config;

    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Profiles => run_profiles(&path),
        ConfigCommands::SetProfile { name } => {
            let ctx = runner.context(InstallerOptions::default());
            set_active_profile(&ctx, &name)?;
            Ok(())
        }
    }
}

fn run_show(path: &std::path::Path) -> Result<(), CliError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            print!("{}", text);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(missing_config(path)),
        Err(e) => Err(codex1up::error::InstallerError::io("Failed to read", path, e).into()),
    }
}

fn run_profiles(path: &std::path::Path) -> Result<(), CliError> {
    let profiles = ConfigProfiles::load(path)?.ok_or_else(|| missing_config(path))?;

    println!(
        "Active profile: {}",
        profiles.active.as_deref().unwrap_or("(not set)")
    );
    if profiles.available.is_empty() {
        println!("No [profiles] defined in {}", path.display());
    } else {
        println!("Available profiles:");
        for name in &profiles.available {
            let marker = if profiles.active.as_deref() == Some(name.as_str()) {
                "*"
            } else {
                " "
            };
            println!("  {} {}", marker, name);
        }
    }
    Ok(())
}

fn missing_config(path: &std::path::Path) -> CliError {
    CliError::Usage(format!(
        "{} does not exist; run `codex-1up install` first",
        path.display()
    ))
}
