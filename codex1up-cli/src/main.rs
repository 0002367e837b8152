//! codex-1up CLI - Command-line interface
//!
//! This binary provides a command-line interface to the codex1up library.

mod commands;
mod console_logger;
mod error;
mod prompts;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::install::InstallArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "codex-1up")]
#[command(version = codex1up::VERSION)]
#[command(about = "Power up Codex CLI with clean profiles config and helpers", long_about = None)]
struct Cli {
    /// Enable debug logging in ~/.codex/log/codex-1up.log
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install and configure Codex CLI, notifications and helpers
    Install(InstallArgs),

    /// Write an AGENTS.md template
    Agents {
        /// Target repo path or file
        #[arg(long)]
        path: PathBuf,
    },

    /// Check the installation
    Doctor,

    /// Remove shell wiring and the notify hook
    Uninstall {
        /// Print every action without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect and edit ~/.codex/config.toml
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Install(args) => commands::install::run(args, cli.debug),
        Commands::Agents { path } => commands::agents::run(&path, cli.debug),
        Commands::Doctor => commands::doctor::run(cli.debug),
        Commands::Uninstall { dry_run } => commands::uninstall::run(dry_run, cli.debug),
        Commands::Config(command) => commands::config::run(command, cli.debug),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_agents_md_without_value_defaults_to_cwd() {
        let cli = Cli::try_parse_from(["codex-1up", "install", "--agents-md"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert_eq!(args.agents_md, Some(PathBuf::from("."))),
            _ => panic!("expected install"),
        }
    }

    #[test]
    fn test_install_flags_parse() {
        let cli = Cli::try_parse_from([
            "codex-1up",
            "install",
            "--profile",
            "yolo",
            "--overwrite-config",
            "yes",
            "--sound",
            "none",
            "--global-agents",
            "append-default",
            "--mode",
            "recommended",
            "--yes",
            "--skip-tools",
        ])
        .unwrap();
        let Commands::Install(args) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(args.profile, Some(commands::common::ProfileArg::Yolo));
        assert!(args.yes);
        assert!(args.skip_tools);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Cli::try_parse_from(["codex-1up", "install", "--profile", "turbo"]).is_err());
        assert!(Cli::try_parse_from(["codex-1up", "install", "--sound", ""]).is_err());
        assert!(Cli::try_parse_from(["codex-1up", "install", "--reasoning", "maybe"]).is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["codex-1up", "config", "set-profile", "safe"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::SetProfile { ref name }) if name == "safe"
        ));
    }
}
