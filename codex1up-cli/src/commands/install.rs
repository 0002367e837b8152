//! Install command - configure Codex CLI and its helpers.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use codex1up::install::{run_install, InstallOutcome};
use codex1up::options::ToolsAction;
use codex1up::summary::InstallSummary;
use codex1up::wizard::{PlayerPreview, Resolution, WizardSeed};
use console::style;

use super::common::{parse_sound, GlobalAgentsArg, ModeArg, OnOff, ProfileArg, YesNo};
use crate::error::CliError;
use crate::prompts::DialoguerPrompter;
use crate::runner::{is_terminal, CliRunner};

/// Arguments for the install command.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Profile to activate in ~/.codex/config.toml
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Replace an existing config.toml (a backup is kept)
    #[arg(long, value_enum)]
    pub overwrite_config: Option<YesNo>,

    /// Reasoning output in the Codex UI
    #[arg(long, value_enum)]
    pub reasoning: Option<OnOff>,

    /// Notification sound: bundled file name, absolute path, none, or skip
    #[arg(long, value_parser = parse_sound)]
    pub sound: Option<codex1up::options::NotificationSound>,

    /// What to do with ~/.codex/AGENTS.md
    #[arg(long, value_enum)]
    pub global_agents: Option<GlobalAgentsArg>,

    /// recommended applies defaults without prompting
    #[arg(long, value_enum, default_value = "manual")]
    pub mode: ModeArg,

    /// Print every action without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Accept defaults for every open choice
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Do not ask for confirmation
    #[arg(long)]
    pub skip_confirmation: bool,

    /// VS Code extension id to install
    #[arg(long, value_name = "ID")]
    pub vscode: Option<String>,

    /// Skip the VS Code extension step
    #[arg(long)]
    pub no_vscode: bool,

    /// Write a starter AGENTS.md (defaults to the current directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = ".")]
    pub agents_md: Option<PathBuf>,

    /// Do not install fd, ripgrep, fzf, jq, yq and difftastic
    #[arg(long)]
    pub skip_tools: bool,
}

impl InstallArgs {
    fn seed(&self) -> WizardSeed {
        WizardSeed {
            profile: self.profile.map(Into::into),
            overwrite_config: self.overwrite_config.map(Into::into),
            reasoning: self.reasoning.map(Into::into),
            sound: self.sound.clone(),
            global_agents: self.global_agents.map(Into::into),
            mode: self.mode.into(),
            tools: if self.skip_tools {
                ToolsAction::Skip
            } else {
                ToolsAction::Install
            },
            vscode_id: self.vscode.clone(),
            no_vscode: self.no_vscode,
            agents_md: self.agents_md.clone(),
            dry_run: self.dry_run,
            assume_yes: self.yes,
            skip_confirmation: self.skip_confirmation,
        }
    }
}

/// Run the install command.
pub fn run(args: InstallArgs, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, args.dry_run)?;
    runner.log_startup("install");

    let seed = args.seed();
    let resolution = Resolution::for_run(&seed, is_terminal());
    let env = runner.environment().clone();

    if resolution == Resolution::Interactive {
        println!();
        println!("{}", style("codex-1up").cyan().bold());
        println!();
    }

    let mut prompter = DialoguerPrompter::new();
    let previewer = PlayerPreview::new(Arc::clone(&env.runner));
    let paths = env.paths();
    let process_runner = Arc::clone(&env.runner);

    match run_install(env, &seed, resolution, &mut prompter, &previewer)? {
        InstallOutcome::Cancelled => {
            println!("Install aborted");
        }
        InstallOutcome::Completed { .. } => {
            print!("{}", InstallSummary::collect(&paths, process_runner.as_ref()));
        }
    }
    Ok(())
}
