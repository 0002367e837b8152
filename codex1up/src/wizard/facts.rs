//! Inputs to the resolver: flag values and filesystem facts.

use std::path::PathBuf;

use crate::context::{list_sounds, AssetPaths, CodexPaths};
use crate::options::{
    Decision, GlobalAgentsAction, InstallMode, NotificationSound, Profile, Reasoning, ToolsAction,
};

/// Filesystem facts that decide which questions are asked and what the
/// defaults are. Gathered once before the wizard starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardFacts {
    pub config_exists: bool,
    pub notify_exists: bool,
    pub global_agents_exists: bool,
    /// Bundled sound file names, sorted.
    pub sounds: Vec<String>,
    /// Directory the bundled sounds live in (for previews).
    pub sounds_dir: PathBuf,
}

impl WizardFacts {
    pub fn gather(paths: &CodexPaths, assets: &AssetPaths) -> Self {
        Self {
            config_exists: paths.config.exists(),
            notify_exists: paths.notify_script.exists(),
            global_agents_exists: paths.global_agents.exists(),
            sounds: list_sounds(&assets.sounds_dir),
            sounds_dir: assets.sounds_dir.clone(),
        }
    }
}

/// Values supplied on the command line.
///
/// `None` means "not given"; the resolver fills it in. The remaining
/// fields pass straight through to the options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardSeed {
    pub profile: Option<Profile>,
    pub overwrite_config: Option<Decision>,
    pub reasoning: Option<Reasoning>,
    pub sound: Option<NotificationSound>,
    pub global_agents: Option<GlobalAgentsAction>,
    pub mode: InstallMode,
    pub tools: ToolsAction,
    pub vscode_id: Option<String>,
    pub no_vscode: bool,
    pub agents_md: Option<PathBuf>,
    pub dry_run: bool,
    pub assume_yes: bool,
    pub skip_confirmation: bool,
}

/// How open decision points are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Interactive,
    Unattended,
    Recommended,
}

impl Resolution {
    /// Pick the resolution for a run.
    ///
    /// `terminal` is whether stdout is an interactive terminal.
    pub fn for_run(seed: &WizardSeed, terminal: bool) -> Self {
        if seed.mode == InstallMode::Recommended {
            Resolution::Recommended
        } else if !terminal || seed.dry_run || seed.assume_yes || seed.skip_confirmation {
            Resolution::Unattended
        } else {
            Resolution::Interactive
        }
    }
}
