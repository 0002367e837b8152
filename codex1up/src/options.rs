//! Resolved installer options.
//!
//! [`InstallerOptions`] is the immutable snapshot every installer step
//! consumes. Each field is a closed enum, so a value of this type is fully
//! resolved by construction: there is no "pending" state to observe.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::InstallerError;

// ============================================================================
// Profile
// ============================================================================

/// Built-in Codex profiles shipped in the config template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    #[default]
    Balanced,
    Safe,
    Minimal,
    Yolo,
}

impl Profile {
    /// All built-in profiles in menu order.
    pub const ALL: [Profile; 4] = [
        Profile::Balanced,
        Profile::Safe,
        Profile::Minimal,
        Profile::Yolo,
    ];

    /// Profile name as written to `config.toml`.
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Balanced => "balanced",
            Profile::Safe => "safe",
            Profile::Minimal => "minimal",
            Profile::Yolo => "yolo",
        }
    }

    /// One-line description for menus.
    pub fn description(self) -> &'static str {
        match self {
            Profile::Balanced => "approve on request, workspace writes",
            Profile::Safe => "read-only sandbox, approval for everything",
            Profile::Minimal => "lean context, low reasoning effort",
            Profile::Yolo => "full access, no approvals",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Profile::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| InstallerError::InvalidValue {
                field: "profile",
                value: s.to_string(),
                reason: "expected balanced, safe, minimal or yolo".to_string(),
            })
    }
}

// ============================================================================
// Small tri-/bi-state choices
// ============================================================================

/// Explicit yes/no with a distinct "not applicable" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    Yes,
    No,
    #[default]
    Unset,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Yes => "yes",
            Decision::No => "no",
            Decision::Unset => "unset",
        }
    }
}

impl FromStr for Decision {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Decision::Yes),
            "no" | "n" | "false" => Ok(Decision::No),
            _ => Err(InstallerError::InvalidValue {
                field: "overwrite-config",
                value: s.to_string(),
                reason: "expected yes or no".to_string(),
            }),
        }
    }
}

/// Whether Codex shows raw agent reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reasoning {
    #[default]
    On,
    Off,
}

impl Reasoning {
    pub fn as_str(self) -> &'static str {
        match self {
            Reasoning::On => "on",
            Reasoning::Off => "off",
        }
    }
}

impl FromStr for Reasoning {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" => Ok(Reasoning::On),
            "off" | "false" | "no" => Ok(Reasoning::Off),
            _ => Err(InstallerError::InvalidValue {
                field: "reasoning",
                value: s.to_string(),
                reason: "expected on or off".to_string(),
            }),
        }
    }
}

/// Whether the wizard prompts or takes recommended defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallMode {
    Recommended,
    #[default]
    Manual,
}

impl FromStr for InstallMode {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recommended" => Ok(InstallMode::Recommended),
            "manual" => Ok(InstallMode::Manual),
            _ => Err(InstallerError::InvalidValue {
                field: "mode",
                value: s.to_string(),
                reason: "expected recommended or manual".to_string(),
            }),
        }
    }
}

/// Whether the auxiliary tools step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolsAction {
    #[default]
    Install,
    Skip,
}

// ============================================================================
// Notification sound
// ============================================================================

/// File extensions accepted for custom sounds.
pub const SOUND_EXTENSIONS: [&str; 3] = ["wav", "mp3", "ogg"];

/// Bundled sound preferred as the default.
pub const DEFAULT_SOUND: &str = "noti_1.wav";

/// What to do with the notification hook's sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationSound {
    /// Leave the existing notify setup alone (`skip`).
    Unchanged,
    /// Keep the hook but clear the sound (`none`).
    Disabled,
    /// A file from the bundled `sounds/` directory, by name.
    Bundled(String),
    /// An absolute path to a user-supplied sound file.
    Custom(PathBuf),
}

impl NotificationSound {
    /// Interpret a `--sound` argument.
    ///
    /// `skip` and `none` are case-insensitive sentinels. Anything else must
    /// be an absolute path or a bare file name (resolved against the
    /// bundled sounds directory later).
    pub fn parse(arg: &str) -> Result<Self, InstallerError> {
        let trimmed = arg.trim();
        let invalid = |reason: &str| InstallerError::InvalidValue {
            field: "sound",
            value: arg.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("expected a file name, an absolute path, \"none\" or \"skip\""));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "skip" => return Ok(NotificationSound::Unchanged),
            "none" => return Ok(NotificationSound::Disabled),
            _ => {}
        }

        let path = Path::new(trimmed);
        if path.is_absolute() {
            Ok(NotificationSound::Custom(path.to_path_buf()))
        } else if path.components().count() == 1 {
            Ok(NotificationSound::Bundled(trimmed.to_string()))
        } else {
            Err(invalid("relative paths are not supported; use an absolute path"))
        }
    }

    /// Notify-hook decision implied by this choice.
    ///
    /// Only [`Unchanged`](Self::Unchanged) leaves the hook alone; every other
    /// choice installs or keeps it.
    pub fn notify(&self) -> Decision {
        match self {
            NotificationSound::Unchanged => Decision::No,
            _ => Decision::Yes,
        }
    }

    /// Short label for menus and the summary.
    pub fn label(&self) -> String {
        match self {
            NotificationSound::Unchanged => "skip".to_string(),
            NotificationSound::Disabled => "none".to_string(),
            NotificationSound::Bundled(name) => name.clone(),
            NotificationSound::Custom(path) => path.display().to_string(),
        }
    }
}

/// True if `path` has one of the supported sound extensions.
pub fn has_sound_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOUND_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)))
}

// ============================================================================
// Global AGENTS.md
// ============================================================================

/// Handling of `~/.codex/AGENTS.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobalAgentsAction {
    CreateDefault,
    OverwriteDefault,
    AppendDefault,
    #[default]
    Skip,
}

impl GlobalAgentsAction {
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalAgentsAction::CreateDefault => "create-default",
            GlobalAgentsAction::OverwriteDefault => "overwrite-default",
            GlobalAgentsAction::AppendDefault => "append-default",
            GlobalAgentsAction::Skip => "skip",
        }
    }
}

impl FromStr for GlobalAgentsAction {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create-default" => Ok(GlobalAgentsAction::CreateDefault),
            "overwrite-default" => Ok(GlobalAgentsAction::OverwriteDefault),
            "append-default" => Ok(GlobalAgentsAction::AppendDefault),
            "skip" => Ok(GlobalAgentsAction::Skip),
            _ => Err(InstallerError::InvalidValue {
                field: "global-agents",
                value: s.to_string(),
                reason: "expected create-default, overwrite-default, append-default or skip"
                    .to_string(),
            }),
        }
    }
}

// ============================================================================
// InstallerOptions
// ============================================================================

/// Fully resolved options for one installer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerOptions {
    pub profile: Profile,
    /// Replace an existing `config.toml`. `Unset` when none exists.
    pub overwrite_config: Decision,
    pub reasoning: Reasoning,
    pub notification_sound: NotificationSound,
    pub global_agents: GlobalAgentsAction,
    pub mode: InstallMode,
    pub tools: ToolsAction,
    /// Editor extension id for `code --install-extension`.
    pub vscode_id: Option<String>,
    pub no_vscode: bool,
    /// Target for the starter AGENTS.md (file or directory).
    pub agents_md: Option<PathBuf>,
    pub dry_run: bool,
    pub assume_yes: bool,
    pub skip_confirmation: bool,
}

impl InstallerOptions {
    /// Notify-hook decision, derived from the sound choice.
    pub fn notify(&self) -> Decision {
        self.notification_sound.notify()
    }

    /// True when no prompt may be shown.
    pub fn unattended(&self) -> bool {
        self.dry_run || self.assume_yes || self.skip_confirmation
    }
}

impl Default for InstallerOptions {
    fn default() -> Self {
        Self {
            profile: Profile::Balanced,
            overwrite_config: Decision::Unset,
            reasoning: Reasoning::On,
            notification_sound: NotificationSound::Bundled(DEFAULT_SOUND.to_string()),
            global_agents: GlobalAgentsAction::Skip,
            mode: InstallMode::Manual,
            tools: ToolsAction::Install,
            vscode_id: None,
            no_vscode: false,
            agents_md: None,
            dry_run: false,
            assume_yes: false,
            skip_confirmation: false,
        }
    }
}
