//! Argument value types shared across CLI commands.

use clap::ValueEnum;
use codex1up::options::{
    Decision, GlobalAgentsAction, InstallMode, NotificationSound, Profile, Reasoning,
};

/// Codex profile selection.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ProfileArg {
    /// Approve on request, workspace writes
    Balanced,
    /// Read-only sandbox, approval for everything
    Safe,
    /// Lean context, low reasoning effort
    Minimal,
    /// Full access, no approvals
    Yolo,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::Safe => Profile::Safe,
            ProfileArg::Minimal => Profile::Minimal,
            ProfileArg::Yolo => Profile::Yolo,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl From<YesNo> for Decision {
    fn from(arg: YesNo) -> Self {
        match arg {
            YesNo::Yes => Decision::Yes,
            YesNo::No => Decision::No,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OnOff {
    On,
    Off,
}

impl From<OnOff> for Reasoning {
    fn from(arg: OnOff) -> Self {
        match arg {
            OnOff::On => Reasoning::On,
            OnOff::Off => Reasoning::Off,
        }
    }
}

/// What to do with `~/.codex/AGENTS.md`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum GlobalAgentsArg {
    /// Write the default template if the file is absent
    CreateDefault,
    /// Replace the file with the default template (backed up first)
    OverwriteDefault,
    /// Append the default template (backed up first)
    AppendDefault,
    /// Leave the file alone
    Skip,
}

impl From<GlobalAgentsArg> for GlobalAgentsAction {
    fn from(arg: GlobalAgentsArg) -> Self {
        match arg {
            GlobalAgentsArg::CreateDefault => GlobalAgentsAction::CreateDefault,
            GlobalAgentsArg::OverwriteDefault => GlobalAgentsAction::OverwriteDefault,
            GlobalAgentsArg::AppendDefault => GlobalAgentsAction::AppendDefault,
            GlobalAgentsArg::Skip => GlobalAgentsAction::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Apply recommended settings without prompting
    Recommended,
    /// Ask about every open choice
    Manual,
}

impl From<ModeArg> for InstallMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Recommended => InstallMode::Recommended,
            ModeArg::Manual => InstallMode::Manual,
        }
    }
}

/// Parse `--sound`: a bundled file name, an absolute path, `none` or `skip`.
pub fn parse_sound(value: &str) -> Result<NotificationSound, String> {
    NotificationSound::parse(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_sound() {
        assert_eq!(parse_sound("skip").unwrap(), NotificationSound::Unchanged);
        assert_eq!(parse_sound("none").unwrap(), NotificationSound::Disabled);
        assert_eq!(
            parse_sound("/tmp/a.wav").unwrap(),
            NotificationSound::Custom(PathBuf::from("/tmp/a.wav"))
        );
        assert!(parse_sound("").unwrap_err().contains("sound"));
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(
            GlobalAgentsArg::from_str("append-default", false).unwrap(),
            GlobalAgentsArg::AppendDefault
        );
        assert_eq!(ProfileArg::from_str("yolo", false).unwrap(), ProfileArg::Yolo);
        assert!(YesNo::from_str("maybe", false).is_err());
    }
}
