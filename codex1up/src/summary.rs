//! Post-install summary.

use std::fmt;
use std::path::PathBuf;

use crate::context::CodexPaths;
use crate::process::{tool_presence, CommandRunner};
use crate::profiles::ConfigProfiles;

/// Tools listed as "detected" in the summary.
pub const DETECTED_TOOLS: &[&str] = &[
    "codex", "ast-grep", "fd", "rg", "fzf", "jq", "yq", "difft", "difftastic",
];

/// What the user ends up with after an install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub config_path: PathBuf,
    pub active_profile: Option<String>,
    pub profiles: Vec<String>,
    pub tools_present: Vec<String>,
}

impl InstallSummary {
    /// Read the config and probe the tools. A missing or unreadable config
    /// just leaves the profile fields empty.
    pub fn collect(paths: &CodexPaths, runner: &dyn CommandRunner) -> Self {
        let profiles = ConfigProfiles::load(&paths.config)
            .ok()
            .flatten()
            .unwrap_or_default();
        let tools_present = tool_presence(runner, DETECTED_TOOLS)
            .into_iter()
            .filter_map(|(tool, present)| present.then_some(tool))
            .collect();
        Self {
            config_path: paths.config.clone(),
            active_profile: profiles.active,
            profiles: profiles.available,
            tools_present,
        }
    }
}

impl fmt::Display for InstallSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "codex-1up: Installation summary")?;
        writeln!(f, "{}", "\u{2500}".repeat(32))?;
        match self.active_profile {
            Some(ref profile) => writeln!(
                f,
                "Config: {} (active profile: {})",
                self.config_path.display(),
                profile
            )?,
            None => writeln!(f, "Config: {}", self.config_path.display())?,
        }
        if !self.profiles.is_empty() {
            writeln!(f, "Profiles: {}", self.profiles.join(", "))?;
        }
        if self.tools_present.is_empty() {
            writeln!(f, "Tools detected: none")?;
        } else {
            writeln!(f, "Tools detected: {}", self.tools_present.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "Usage:")?;
        writeln!(f, "  - Switch profile for a session:  codex --profile <name>")?;
        writeln!(f, "  - List available profiles:       codex-1up config profiles")?;
        writeln!(f, "  - Persist active profile:        codex-1up config set-profile <name>")?;
        writeln!(f, "  - Write AGENTS.md to a repo:     codex-1up agents --path .")
    }
}
