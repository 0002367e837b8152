//! Environment report for `codex-1up doctor`.
//!
//! # Example
//!
//! ```ignore
//! use codex1up::doctor::DoctorReport;
//!
//! let report = DoctorReport::collect(&env);
//! println!("{}", report);
//! ```

use std::fmt;
use std::path::PathBuf;

use crate::context::{list_sounds, Environment};
use crate::patch::key::read_scalar_key;
use crate::patch::legacy::{legacy_rc_paths, remove_legacy_blocks, PROJECT_MARKER};
use crate::patch::AssignmentStyle;
use crate::process::{tool_presence, PackageManager};
use crate::profiles::ConfigProfiles;

/// Tools checked by the doctor.
pub const DOCTOR_TOOLS: &[&str] = &[
    "codex", "git", "fd", "fdfind", "rg", "fzf", "jq", "yq", "difft", "difftastic", "delta",
    "ast-grep", "code",
];

/// Snapshot of everything the installer manages.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub version: String,
    pub install_root: InstallRootInfo,
    pub package_manager: Option<PackageManager>,
    pub tools: Vec<(String, bool)>,
    pub config: ConfigInfo,
    pub notify: NotifyInfo,
    pub global_agents: PathStatus,
    /// rc files still carrying a legacy marker block.
    pub legacy_rc_files: Vec<PathBuf>,
}

/// Bundled assets.
#[derive(Debug, Clone, Default)]
pub struct InstallRootInfo {
    pub path: PathBuf,
    pub templates_present: bool,
    pub sounds: Vec<String>,
}

/// `~/.codex/config.toml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub profiles: Option<ConfigProfiles>,
    pub parse_error: Option<String>,
}

/// `~/.codex/notify.sh`.
#[derive(Debug, Clone, Default)]
pub struct NotifyInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub sound: Option<String>,
}

/// A path and whether it exists.
#[derive(Debug, Clone, Default)]
pub struct PathStatus {
    pub path: PathBuf,
    pub exists: bool,
}

impl DoctorReport {
    /// Collect the report. Never fails: problems become report entries.
    pub fn collect(env: &Environment) -> Self {
        let paths = env.paths();
        let assets = env.assets();
        let runner = env.runner.as_ref();

        let install_root = InstallRootInfo {
            path: env.root_dir.clone(),
            templates_present: [
                &assets.config_template,
                &assets.notify_template,
                &assets.agents_template,
            ]
            .iter()
            .all(|p| p.is_file()),
            sounds: list_sounds(&assets.sounds_dir),
        };

        let config = match ConfigProfiles::load(&paths.config) {
            Ok(profiles) => ConfigInfo {
                path: paths.config.clone(),
                exists: profiles.is_some(),
                profiles,
                parse_error: None,
            },
            Err(e) => ConfigInfo {
                path: paths.config.clone(),
                exists: paths.config.exists(),
                profiles: None,
                parse_error: Some(e.to_string()),
            },
        };

        let notify_text = std::fs::read_to_string(&paths.notify_script).ok();
        let notify = NotifyInfo {
            path: paths.notify_script.clone(),
            exists: notify_text.is_some(),
            sound: notify_text.as_deref().and_then(|t| {
                read_scalar_key(t, crate::installers::SOUND_VARIABLE, AssignmentStyle::Shell)
            }),
        };

        let legacy_rc_files = legacy_rc_paths(&env.home_dir)
            .into_iter()
            .filter(|rc| {
                std::fs::read_to_string(rc)
                    .map(|t| {
                        let cleanup = remove_legacy_blocks(&t, PROJECT_MARKER);
                        cleanup.changed() || cleanup.unterminated
                    })
                    .unwrap_or(false)
            })
            .collect();

        Self {
            version: crate::VERSION.to_string(),
            install_root,
            package_manager: PackageManager::detect(runner),
            tools: tool_presence(runner, DOCTOR_TOOLS),
            config,
            notify,
            global_agents: PathStatus {
                exists: paths.global_agents.exists(),
                path: paths.global_agents,
            },
            legacy_rc_files,
        }
    }

    /// Number of findings that need attention.
    pub fn problems(&self) -> usize {
        let mut count = 0;
        if !self.install_root.templates_present {
            count += 1;
        }
        if self.config.parse_error.is_some() {
            count += 1;
        }
        count + self.legacy_rc_files.len()
    }
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "missing"
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "codex-1up doctor")?;
        writeln!(f, "================")?;
        writeln!(f)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(
            f,
            "Install root: {} (templates {})",
            self.install_root.path.display(),
            mark(self.install_root.templates_present)
        )?;
        if !self.install_root.sounds.is_empty() {
            writeln!(f, "Bundled sounds: {}", self.install_root.sounds.join(", "))?;
        }
        writeln!(f)?;

        writeln!(f, "## Tools")?;
        match self.package_manager {
            Some(pm) => writeln!(f, "Package manager: {}", pm.name())?,
            None => writeln!(f, "Package manager: none detected")?,
        }
        for (tool, present) in &self.tools {
            writeln!(f, "  {:<11} {}", tool, mark(*present))?;
        }
        writeln!(f)?;

        writeln!(f, "## Codex config")?;
        writeln!(f, "Path: {} ({})", self.config.path.display(), mark(self.config.exists))?;
        if let Some(ref err) = self.config.parse_error {
            writeln!(f, "Parse error: {}", err)?;
        }
        if let Some(ref profiles) = self.config.profiles {
            writeln!(
                f,
                "Active profile: {}",
                profiles.active.as_deref().unwrap_or("(not set)")
            )?;
            if !profiles.available.is_empty() {
                writeln!(f, "Profiles: {}", profiles.available.join(", "))?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Notifications")?;
        writeln!(f, "Hook: {} ({})", self.notify.path.display(), mark(self.notify.exists))?;
        match self.notify.sound.as_deref() {
            Some("") => writeln!(f, "Sound: disabled")?,
            Some(sound) => writeln!(f, "Sound: {}", sound)?,
            None if self.notify.exists => writeln!(f, "Sound: not declared")?,
            None => {}
        }
        writeln!(f)?;

        writeln!(f, "## AGENTS.md")?;
        writeln!(
            f,
            "Global: {} ({})",
            self.global_agents.path.display(),
            mark(self.global_agents.exists)
        )?;
        writeln!(f)?;

        writeln!(f, "## Shell rc files")?;
        if self.legacy_rc_files.is_empty() {
            writeln!(f, "No legacy codex-1up blocks found")?;
        } else {
            for rc in &self.legacy_rc_files {
                writeln!(
                    f,
                    "Legacy block in {} (run `codex-1up install` or `codex-1up uninstall` to remove)",
                    rc.display()
                )?;
            }
        }
        Ok(())
    }
}
