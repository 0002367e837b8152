//! External process boundary.
//!
//! Every subprocess the installer spawns (package managers, `cargo`, `code`,
//! audio players) and every `PATH` lookup goes through [`CommandRunner`], so
//! steps can be exercised against a scripted runner in tests.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{InstallerError, InstallerResult};

/// Spawns programs and answers `PATH` lookups.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, inheriting stdio, and wait for it.
    ///
    /// A non-zero exit or a spawn failure is an error.
    fn run(&self, program: &str, args: &[&str]) -> InstallerResult<()>;

    /// Absolute path of `program` on `PATH`, if any.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Whether `program` is on `PATH`.
    fn exists(&self, program: &str) -> bool {
        self.locate(program).is_some()
    }
}

/// Render a command line for logs, quoting arguments that contain spaces.
pub fn format_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| {
            if part.contains(' ') {
                format!("\"{part}\"")
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// System runner
// ============================================================================

/// Runner backed by `std::process` and the `which` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> InstallerResult<()> {
        let command = format_command(program, args);
        debug!(command = %command, "Spawning");

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| InstallerError::CommandFailed {
                command: command.clone(),
                status: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            warn!(command = %command, status = %status, "Command failed");
            Err(InstallerError::CommandFailed {
                command,
                status: status.to_string(),
            })
        }
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

// ============================================================================
// Scripted runner
// ============================================================================

/// In-process runner with a fixed set of available programs.
///
/// Records every invocation instead of spawning anything. Programs listed
/// as failing return a [`InstallerError::CommandFailed`]. Used by the unit
/// and integration tests.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    available: BTreeSet<String>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark programs as present on `PATH`.
    pub fn with_programs(mut self, programs: &[&str]) -> Self {
        self.available
            .extend(programs.iter().map(|p| p.to_string()));
        self
    }

    /// Make every run of `program` fail.
    pub fn failing(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    /// Command lines run so far, formatted with [`format_command`].
    pub fn calls(&self) -> Vec<String> {
        match self.calls.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> InstallerResult<()> {
        let command = format_command(program, args);
        match self.calls.lock() {
            Ok(mut guard) => guard.push(command.clone()),
            Err(poisoned) => poisoned.into_inner().push(command.clone()),
        }
        if self.failing.contains(program) {
            return Err(InstallerError::CommandFailed {
                command,
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.available
            .contains(program)
            .then(|| PathBuf::from("/usr/bin").join(program))
    }
}

// ============================================================================
// Package managers
// ============================================================================

/// Supported system package managers, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Brew,
    Apt,
    Dnf,
    Pacman,
    Zypper,
}

impl PackageManager {
    /// Detection order.
    pub const ALL: [PackageManager; 5] = [
        PackageManager::Brew,
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Pacman,
        PackageManager::Zypper,
    ];

    /// First manager whose binary is on `PATH`.
    pub fn detect(runner: &dyn CommandRunner) -> Option<PackageManager> {
        Self::ALL
            .into_iter()
            .find(|pm| runner.exists(pm.binary()))
    }

    /// Executable probed during detection.
    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Brew => "brew",
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Brew => "brew",
            PackageManager::Apt => "apt",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
        }
    }

    /// Packages installed through this manager.
    pub fn packages(self) -> &'static [&'static str] {
        match self {
            PackageManager::Brew => &["fd", "ripgrep", "fzf", "jq", "yq", "difftastic"],
            PackageManager::Apt => &["ripgrep", "fzf", "jq", "yq", "git-delta"],
            PackageManager::Dnf => &["ripgrep", "fd-find", "fzf", "jq", "yq", "git-delta"],
            PackageManager::Pacman | PackageManager::Zypper => {
                &["ripgrep", "fd", "fzf", "jq", "yq", "git-delta"]
            }
        }
    }
}

/// Check several programs concurrently.
///
/// Lookups are independent and share no state; the result preserves the
/// input order.
pub fn tool_presence(runner: &dyn CommandRunner, tools: &[&str]) -> Vec<(String, bool)> {
    tools
        .par_iter()
        .map(|tool| (tool.to_string(), runner.exists(tool)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_command_quotes_spaces() {
        assert_eq!(
            format_command("code", &["--install-extension", "a.b", "--force"]),
            "code --install-extension a.b --force"
        );
        assert_eq!(
            format_command("afplay", &["/Users/me/My Sounds/x.wav"]),
            "afplay \"/Users/me/My Sounds/x.wav\""
        );
    }

    #[test]
    fn test_detection_order() {
        let runner = ScriptedRunner::new().with_programs(&["zypper", "dnf"]);
        assert_eq!(PackageManager::detect(&runner), Some(PackageManager::Dnf));

        let runner = ScriptedRunner::new().with_programs(&["apt-get", "brew"]);
        assert_eq!(PackageManager::detect(&runner), Some(PackageManager::Brew));

        assert_eq!(PackageManager::detect(&ScriptedRunner::new()), None);
    }

    #[test]
    fn test_package_tables() {
        assert!(PackageManager::Brew.packages().contains(&"difftastic"));
        assert!(PackageManager::Dnf.packages().contains(&"fd-find"));
        assert!(!PackageManager::Apt.packages().contains(&"fd"));
        assert_eq!(
            PackageManager::Pacman.packages(),
            PackageManager::Zypper.packages()
        );
    }

    #[test]
    fn test_scripted_runner_records_and_fails() {
        let runner = ScriptedRunner::new().failing("sudo");
        assert!(runner.run("brew", &["update"]).is_ok());
        let err = runner.run("sudo", &["dnf", "install", "-y", "jq"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command failed (exit status: 1): sudo dnf install -y jq"
        );
        assert_eq!(
            runner.calls(),
            vec!["brew update", "sudo dnf install -y jq"]
        );
    }

    #[test]
    fn test_tool_presence_preserves_order() {
        let runner = ScriptedRunner::new().with_programs(&["rg", "jq"]);
        let presence = tool_presence(&runner, &["fd", "rg", "fzf", "jq"]);
        assert_eq!(
            presence,
            vec![
                ("fd".to_string(), false),
                ("rg".to_string(), true),
                ("fzf".to_string(), false),
                ("jq".to_string(), true),
            ]
        );
    }
}
