//! Per-invocation execution context.
//!
//! [`Environment`] captures the process-level facts (directories, logger,
//! process runner) once at startup. Combined with the resolved
//! [`InstallerOptions`] it becomes the [`InstallerContext`] that every
//! installer step receives explicitly; nothing below this module reads the
//! home directory or working directory from globals.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{InstallerError, InstallerResult};
use crate::log::{Logger, NoOpLogger};
use crate::options::InstallerOptions;
use crate::patch::BackupGuard;
use crate::process::{format_command, CommandRunner, SystemCommandRunner};

/// File that identifies an install root.
pub const ROOT_SENTINEL: &str = "templates/codex-config.toml";

/// Maximum number of directories walked upward when locating the root.
const ROOT_SEARCH_DEPTH: usize = 6;

// ============================================================================
// Well-known paths
// ============================================================================

/// Locations under `~/.codex` that the installer manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodexPaths {
    pub codex_dir: PathBuf,
    pub config: PathBuf,
    pub notify_script: PathBuf,
    pub sounds_dir: PathBuf,
    pub global_agents: PathBuf,
    pub log_dir: PathBuf,
}

impl CodexPaths {
    pub fn new(home: &Path) -> Self {
        let codex_dir = home.join(".codex");
        Self {
            config: codex_dir.join("config.toml"),
            notify_script: codex_dir.join("notify.sh"),
            sounds_dir: codex_dir.join("sounds"),
            global_agents: codex_dir.join("AGENTS.md"),
            log_dir: codex_dir.join("log"),
            codex_dir,
        }
    }
}

/// Bundled templates and sounds inside the install root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub config_template: PathBuf,
    pub notify_template: PathBuf,
    pub agents_template: PathBuf,
    pub sounds_dir: PathBuf,
}

impl AssetPaths {
    pub fn new(root: &Path) -> Self {
        let templates = root.join("templates");
        Self {
            config_template: templates.join("codex-config.toml"),
            notify_template: templates.join("notify.sh"),
            agents_template: templates.join("agent-templates").join("AGENTS-default.md"),
            sounds_dir: root.join("sounds"),
        }
    }
}

/// Walk up from `start` looking for a directory containing [`ROOT_SENTINEL`].
pub fn find_install_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(ROOT_SEARCH_DEPTH)
        .find(|dir| dir.join(ROOT_SENTINEL).is_file())
        .map(Path::to_path_buf)
}

/// Bundled sound files (`.wav`, `.mp3`, `.ogg`) in `dir`, sorted by name.
///
/// A missing directory yields an empty list.
pub fn list_sounds(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut sounds: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| crate::options::has_sound_extension(&entry.path()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    sounds.sort();
    sounds
}

// ============================================================================
// Environment
// ============================================================================

/// Process-level facts, captured once per invocation.
#[derive(Clone)]
pub struct Environment {
    pub cwd: PathBuf,
    pub home_dir: PathBuf,
    pub root_dir: PathBuf,
    pub log_file: PathBuf,
    pub logger: Arc<dyn Logger>,
    pub runner: Arc<dyn CommandRunner>,
}

impl Environment {
    /// Environment with a silent logger and the system process runner.
    pub fn new(home_dir: impl Into<PathBuf>, root_dir: impl Into<PathBuf>) -> Self {
        let home_dir = home_dir.into();
        let cwd = std::env::current_dir().unwrap_or_else(|_| home_dir.clone());
        let log_file = CodexPaths::new(&home_dir)
            .log_dir
            .join(crate::logging::default_log_file());
        Self {
            cwd,
            home_dir,
            root_dir: root_dir.into(),
            log_file,
            logger: Arc::new(NoOpLogger),
            runner: Arc::new(SystemCommandRunner),
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn paths(&self) -> CodexPaths {
        CodexPaths::new(&self.home_dir)
    }

    pub fn assets(&self) -> AssetPaths {
        AssetPaths::new(&self.root_dir)
    }

    /// Bind resolved options, producing the context handed to steps.
    pub fn into_context(self, options: InstallerOptions) -> InstallerContext {
        InstallerContext {
            cwd: self.cwd,
            home_dir: self.home_dir,
            root_dir: self.root_dir,
            log_file: self.log_file,
            options,
            logger: self.logger,
            runner: self.runner,
        }
    }
}

// ============================================================================
// InstallerContext
// ============================================================================

/// Everything an installer step may consult.
pub struct InstallerContext {
    pub cwd: PathBuf,
    pub home_dir: PathBuf,
    pub root_dir: PathBuf,
    pub log_file: PathBuf,
    pub options: InstallerOptions,
    pub logger: Arc<dyn Logger>,
    pub runner: Arc<dyn CommandRunner>,
}

impl InstallerContext {
    pub fn paths(&self) -> CodexPaths {
        CodexPaths::new(&self.home_dir)
    }

    pub fn assets(&self) -> AssetPaths {
        AssetPaths::new(&self.root_dir)
    }

    pub fn dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Backup guard bound to this run's dry-run flag and logger.
    pub fn guard(&self) -> BackupGuard<'_> {
        BackupGuard::new(self.options.dry_run, self.logger.as_ref())
    }

    /// Fail with [`InstallerError::MissingAsset`] unless `path` is a file.
    pub fn require_asset<'p>(&self, path: &'p Path) -> InstallerResult<&'p Path> {
        if path.is_file() {
            Ok(path)
        } else {
            self.logger
                .err(format_args!("Bundled asset missing at {}", path.display()));
            Err(InstallerError::MissingAsset {
                path: path.to_path_buf(),
            })
        }
    }

    /// Read a file that may legitimately be absent.
    pub fn read_optional(&self, path: &Path) -> InstallerResult<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InstallerError::io("Failed to read", path, e)),
        }
    }

    /// Read a file that must exist.
    pub fn read(&self, path: &Path) -> InstallerResult<String> {
        fs::read_to_string(path).map_err(|e| InstallerError::io("Failed to read", path, e))
    }

    /// Create a directory tree unless dry-running.
    pub fn ensure_dir(&self, dir: &Path) -> InstallerResult<()> {
        if dir.is_dir() {
            return Ok(());
        }
        if self.dry_run() {
            self.logger
                .plain(format_args!("[dry-run] mkdir -p {}", dir.display()));
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| InstallerError::io("Failed to create", dir, e))
    }

    /// Run an external command unless dry-running.
    pub fn run(&self, program: &str, args: &[&str]) -> InstallerResult<()> {
        if self.dry_run() {
            self.logger
                .plain(format_args!("[dry-run] {}", format_command(program, args)));
            return Ok(());
        }
        self.runner.run(program, args)
    }

    /// [`run`](Self::run) where failure is only worth a warning.
    pub fn run_tolerated(&self, program: &str, args: &[&str]) {
        if let Err(e) = self.run(program, args) {
            self.logger.warn(format_args!("{e} (continuing)"));
        }
    }
}
