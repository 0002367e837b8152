//! CLI runner for common setup and operations.
//!
//! Resolves the home directory and install root, initializes the session
//! log and builds the [`Environment`] every command runs against.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use codex1up::context::{find_install_root, Environment, InstallerContext};
use codex1up::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};
use codex1up::options::InstallerOptions;

use crate::console_logger::ConsoleLogger;
use crate::error::CliError;

/// Overrides the home directory.
pub const HOME_ENV: &str = "CODEX_1UP_HOME";
/// Overrides the directory holding `templates/` and `sounds/`.
pub const ROOT_ENV: &str = "CODEX_1UP_ROOT";

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    env: Environment,
}

impl CliRunner {
    /// Create a runner, initializing logging.
    ///
    /// Dry runs log to the system temp directory so `~/.codex` stays
    /// untouched.
    ///
    /// # Arguments
    ///
    /// * `debug` - When true, enables debug-level logging regardless of RUST_LOG
    /// * `dry_run` - Whether the command will run without side effects
    pub fn new(debug: bool, dry_run: bool) -> Result<Self, CliError> {
        let home = resolve_home()?;
        let root = resolve_root();

        let log_dir = if dry_run {
            std::env::temp_dir().join("codex-1up")
        } else {
            default_log_dir(&home)
        };
        let logging_guard = init_logging(&log_dir, default_log_file(), debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let env = Environment::new(home, root)
            .with_log_file(logging_guard.path())
            .with_logger(Arc::new(ConsoleLogger::new()));

        Ok(Self { logging_guard, env })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("codex-1up v{}", codex1up::VERSION);
        info!(
            home = %self.env.home_dir.display(),
            root = %self.env.root_dir.display(),
            "codex-1up CLI: {} command",
            command
        );
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Context for commands that act outside the install wizard.
    pub fn context(&self, options: InstallerOptions) -> InstallerContext {
        self.env.clone().into_context(options)
    }
}

/// Whether both stdin and stdout are attached to a terminal.
pub fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

fn resolve_home() -> Result<PathBuf, CliError> {
    match std::env::var_os(HOME_ENV) {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
        _ => dirs::home_dir().ok_or(CliError::NoHome),
    }
}

/// `CODEX_1UP_ROOT`, else the nearest ancestor of the executable holding
/// the templates, else the workspace this binary was built from.
fn resolve_root() -> PathBuf {
    if let Some(root) = std::env::var_os(ROOT_ENV).filter(|r| !r.is_empty()) {
        return PathBuf::from(root);
    }
    let build_root = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/.."));
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(find_install_root))
        .or_else(|| find_install_root(build_root))
        .unwrap_or_else(|| build_root.to_path_buf())
}
