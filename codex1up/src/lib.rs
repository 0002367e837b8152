//! codex1up - installer and configurator for the Codex CLI
//!
//! Provisions `~/.codex/config.toml` from bundled profiles, installs the
//! notification hook and its sound, manages AGENTS.md documents and cleans
//! up shell rc blocks left by older releases.
//!
//! # High-Level API
//!
//! The [`install`] module drives a complete run:
//!
//! ```ignore
//! use codex1up::context::Environment;
//! use codex1up::install::run_install;
//! use codex1up::wizard::{Resolution, SilentPreview, ScriptedPrompter, WizardSeed};
//!
//! let env = Environment::new(home, root);
//! let seed = WizardSeed { assume_yes: true, ..WizardSeed::default() };
//! let outcome = run_install(env, &seed, Resolution::Unattended,
//!     &mut ScriptedPrompter::new([]), &SilentPreview)?;
//! ```
//!
//! All file mutations go through [`patch::BackupGuard`], which honors
//! dry-run and backs up every file it replaces.

pub mod context;
pub mod doctor;
pub mod error;
pub mod install;
pub mod installers;
pub mod log;
pub mod logging;
pub mod options;
pub mod patch;
pub mod process;
pub mod profiles;
pub mod summary;
pub mod uninstall;
pub mod wizard;

/// Version of the codex1up library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
