//! Wizard option resolver.
//!
//! Collects the install choices and collapses them into a fully resolved
//! [`InstallerOptions`](crate::options::InstallerOptions). The same
//! resolver serves three callers:
//!
//! - **Interactive**: walks the decision points through a [`Prompter`],
//!   skipping any point already answered by a flag.
//! - **Unattended**: no terminal, `--yes`, `--skip-confirmation` or
//!   `--dry-run`; every open point takes its unattended default.
//! - **Recommended**: `--mode recommended`; like unattended but with the
//!   recommended profile and a global AGENTS.md created when absent.
//!
//! Cancellation is a value ([`WizardOutcome::Cancelled`]), not an error, and
//! is only produced before any side effect has happened.

mod facts;
mod preview;
mod prompter;
mod resolver;

pub use facts::{Resolution, WizardFacts, WizardSeed};
pub use preview::{PlayerPreview, SilentPreview, SoundPreviewer, PLAYERS};
pub use prompter::{Answer, Prompter, ScriptedPrompter, Validator};
pub use resolver::{resolve, validate_custom_sound_path, WizardOutcome};
