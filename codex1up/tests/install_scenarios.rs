//! End-to-end install scenarios.
//!
//! These tests run the whole install flow against a temporary home and the
//! bundled templates:
//! - Fresh unattended install
//! - Interactive reinstall over an existing config with legacy rc blocks
//! - Cancellation inside the sound menu
//! - Dry run and re-run behavior

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use codex1up::context::Environment;
use codex1up::install::{run_install, InstallOutcome};
use codex1up::log::{LogLevel, MemoryLogger};
use codex1up::options::{Decision, NotificationSound, Profile, ToolsAction};
use codex1up::process::ScriptedRunner;
use codex1up::wizard::{Answer, Resolution, ScriptedPrompter, SilentPreview, WizardSeed};
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

fn install_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..")
}

struct Home {
    dir: TempDir,
    logger: Arc<MemoryLogger>,
    runner: Arc<ScriptedRunner>,
}

impl Home {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            logger: Arc::new(MemoryLogger::new()),
            runner: Arc::new(ScriptedRunner::new()),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn env(&self) -> Environment {
        Environment::new(self.dir.path(), install_root())
            .with_cwd(self.dir.path())
            .with_logger(self.logger.clone())
            .with_runner(self.runner.clone())
    }

    fn backups(&self, dir: &str) -> Vec<PathBuf> {
        match fs::read_dir(self.path(dir)) {
            Ok(entries) => entries
                .map(|e| e.unwrap().path())
                .filter(|p| p.to_string_lossy().contains(".backup."))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn seed() -> WizardSeed {
    WizardSeed {
        tools: ToolsAction::Skip,
        no_vscode: true,
        ..WizardSeed::default()
    }
}

const LEGACY_BASHRC: &str = "export PATH=\"$HOME/bin:$PATH\"\n\
# >>> codex-1up >>>\n\
export DEFAULT_CODEX_SOUND=\"$HOME/.codex/sounds/noti_2.wav\"\n\
# <<< codex-1up <<<\n\
alias ll='ls -l'\n";

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_fresh_unattended_install() {
    let home = Home::new();
    let seed = WizardSeed {
        assume_yes: true,
        ..seed()
    };

    let outcome = run_install(
        home.env(),
        &seed,
        Resolution::Unattended,
        &mut ScriptedPrompter::new([]),
        &SilentPreview,
    )
    .unwrap();

    let InstallOutcome::Completed { options, report } = outcome else {
        panic!("expected a completed install");
    };
    assert_eq!(options.profile, Profile::Safe);
    assert_eq!(options.overwrite_config, Decision::Unset);
    assert_eq!(options.notify(), Decision::Yes);
    assert!(report.degraded.is_empty());

    let config = fs::read_to_string(home.path(".codex/config.toml")).unwrap();
    assert!(config.contains("profile = \"safe\""));
    assert!(config.contains("[profiles.yolo]"));
    assert!(home.backups(".codex").is_empty());

    let script = fs::read_to_string(home.path(".codex/notify.sh")).unwrap();
    let sound = home.path(".codex/sounds/noti_1.wav");
    assert!(sound.is_file());
    assert!(script.contains(&format!("DEFAULT_CODEX_SOUND=\"{}\"", sound.display())));
}

#[test]
fn test_interactive_reinstall_over_legacy_setup() {
    let home = Home::new();
    fs::create_dir_all(home.path(".codex")).unwrap();
    fs::write(home.path(".codex/config.toml"), "profile = \"old\"\n").unwrap();
    fs::write(home.path(".bashrc"), LEGACY_BASHRC).unwrap();

    let mut prompter = ScriptedPrompter::new([
        Answer::Select(1),      // overwrite
        Answer::Select(3),      // yolo
        Answer::Confirm(true),  // reasoning
        Answer::Select(2),      // noti_1.wav
        Answer::Select(1),      // use this
    ]);

    let outcome = run_install(
        home.env(),
        &seed(),
        Resolution::Interactive,
        &mut prompter,
        &SilentPreview,
    )
    .unwrap();
    assert!(matches!(outcome, InstallOutcome::Completed { .. }));
    assert_eq!(prompter.remaining(), 0);

    let config = fs::read_to_string(home.path(".codex/config.toml")).unwrap();
    assert!(config.contains("profile = \"yolo\""));

    let backups = home.backups(".codex");
    assert_eq!(backups.len(), 1);
    assert!(backups[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("config.toml.backup."));
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "profile = \"old\"\n");

    let bashrc = fs::read_to_string(home.path(".bashrc")).unwrap();
    assert_eq!(
        bashrc,
        "export PATH=\"$HOME/bin:$PATH\"\nalias ll='ls -l'\n"
    );
    assert!(!bashrc.contains("codex-1up"));

    let script = fs::read_to_string(home.path(".codex/notify.sh")).unwrap();
    let sound = home.path(".codex/sounds/noti_1.wav");
    assert!(script.contains(&format!("DEFAULT_CODEX_SOUND=\"{}\"", sound.display())));
}

#[test]
fn test_cancel_in_sound_menu_changes_nothing() {
    let home = Home::new();
    let mut prompter = ScriptedPrompter::new([
        Answer::Select(0),     // balanced
        Answer::Confirm(true), // reasoning
        Answer::Cancel,        // sound menu
    ]);

    let outcome = run_install(
        home.env(),
        &seed(),
        Resolution::Interactive,
        &mut prompter,
        &SilentPreview,
    )
    .unwrap();

    assert_eq!(outcome, InstallOutcome::Cancelled);
    assert!(!home.path(".codex").exists());
    assert!(home.logger.entries().is_empty());
    assert!(home.runner.calls().is_empty());
}

#[test]
fn test_dry_run_leaves_home_untouched() {
    let home = Home::new();
    fs::write(home.path(".zshrc"), LEGACY_BASHRC).unwrap();
    let seed = WizardSeed {
        dry_run: true,
        tools: ToolsAction::Install,
        ..seed()
    };
    let home_runner = Arc::new(ScriptedRunner::new().with_programs(&["brew"]));
    let env = home.env().with_runner(home_runner.clone());

    let outcome = run_install(
        env,
        &seed,
        Resolution::for_run(&seed, true),
        &mut ScriptedPrompter::new([]),
        &SilentPreview,
    )
    .unwrap();
    assert!(matches!(outcome, InstallOutcome::Completed { .. }));

    assert!(!home.path(".codex").exists());
    assert_eq!(fs::read_to_string(home.path(".zshrc")).unwrap(), LEGACY_BASHRC);
    assert!(home_runner.calls().is_empty());

    let plain = home.logger.at(LogLevel::Plain);
    assert!(plain.iter().all(|line| line.starts_with("[dry-run] ")));
    assert!(plain.iter().any(|line| line.starts_with("[dry-run] brew install")));
    assert!(plain.iter().any(|line| line.contains("config.toml")));
}

#[test]
fn test_second_run_creates_no_new_backups() {
    let home = Home::new();
    let seed = WizardSeed {
        profile: Some(Profile::Minimal),
        overwrite_config: Some(Decision::Yes),
        sound: Some(NotificationSound::Bundled("noti_2.wav".to_string())),
        assume_yes: true,
        ..seed()
    };

    for _ in 0..2 {
        let outcome = run_install(
            home.env(),
            &seed,
            Resolution::Unattended,
            &mut ScriptedPrompter::new([]),
            &SilentPreview,
        )
        .unwrap();
        assert!(matches!(outcome, InstallOutcome::Completed { .. }));
    }

    assert!(home.backups(".codex").is_empty());
    assert!(home.backups(".codex/sounds").is_empty());
    let config = fs::read_to_string(home.path(".codex/config.toml")).unwrap();
    assert!(config.contains("profile = \"minimal\""));
}
