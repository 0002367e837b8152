//! Decision-point state machine.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::facts::{Resolution, WizardFacts, WizardSeed};
use super::preview::SoundPreviewer;
use super::prompter::Prompter;
use crate::error::InstallerResult;
use crate::options::{
    has_sound_extension, Decision, GlobalAgentsAction, InstallerOptions, NotificationSound,
    Profile, Reasoning, DEFAULT_SOUND,
};

/// Result of running the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Resolved(InstallerOptions),
    Cancelled,
}

/// Decision points, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Overwrite,
    Profile,
    Reasoning,
    Sound(SoundStep),
    GlobalAgents,
    Done,
}

/// Nested sound selection loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SoundStep {
    Choose,
    CustomPath { last: Option<String> },
    Review,
}

/// Answers collected so far. Every field starts from the seed.
struct Draft {
    overwrite_config: Option<Decision>,
    profile: Option<Profile>,
    reasoning: Option<Reasoning>,
    sound: Option<NotificationSound>,
    global_agents: Option<GlobalAgentsAction>,
    /// Sound under consideration inside the selection loop.
    candidate: NotificationSound,
}

/// Resolve the options for one run.
///
/// Interactive resolution asks only the questions the seed leaves open;
/// the other two resolutions never touch `prompter`.
pub fn resolve(
    seed: &WizardSeed,
    facts: &WizardFacts,
    resolution: Resolution,
    prompter: &mut dyn Prompter,
    previewer: &dyn SoundPreviewer,
) -> InstallerResult<WizardOutcome> {
    debug!(?resolution, "Resolving installer options");
    match resolution {
        Resolution::Interactive => run_interactive(seed, facts, prompter, previewer),
        Resolution::Unattended | Resolution::Recommended => Ok(WizardOutcome::Resolved(
            unattended_options(seed, facts, resolution),
        )),
    }
}

/// Check a custom sound path typed by the user.
///
/// Existence is checked separately so the user can be told to retry.
pub fn validate_custom_sound_path(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path required".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err("Use an absolute path".to_string());
    }
    if !has_sound_extension(path) {
        return Err("Supported: .wav, .mp3, .ogg".to_string());
    }
    Ok(())
}

// ============================================================================
// Non-interactive defaults
// ============================================================================

fn unattended_options(
    seed: &WizardSeed,
    facts: &WizardFacts,
    resolution: Resolution,
) -> InstallerOptions {
    let recommended = resolution == Resolution::Recommended;

    let profile = seed.profile.unwrap_or(if recommended {
        Profile::Balanced
    } else {
        Profile::Safe
    });
    let sound = seed.sound.clone().unwrap_or_else(|| {
        if facts.notify_exists {
            NotificationSound::Unchanged
        } else {
            NotificationSound::Bundled(DEFAULT_SOUND.to_string())
        }
    });
    let global_agents = seed.global_agents.unwrap_or(if recommended && !facts.global_agents_exists {
        GlobalAgentsAction::CreateDefault
    } else {
        GlobalAgentsAction::Skip
    });

    build(
        seed,
        facts,
        Draft {
            overwrite_config: seed.overwrite_config.or(Some(Decision::No)),
            profile: Some(profile),
            reasoning: seed.reasoning.or(Some(Reasoning::On)),
            sound: Some(sound),
            global_agents: Some(global_agents),
            candidate: NotificationSound::Disabled,
        },
    )
}

// ============================================================================
// Interactive flow
// ============================================================================

fn run_interactive(
    seed: &WizardSeed,
    facts: &WizardFacts,
    prompter: &mut dyn Prompter,
    previewer: &dyn SoundPreviewer,
) -> InstallerResult<WizardOutcome> {
    let mut draft = Draft {
        overwrite_config: seed.overwrite_config,
        profile: seed.profile,
        reasoning: seed.reasoning,
        sound: seed.sound.clone(),
        global_agents: seed.global_agents,
        candidate: initial_sound(&facts.sounds),
    };

    let mut step = Step::Overwrite;
    while step != Step::Done {
        let next = match step {
            Step::Overwrite => ask_overwrite(&mut draft, facts, prompter)?,
            Step::Profile => ask_profile(&mut draft, prompter)?,
            Step::Reasoning => ask_reasoning(&mut draft, prompter)?,
            Step::Sound(sub) => {
                ask_sound(sub, &mut draft, facts, prompter, previewer)?
            }
            Step::GlobalAgents => ask_global_agents(&mut draft, facts, prompter)?,
            Step::Done => Some(Step::Done),
        };
        match next {
            Some(next) => step = next,
            None => {
                debug!("Wizard cancelled");
                return Ok(WizardOutcome::Cancelled);
            }
        }
    }

    Ok(WizardOutcome::Resolved(build(seed, facts, draft)))
}

fn initial_sound(sounds: &[String]) -> NotificationSound {
    if sounds.iter().any(|s| s == DEFAULT_SOUND) {
        NotificationSound::Bundled(DEFAULT_SOUND.to_string())
    } else if let Some(first) = sounds.first() {
        NotificationSound::Bundled(first.clone())
    } else {
        NotificationSound::Disabled
    }
}

// Each ask_* returns the next step, or None when the user cancelled.

fn ask_overwrite(
    draft: &mut Draft,
    facts: &WizardFacts,
    prompter: &mut dyn Prompter,
) -> InstallerResult<Option<Step>> {
    if draft.overwrite_config.is_none() && facts.config_exists {
        let items = vec![
            "Keep existing config".to_string(),
            "Overwrite with the bundled profiles (backup will be created)".to_string(),
        ];
        let Some(choice) = prompter.select("~/.codex/config.toml already exists", &items, 0)?
        else {
            return Ok(None);
        };
        draft.overwrite_config = Some(if choice == 1 { Decision::Yes } else { Decision::No });
    }
    Ok(Some(Step::Profile))
}

fn ask_profile(draft: &mut Draft, prompter: &mut dyn Prompter) -> InstallerResult<Option<Step>> {
    if draft.profile.is_none() {
        let items: Vec<String> = Profile::ALL
            .iter()
            .map(|p| format!("{} - {}", p.as_str(), p.description()))
            .collect();
        let Some(choice) = prompter.select("Active Codex profile", &items, 0)? else {
            return Ok(None);
        };
        draft.profile = Profile::ALL.get(choice).copied();
    }
    Ok(Some(Step::Reasoning))
}

fn ask_reasoning(draft: &mut Draft, prompter: &mut dyn Prompter) -> InstallerResult<Option<Step>> {
    if draft.reasoning.is_none() {
        let Some(on) =
            prompter.confirm("Enable reasoning steps (show raw agent reasoning)?", true)?
        else {
            return Ok(None);
        };
        draft.reasoning = Some(if on { Reasoning::On } else { Reasoning::Off });
    }
    Ok(Some(Step::Sound(SoundStep::Choose)))
}

fn sound_menu(sounds: &[String]) -> Vec<String> {
    let mut items = vec![
        "Skip (leave current setup)".to_string(),
        "None (disable sounds)".to_string(),
    ];
    items.extend(sounds.iter().cloned());
    items.push("Custom path...".to_string());
    items
}

fn ask_sound(
    sub: SoundStep,
    draft: &mut Draft,
    facts: &WizardFacts,
    prompter: &mut dyn Prompter,
    previewer: &dyn SoundPreviewer,
) -> InstallerResult<Option<Step>> {
    if draft.sound.is_some() {
        return Ok(Some(Step::GlobalAgents));
    }

    match sub {
        SoundStep::Choose => {
            let items = sound_menu(&facts.sounds);
            let default = match &draft.candidate {
                NotificationSound::Disabled => 1,
                NotificationSound::Bundled(name) => facts
                    .sounds
                    .iter()
                    .position(|s| s == name)
                    .map_or(1, |i| i + 2),
                _ => 0,
            };
            let Some(choice) = prompter.select("Notification sound", &items, default)? else {
                return Ok(None);
            };
            let custom_index = items.len() - 1;
            Ok(Some(match choice {
                0 => {
                    draft.sound = Some(NotificationSound::Unchanged);
                    Step::GlobalAgents
                }
                1 => {
                    draft.candidate = NotificationSound::Disabled;
                    Step::Sound(SoundStep::Review)
                }
                i if i == custom_index => Step::Sound(SoundStep::CustomPath { last: None }),
                i => {
                    draft.candidate = NotificationSound::Bundled(facts.sounds[i - 2].clone());
                    Step::Sound(SoundStep::Review)
                }
            }))
        }

        SoundStep::CustomPath { last } => {
            let Some(input) = prompter.input(
                "Enter absolute path to a .wav, .mp3 or .ogg file",
                last.as_deref(),
                &validate_custom_sound_path,
            )?
            else {
                return Ok(None);
            };
            let path = PathBuf::from(input.trim());
            if !path.is_file() {
                prompter.warn("File not found. Try again.");
                return Ok(Some(Step::Sound(SoundStep::CustomPath { last: Some(input) })));
            }
            draft.candidate = NotificationSound::Custom(path);
            Ok(Some(Step::Sound(SoundStep::Review)))
        }

        SoundStep::Review => {
            let items = vec![
                "Preview".to_string(),
                "Use this".to_string(),
                "Choose another...".to_string(),
            ];
            let prompt = format!("Selected: {}. What next?", draft.candidate.label());
            let Some(choice) = prompter.select(&prompt, &items, 1)? else {
                return Ok(None);
            };
            Ok(Some(match choice {
                0 => {
                    if let Some(path) = preview_path(&draft.candidate, facts) {
                        if let Err(e) = previewer.preview(&path) {
                            prompter.warn(&e.to_string());
                        }
                    }
                    Step::Sound(SoundStep::Review)
                }
                1 => {
                    draft.sound = Some(draft.candidate.clone());
                    Step::GlobalAgents
                }
                _ => Step::Sound(SoundStep::Choose),
            }))
        }
    }
}

fn preview_path(sound: &NotificationSound, facts: &WizardFacts) -> Option<PathBuf> {
    match sound {
        NotificationSound::Bundled(name) => Some(facts.sounds_dir.join(name)),
        NotificationSound::Custom(path) => Some(path.clone()),
        NotificationSound::Unchanged | NotificationSound::Disabled => None,
    }
}

fn ask_global_agents(
    draft: &mut Draft,
    facts: &WizardFacts,
    prompter: &mut dyn Prompter,
) -> InstallerResult<Option<Step>> {
    if draft.global_agents.is_none() && facts.global_agents_exists {
        let items = vec![
            "Add to your existing AGENTS.md (backup will be created)".to_string(),
            "Overwrite existing (backup will be created)".to_string(),
            "Skip, leave as-is".to_string(),
        ];
        let Some(choice) = prompter.select("Global ~/.codex/AGENTS.md", &items, 0)? else {
            return Ok(None);
        };
        draft.global_agents = Some(match choice {
            0 => GlobalAgentsAction::AppendDefault,
            1 => GlobalAgentsAction::OverwriteDefault,
            _ => GlobalAgentsAction::Skip,
        });
    }
    Ok(Some(Step::Done))
}

// ============================================================================
// Final assembly
// ============================================================================

/// Collapse a draft into options, closing every remaining gap.
fn build(seed: &WizardSeed, facts: &WizardFacts, draft: Draft) -> InstallerOptions {
    // Overwriting only means something when there is a config to overwrite.
    let overwrite_config = if facts.config_exists {
        draft.overwrite_config.unwrap_or(Decision::No)
    } else {
        Decision::Unset
    };

    InstallerOptions {
        profile: draft.profile.unwrap_or_default(),
        overwrite_config,
        reasoning: draft.reasoning.unwrap_or_default(),
        notification_sound: draft.sound.unwrap_or(NotificationSound::Unchanged),
        global_agents: draft.global_agents.unwrap_or(GlobalAgentsAction::Skip),
        mode: seed.mode,
        tools: seed.tools,
        vscode_id: seed.vscode_id.clone(),
        no_vscode: seed.no_vscode,
        agents_md: seed.agents_md.clone(),
        dry_run: seed.dry_run,
        assume_yes: seed.assume_yes,
        skip_confirmation: seed.skip_confirmation,
    }
}
