//! `dialoguer` frontend for the install wizard.

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use codex1up::error::{InstallerError, InstallerResult};
use codex1up::wizard::{Prompter, Validator};

/// Prompts on the controlling terminal. Esc and Ctrl-C cancel.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(e: dialoguer::Error) -> InstallerError {
    InstallerError::Prompt(e.to_string())
}

/// Map a prompt result so that an interrupted read (Ctrl-C) counts as a cancel.
fn cancellable<T>(result: dialoguer::Result<Option<T>>) -> InstallerResult<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(prompt_error(e)),
    }
}

impl Prompter for DialoguerPrompter {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> InstallerResult<Option<usize>> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt();
        cancellable(choice)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> InstallerResult<Option<bool>> {
        cancellable(
            Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact_opt(),
        )
    }

    fn input(
        &mut self,
        prompt: &str,
        initial: Option<&str>,
        validate: Validator<'_>,
    ) -> InstallerResult<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|value: &String| validate(value.as_str()));
        if let Some(initial) = initial {
            input = input.with_initial_text(initial);
        }
        // Input has no Esc-cancellable variant.
        cancellable(input.interact_text().map(Some))
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
    }
}
