//! Prompt frontend abstraction.

use std::collections::VecDeque;

use crate::error::{InstallerError, InstallerResult};

/// Validator for free-text input. `Err` carries the message to show.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Interactive question frontend.
///
/// Every question returns `Ok(None)` when the user cancels (Esc / Ctrl-C).
/// `Err` is reserved for frontend failures such as a closed terminal.
pub trait Prompter {
    /// Pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[String], default: usize)
        -> InstallerResult<Option<usize>>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> InstallerResult<Option<bool>>;

    /// Free text, re-asked until `validate` accepts it.
    fn input(
        &mut self,
        prompt: &str,
        initial: Option<&str>,
        validate: Validator<'_>,
    ) -> InstallerResult<Option<String>>;

    /// Show a warning between questions.
    fn warn(&mut self, message: &str);
}

/// A pre-recorded answer for [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Select(usize),
    Confirm(bool),
    Input(String),
    Cancel,
}

/// Prompter that replays a fixed answer list.
///
/// Records every prompt and warning so tests can assert on the flow.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
    pub warnings: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Answers not consumed by the flow.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> InstallerResult<Answer> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| InstallerError::Prompt(format!("no scripted answer for '{prompt}'")))
    }

    fn mismatch(prompt: &str, answer: &Answer) -> InstallerError {
        InstallerError::Prompt(format!("unexpected answer {answer:?} for '{prompt}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        _default: usize,
    ) -> InstallerResult<Option<usize>> {
        match self.next(prompt)? {
            Answer::Select(i) if i < items.len() => Ok(Some(i)),
            Answer::Cancel => Ok(None),
            other => Err(Self::mismatch(prompt, &other)),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> InstallerResult<Option<bool>> {
        match self.next(prompt)? {
            Answer::Confirm(b) => Ok(Some(b)),
            Answer::Cancel => Ok(None),
            other => Err(Self::mismatch(prompt, &other)),
        }
    }

    fn input(
        &mut self,
        prompt: &str,
        _initial: Option<&str>,
        validate: Validator<'_>,
    ) -> InstallerResult<Option<String>> {
        loop {
            match self.next(prompt)? {
                Answer::Input(text) => match validate(&text) {
                    Ok(()) => return Ok(Some(text)),
                    Err(msg) => self.warnings.push(msg),
                },
                Answer::Cancel => return Ok(None),
                other => return Err(Self::mismatch(prompt, &other)),
            }
        }
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
