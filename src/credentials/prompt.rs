use dialoguer::{Input, Password};

use crate::Res;

/// Source of interactive answers for missing credential fields.
pub trait Prompter {
    /// Asks for a visible answer. Empty answers are returned as-is.
    fn input(&mut self, prompt: &str) -> Res<String>;

    /// Asks for an answer without echoing it.
    fn password(&mut self, prompt: &str) -> Res<String>;

    /// Reports a rejected answer before the question is asked again.
    fn complain(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Res<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn password(&mut self, prompt: &str) -> Res<String> {
        let answer = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(answer)
    }
}
