//! Interactive prompts behind a trait, so the menu can run against a script
//! in tests and against a terminal otherwise.

use std::io;

use dialoguer::{Input, Select};

/// Free-text and list-selection prompts.
pub trait Prompt {
    /// Asks for text until `validate` accepts it.
    fn input(
        &mut self,
        prompt: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> io::Result<String>;

    /// Asks the user to pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[String]) -> io::Result<usize>;
}

/// Terminal prompts via `dialoguer`.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(
        &mut self,
        prompt: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> io::Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .validate_with(|s: &String| validate(s))
            .interact_text()?;
        Ok(value)
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> io::Result<usize> {
        let index = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }
}
