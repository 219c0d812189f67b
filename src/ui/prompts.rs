use anyhow::Result;
use dialoguer::{Input, Password, Select};

/// Interactive input abstraction for the setup wizard. The monitor core never
/// touches this; all blocking prompts stay behind it.
pub trait Prompter {
    /// Prompt for a secret without echoing it
    fn secret(&self, prompt: &str) -> Result<String>;

    /// Prompt for a number with a default value
    fn number(&self, prompt: &str, default: u64) -> Result<u64>;

    /// Pick one item out of a list, returning its index
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Yes/no question
    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<bool>;
}

/// `dialoguer`-backed prompter used by the real CLI
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn secret(&self, prompt: &str) -> Result<String> {
        Ok(Password::new().with_prompt(prompt).interact()?)
    }

    fn number(&self, prompt: &str, default: u64) -> Result<u64> {
        Ok(Input::<u64>::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<bool> {
        let items = vec!["Yes", "No"];
        let default_index = if default_yes { 0 } else { 1 };

        let selection = Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(default_index)
            .interact()?;

        Ok(selection == 0)
    }
}
