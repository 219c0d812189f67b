pub mod prompts;

pub use prompts::{ConsolePrompter, Prompter};
