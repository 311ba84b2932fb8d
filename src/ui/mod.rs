//! Terminal interaction: choice picker, confirmation prompt and spinner.

pub mod progress;

use dialoguer::{Confirm, Select};

use crate::error::PromptError;

pub use progress::Spinner;

/// Columns kept free on the right when wrapping labels.
pub const WRAP_MARGIN: usize = 4;
/// Wrapping never goes narrower than this.
pub const MIN_WRAP_WIDTH: usize = 20;
const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Interactive prompts used by the selection loop and the save step.
pub trait Prompter {
    /// Show `items` with `default` highlighted. `None` means the user backed out.
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, PromptError>;

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError>;
}

/// [`Prompter`] backed by dialoguer on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, PromptError> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

/// Width available for candidate labels: terminal width minus a margin.
pub fn wrap_width() -> usize {
    let columns = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH);
    columns.saturating_sub(WRAP_MARGIN).max(MIN_WRAP_WIDTH)
}
