//! Presenting a candidate batch and reading the user's decision.

use crate::error::PromptError;
use crate::ui::Prompter;

use super::generator::CandidateBatch;

pub const SELECT_PROMPT: &str = "Select a commit message";
pub const REDO_LABEL: &str = "Redo";
pub const EXIT_LABEL: &str = "Exit";

/// What the user decided for a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Use this message.
    Accept(String),
    /// Discard the batch and generate a new one.
    Redo,
    /// Stop without committing.
    Exit,
}

/// Show the batch plus `Redo` and `Exit`, with the first candidate highlighted.
///
/// Backing out of the picker counts as `Exit`. The batch must not be empty;
/// callers report a generation failure instead of showing an empty list.
pub fn present(
    batch: &CandidateBatch,
    prompter: &mut dyn Prompter,
    width: usize,
) -> Result<Choice, PromptError> {
    debug_assert!(!batch.is_empty(), "cannot present an empty batch");

    let mut items = candidate_labels(batch.candidates(), width);
    items.push(REDO_LABEL.to_string());
    items.push(EXIT_LABEL.to_string());

    let picked = prompter.select(SELECT_PROMPT, &items, 0)?;

    let count = batch.len();
    Ok(match picked {
        Some(index) if index < count => Choice::Accept(batch.candidates()[index].clone()),
        Some(index) if index == count => Choice::Redo,
        _ => Choice::Exit,
    })
}

/// Number each candidate and wrap it to `width` columns.
///
/// Continuation lines are indented to sit under the text, not the number.
pub fn candidate_labels(candidates: &[String], width: usize) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let prefix = format!("{}. ", index + 1);
            let indent = " ".repeat(prefix.len());
            let body_width = width.saturating_sub(prefix.len()).max(1);

            wrap(text, body_width)
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        format!("{prefix}{line}")
                    } else if line.is_empty() {
                        String::new()
                    } else {
                        format!("{indent}{line}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

/// Greedy word wrap. Existing line breaks are kept; words longer than `width`
/// get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
