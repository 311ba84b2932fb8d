//! autocommit - generate commit messages from the staged diff with a language model.
//!
//! # Overview
//!
//! autocommit reads `git diff --staged`, drops notebook and image noise, asks a
//! chat-completions model for several candidate messages, lets the user pick
//! one (or regenerate), optionally saves the choice, and runs `git commit`.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod ui;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use commit::{CandidateBatch, Choice, Transcript, TranscriptStore, Workflow, WorkflowOutcome};
pub use config::GenerationConfig;
pub use error::{ConfigError, GitError, LlmError, PromptError, TranscriptError, WorkflowError};
pub use git::{Diff, GitCli, StagedDiff, Vcs};
pub use llm::{ChatClient, CompletionClient, CompletionRequest};
