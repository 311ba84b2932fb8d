//! The generate, select, save and commit loop.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::GenerationConfig;
use crate::error::WorkflowError;
use crate::git::{Diff, StagedDiff, Vcs, commit, get_staged_diff};
use crate::llm::CompletionClient;
use crate::ui::{Prompter, Spinner};

use super::generator::{CandidateBatch, Truncation, generate};
use super::selection::{Choice, present};
use super::transcript::{Transcript, TranscriptStore};

pub const SAVE_PROMPT: &str = "Save this commit message for future use?";

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Committed {
        message: String,
        transcript: Option<PathBuf>,
    },
    /// A message was accepted but `dry_run` skipped saving and committing.
    Accepted { message: String },
    NoChanges,
    /// Staged changes exist but all of them were filtered as noise.
    OnlyNoise { raw_lines: usize },
    Exited,
}

/// Knobs for a single run.
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    /// Where accepted selections may be saved. `None` skips the save prompt.
    pub transcripts: Option<TranscriptStore>,
    pub dry_run: bool,
    /// Column width for candidate labels.
    pub wrap_width: usize,
    pub show_progress: bool,
}

/// Borrowed collaborators for one invocation.
pub struct Workflow<'a> {
    vcs: &'a dyn Vcs,
    client: &'a dyn CompletionClient,
    prompter: &'a mut dyn Prompter,
    options: WorkflowOptions,
}

impl<'a> Workflow<'a> {
    pub fn new(
        vcs: &'a dyn Vcs,
        client: &'a dyn CompletionClient,
        prompter: &'a mut dyn Prompter,
        options: WorkflowOptions,
    ) -> Self {
        Self {
            vcs,
            client,
            prompter,
            options,
        }
    }

    /// Run once: read the staged diff, loop on generate/select until the user
    /// accepts or exits, then optionally save and commit.
    pub async fn run(&mut self, config: &GenerationConfig) -> Result<WorkflowOutcome, WorkflowError> {
        let diff = match get_staged_diff(self.vcs)? {
            StagedDiff::Changes(diff) => diff,
            StagedDiff::NoChanges => return Ok(WorkflowOutcome::NoChanges),
            StagedDiff::OnlyNoise { raw_lines } => {
                return Ok(WorkflowOutcome::OnlyNoise { raw_lines });
            }
        };

        let (message, batch) = loop {
            let batch = self.generate_batch(&diff, config).await?;
            if batch.is_empty() {
                return Err(WorkflowError::EmptyBatch);
            }

            match present(&batch, self.prompter, self.options.wrap_width)? {
                Choice::Accept(message) => break (message, batch),
                Choice::Redo => info!("Discarding {} candidates and regenerating", batch.len()),
                Choice::Exit => return Ok(WorkflowOutcome::Exited),
            }
        };

        if self.options.dry_run {
            return Ok(WorkflowOutcome::Accepted { message });
        }

        let transcript = self.maybe_save(&diff, &batch, &message);

        commit(self.vcs, &message)?;

        Ok(WorkflowOutcome::Committed {
            message,
            transcript,
        })
    }

    async fn generate_batch(
        &self,
        diff: &Diff,
        config: &GenerationConfig,
    ) -> Result<CandidateBatch, WorkflowError> {
        let batch = {
            let _spinner = if self.options.show_progress {
                Spinner::start("Generating commit messages...")
            } else {
                Spinner::hidden()
            };
            generate(self.client, diff, config).await?
        };

        if let Some(truncation) = batch.truncation() {
            report_truncation(truncation);
        }
        Ok(batch)
    }

    /// Ask whether to save, and save if confirmed. Failures are reported and
    /// swallowed so they never block the commit.
    fn maybe_save(&mut self, diff: &Diff, batch: &CandidateBatch, message: &str) -> Option<PathBuf> {
        let store = self.options.transcripts.as_ref()?;

        let confirmed = match self.prompter.confirm(SAVE_PROMPT, true) {
            Ok(confirmed) => confirmed,
            Err(e) => {
                warn!("Save prompt failed, not saving: {}", e);
                return None;
            }
        };
        if !confirmed {
            return None;
        }

        let transcript = Transcript::new(diff, batch.candidates(), message);
        match store.save(&transcript) {
            Ok(path) => {
                println!("Saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                debug!("Transcript save failed: {:?}", e);
                eprintln!("Warning: could not save commit message: {}", e);
                None
            }
        }
    }
}

fn report_truncation(truncation: &Truncation) {
    match truncation {
        Truncation::Malformed {
            attempt,
            raw,
            reason,
        } => {
            eprintln!("Warning: response {} was not usable ({}):", attempt, reason);
            eprintln!("{}", raw);
        }
        Truncation::RequestFailed { attempt, error } => {
            eprintln!("Warning: request {} failed: {}", attempt, error);
        }
    }
}
