//! Candidate generation: repeated completion calls with fail-fast parsing.

use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::LlmError;
use crate::git::Diff;
use crate::llm::{CompletionClient, parse_message};

use super::prompt::build_request;

/// Why a batch stopped before reaching the configured attempt count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Truncation {
    /// The response for `attempt` did not match `{"message": ...}`.
    Malformed {
        attempt: usize,
        raw: String,
        reason: String,
    },
    /// The request for `attempt` failed after earlier candidates succeeded.
    RequestFailed { attempt: usize, error: String },
}

/// Candidates from one generation round, in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateBatch {
    candidates: Vec<String>,
    truncation: Option<Truncation>,
}

impl CandidateBatch {
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    /// Set when the batch ended early.
    pub fn truncation(&self) -> Option<&Truncation> {
        self.truncation.as_ref()
    }

    pub fn into_candidates(self) -> Vec<String> {
        self.candidates
    }
}

/// Generate up to `config.attempts` candidates for `diff`, one call at a time.
///
/// The first malformed response ends the batch; candidates collected before it
/// are kept and the raw response is recorded in [`CandidateBatch::truncation`].
/// A request error ends the batch the same way once at least one candidate
/// exists; before that it is returned as an error.
pub async fn generate(
    client: &dyn CompletionClient,
    diff: &Diff,
    config: &GenerationConfig,
) -> Result<CandidateBatch, LlmError> {
    let request = build_request(diff, config);
    let mut batch = CandidateBatch::default();

    for attempt in 1..=config.attempts {
        debug!("Requesting candidate {}/{}", attempt, config.attempts);

        let raw = match client.complete(&request).await {
            Ok(raw) => raw,
            Err(e) if batch.is_empty() => return Err(e),
            Err(e) => {
                debug!("Candidate request {} failed: {}", attempt, e);
                batch.truncation = Some(Truncation::RequestFailed {
                    attempt,
                    error: e.to_string(),
                });
                break;
            }
        };

        match parse_message(&raw) {
            Ok(message) => batch.candidates.push(message),
            Err(failure) => {
                debug!("Response {} rejected: {}", attempt, failure);
                batch.truncation = Some(Truncation::Malformed {
                    attempt,
                    raw,
                    reason: failure.to_string(),
                });
                break;
            }
        }
    }

    Ok(batch)
}
