//! AI-generated commit messages: generation, selection, transcripts and the driver loop.

pub mod generator;
pub mod prompt;
pub mod selection;
pub mod transcript;
pub mod workflow;

pub use generator::{CandidateBatch, Truncation, generate};
pub use prompt::{SYSTEM_PROMPT, build_request};
pub use selection::{Choice, candidate_labels, present, wrap};
pub use transcript::{Transcript, TranscriptStore, read_transcripts};
pub use workflow::{Workflow, WorkflowOptions, WorkflowOutcome};
