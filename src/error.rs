//! Error types for autocommit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found on PATH. Install git and try again.")]
    GitNotInstalled,

    #[error("Not a git repository (or any parent directory): {0}")]
    RepositoryNotFound(#[source] git2::Error),

    #[error("Bare repositories are not supported")]
    BareRepository,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error(
        "Could not get the staged diff. Make sure you're in a git repository and have staged changes.\n{stderr}"
    )]
    DiffUnavailable { stderr: String },

    #[error("git commit failed: {stderr}")]
    CommitFailed { stderr: String },
}

/// Errors from the completion service.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to completion service failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion service returned no choices")]
    EmptyChoices,

    #[error("Completion service returned an unreadable envelope: {0}")]
    InvalidEnvelope(String),

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<LlmError>),
}

impl LlmError {
    /// Whether a retry has a reasonable chance of succeeding.
    ///
    /// Connection problems, timeouts, rate limiting and server-side errors are
    /// transient; everything else is not.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            LlmError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Errors from resolving the generation configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting '{name}'. Set it with {hint}")]
    MissingField { name: &'static str, hint: &'static str },

    #[error("Setting '{name}' is out of range: {value} (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Errors from writing a transcript record.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Failed to create transcript directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write transcript {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize transcript: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed transcript record in {path} at line {line}: {source}")]
    Deserialize {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that end a workflow invocation.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Failed to generate a commit message: the model's first response was malformed")]
    EmptyBatch,

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// An interactive prompt could not be shown or read.
#[derive(Error, Debug)]
#[error("Interactive prompt failed: {0}")]
pub struct PromptError(#[from] pub dialoguer::Error);
