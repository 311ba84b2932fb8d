//! Saved records of accepted commit messages.
//!
//! Each record holds the diff, every candidate that was offered, and the one
//! the user picked. Records are JSON Lines files named after a digest of their
//! content, so saving the same selection twice appends to the same file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::TranscriptError;
use crate::git::Diff;

/// Hex characters of the content digest used in file names.
const ID_LEN: usize = 16;

/// One accepted selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Unix time in seconds.
    pub time: f64,
    pub diff: String,
    pub responses: Vec<String>,
    pub selected: String,
}

impl Transcript {
    /// Record `selected` out of `responses` for `diff`, stamped with the current time.
    pub fn new(diff: &Diff, responses: &[String], selected: &str) -> Self {
        let now = Utc::now();
        Self {
            time: now.timestamp_micros() as f64 / 1_000_000.0,
            diff: diff.as_str().to_string(),
            responses: responses.to_vec(),
            selected: selected.to_string(),
        }
    }

    /// Digest of the diff, responses and selection. The timestamp is excluded.
    pub fn content_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.diff.as_bytes());
        hasher.update([0u8]);
        for response in &self.responses {
            hasher.update(response.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update([1u8]);
        hasher.update(self.selected.as_bytes());

        let mut id = hex::encode(hasher.finalize());
        id.truncate(ID_LEN);
        id
    }
}

/// Directory of transcript files.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that `transcript` is written to.
    pub fn path_for(&self, transcript: &Transcript) -> PathBuf {
        self.dir.join(format!("{}.jsonl", transcript.content_id()))
    }

    /// Append `transcript` as one JSON line, creating the directory if needed.
    pub fn save(&self, transcript: &Transcript) -> Result<PathBuf, TranscriptError> {
        fs::create_dir_all(&self.dir).map_err(|source| TranscriptError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(transcript);
        let mut line = serde_json::to_string(transcript).map_err(TranscriptError::Serialize)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| TranscriptError::Write {
                path: path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .map_err(|source| TranscriptError::Write {
                path: path.clone(),
                source,
            })?;

        debug!("Saved transcript to {}", path.display());
        Ok(path)
    }
}

/// Read every record from a transcript file.
pub fn read_transcripts(path: &Path) -> Result<Vec<Transcript>, TranscriptError> {
    let content = fs::read_to_string(path).map_err(|source| TranscriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| TranscriptError::Deserialize {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}
