//! Staged diff retrieval and noise filtering.

use tracing::debug;

use crate::error::GitError;

use super::Vcs;

/// Lines containing any of these substrings are dropped from the diff.
///
/// They come from notebook outputs and embedded images, which bloat the
/// prompt without saying anything about the change.
pub const NOISE_KEYWORDS: [&str; 5] = ["image/png", "output", "traceback", "evalue", "ename"];

/// Filtered staged changes, ready to be sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff(String);

impl Diff {
    /// Build a diff from raw `git diff` output, removing noise lines.
    pub fn from_raw(raw: &str) -> Self {
        Self(filter_noise(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl AsRef<str> for Diff {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of asking git for the staged changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedDiff {
    Changes(Diff),
    NoChanges,
    /// Something is staged, but every line matched a noise keyword.
    OnlyNoise { raw_lines: usize },
}

/// Whether a diff line matches one of the [`NOISE_KEYWORDS`].
pub fn is_noise(line: &str) -> bool {
    NOISE_KEYWORDS.iter().any(|keyword| line.contains(keyword))
}

/// Drop every noise line and rejoin the rest with `\n`.
pub fn filter_noise(raw: &str) -> String {
    raw.lines()
        .filter(|line| !is_noise(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fetch the staged diff.
///
/// A failed query is `GitError::DiffUnavailable`. Empty output is
/// `StagedDiff::NoChanges`; output that is entirely noise is
/// `StagedDiff::OnlyNoise`.
pub fn get_staged_diff(vcs: &dyn Vcs) -> Result<StagedDiff, GitError> {
    let output = vcs.diff_staged()?;

    if !output.success {
        return Err(GitError::DiffUnavailable {
            stderr: output.stderr.trim().to_string(),
        });
    }

    if output.stdout.trim().is_empty() {
        return Ok(StagedDiff::NoChanges);
    }

    let raw_lines = output.stdout.lines().count();
    let diff = Diff::from_raw(&output.stdout);
    if diff.is_empty() {
        debug!("All {} staged diff lines were filtered", raw_lines);
        return Ok(StagedDiff::OnlyNoise { raw_lines });
    }

    debug!(
        "Staged diff: {} raw lines, {} after filtering",
        raw_lines,
        diff.line_count()
    );
    Ok(StagedDiff::Changes(diff))
}
