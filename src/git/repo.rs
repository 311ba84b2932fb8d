//! Repository discovery using git2.

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// Locations of the repository containing the current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    /// Root of the work tree; git subprocesses run here.
    pub workdir: PathBuf,
    /// The `.git` directory (or the worktree's private git dir).
    pub git_dir: PathBuf,
}

impl RepoPaths {
    /// Default location for saved transcripts.
    pub fn transcript_dir(&self) -> PathBuf {
        self.git_dir.join("autocommit").join("transcripts")
    }
}

/// Find the repository enclosing `start`, walking up parent directories.
pub fn discover_repo(start: &Path) -> Result<RepoPaths, GitError> {
    let repo = Repository::discover(start).map_err(GitError::RepositoryNotFound)?;
    let workdir = repo
        .workdir()
        .ok_or(GitError::BareRepository)?
        .to_path_buf();
    let git_dir = repo.path().to_path_buf();

    debug!("Repository at {}", workdir.display());
    Ok(RepoPaths { workdir, git_dir })
}
