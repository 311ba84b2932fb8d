//! Git operations: staged diff retrieval, commits, and repository discovery.
//!
//! Diff and commit shell out to the system `git` binary so the user's hooks,
//! signing config and credential setup apply exactly as on the command line.

pub mod commit;
pub mod diff;
pub mod repo;

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

pub use commit::commit;
pub use diff::{Diff, NOISE_KEYWORDS, StagedDiff, filter_noise, get_staged_diff};
pub use repo::{RepoPaths, discover_repo};

/// Captured result of a git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// The two version-control primitives the workflow depends on.
pub trait Vcs {
    /// Run the staged-diff query.
    fn diff_staged(&self) -> Result<GitOutput, GitError>;

    /// Create a commit from the index with `message` as its subject.
    fn commit(&self, message: &str) -> Result<GitOutput, GitError>;
}

/// [`Vcs`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        debug!("git {}", args.first().copied().unwrap_or_default());
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(GitError::SpawnFailed)?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

impl Vcs for GitCli {
    fn diff_staged(&self) -> Result<GitOutput, GitError> {
        self.run(&["diff", "--staged"])
    }

    fn commit(&self, message: &str) -> Result<GitOutput, GitError> {
        self.run(&["commit", "-m", message])
    }
}

/// Check that the `git` executable is available.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| GitError::GitNotInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_git_installed() {
        assert!(check_git_installed().is_ok());
    }

    #[test]
    fn test_run_git_version_succeeds() {
        let git = GitCli::new(".");
        let output = git.run(&["--version"]).unwrap();
        assert!(output.success);
        assert!(output.stdout.starts_with("git version"));
    }

    #[test]
    fn test_run_git_invalid_command_fails() {
        let git = GitCli::new(".");
        let output = git.run(&["not-a-real-command"]).unwrap();
        assert!(!output.success);
        assert!(!output.stderr.is_empty());
    }

    #[test]
    fn test_run_git_in_missing_directory_is_spawn_failure() {
        let git = GitCli::new("/definitely/not/a/real/dir");
        assert!(matches!(
            git.run(&["--version"]),
            Err(GitError::SpawnFailed(_))
        ));
    }
}
