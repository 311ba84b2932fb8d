//! Apply an accepted message as a git commit.

use tracing::info;

use crate::error::GitError;

use super::Vcs;

/// Commit the staged changes with `message`.
///
/// git's routine stdout is discarded on success. On failure the error carries
/// git's stderr, or its stdout when stderr is empty (`nothing to commit` is
/// reported on stdout).
pub fn commit(vcs: &dyn Vcs, message: &str) -> Result<(), GitError> {
    let output = vcs.commit(message)?;

    if !output.success {
        let detail = if output.stderr.trim().is_empty() {
            output.stdout.trim()
        } else {
            output.stderr.trim()
        };
        return Err(GitError::CommitFailed {
            stderr: detail.to_string(),
        });
    }

    info!("Committed: {}", message);
    Ok(())
}
