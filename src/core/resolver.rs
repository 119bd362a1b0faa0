//! Commit resolution against the upstream pikchr clone

use crate::core::error::{GitError, SyncResult};
use crate::core::vcs::{CommitMetadata, SystemGit};

/// Release version used when a commit carries no VERSION file
pub const DEFAULT_RELEASE_VERSION: &str = "1.0";

/// File holding the release version at the upstream repository root
pub const VERSION_FILE: &str = "VERSION";

/// Resolve `commit_id` and read its date and release version
///
/// Fails with `CommitNotFound` before any other query when the identifier
/// does not name a commit.
pub fn resolve(git: &SystemGit, commit_id: &str) -> SyncResult<CommitMetadata> {
  // A leading dash would be parsed as an option by git
  if commit_id.is_empty() || commit_id.starts_with('-') {
    return Err(
      GitError::CommitNotFound {
        sha: commit_id.to_string(),
      }
      .into(),
    );
  }

  let sha = git.resolve_commit(commit_id)?.ok_or_else(|| GitError::CommitNotFound {
    sha: commit_id.to_string(),
  })?;

  let full_date = git.commit_date(&sha)?;

  let release_version = git
    .read_file_at_commit(&sha, VERSION_FILE)?
    .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
    .filter(|v| !v.is_empty())
    .unwrap_or_else(|| DEFAULT_RELEASE_VERSION.to_string());

  Ok(CommitMetadata {
    sha,
    full_date,
    release_version,
  })
}
