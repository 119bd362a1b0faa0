pub mod system_git;

pub use system_git::SystemGit;

/// Raw metadata read from a single upstream commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMetadata {
  /// Full object id the identifier resolved to
  pub sha: String,
  /// Committer date as printed by `%ci`, e.g. `2025-03-05 00:29:51 +0000`
  pub full_date: String,
  /// Content of the VERSION file at this commit, or the default
  pub release_version: String,
}
