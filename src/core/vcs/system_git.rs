//! System git backend for read-only queries against the upstream clone
//!
//! Every query is a single plumbing/porcelain subprocess run with an
//! isolated environment, so user config cannot change the output format.

use crate::core::error::{GitError, SyncResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// Confirms `path` is inside a work tree with one `rev-parse` call.
  pub fn open(path: &Path) -> SyncResult<Self> {
    let git = Self {
      repo_path: path.to_path_buf(),
    };

    let output = git
      .git_cmd()
      .args(["rev-parse", "--is-inside-work-tree"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }
        .into());
      }
      return Err(
        GitError::CommandFailed {
          command: "git rev-parse --is-inside-work-tree".to_string(),
          stderr: stderr.trim().to_string(),
        }
        .into(),
      );
    }

    Ok(git)
  }

  /// Resolve an identifier to a full commit SHA
  ///
  /// Returns `None` when the identifier does not name a commit object.
  pub fn resolve_commit(&self, rev: &str) -> SyncResult<Option<String>> {
    let spec = format!("{}^{{commit}}", rev);
    let output = self
      .git_cmd()
      .args(["rev-parse", "--verify", "--quiet", &spec])
      .output()
      .context("Failed to run git rev-parse")?;

    if !output.status.success() {
      return Ok(None);
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if sha.is_empty() { None } else { Some(sha) })
  }

  /// Get the committer date of a commit in `%ci` format
  pub fn commit_date(&self, sha: &str) -> SyncResult<String> {
    let output = self
      .git_cmd()
      .args(["show", "-s", "--format=%ci", sha])
      .output()
      .context("Failed to get commit date")?;

    let stdout = check_output("git show -s --format=%ci", output)?;
    Ok(stdout.lines().next().unwrap_or("").trim().to_string())
  }

  /// Read a file at a specific commit
  ///
  /// Returns `None` if the file doesn't exist at that commit.
  pub fn read_file_at_commit(&self, sha: &str, path: &str) -> SyncResult<Option<Vec<u8>>> {
    let spec = format!("{}:{}", sha, path);

    let output = self
      .git_cmd()
      .args(["show", &spec])
      .output()
      .context("Failed to read file from commit")?;

    if !output.status.success() {
      return Ok(None);
    }

    Ok(Some(output.stdout))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Stops repository discovery at the parent of the repo path
  /// - Adds configuration overrides that affect output format
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }
    // The upstream clone must be a repository root, not a subdirectory of some other checkout
    if let Some(parent) = self.repo_path.parent().filter(|p| !p.as_os_str().is_empty()) {
      cmd.env("GIT_CEILING_DIRECTORIES", parent);
    }

    cmd.arg("-c").arg("log.showSignature=false");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

/// Turn a finished git process into its stdout, or a `CommandFailed` error
fn check_output(command: &str, output: Output) -> SyncResult<String> {
  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(
      GitError::CommandFailed {
        command: command.to_string(),
        stderr: stderr.trim().to_string(),
      }
      .into(),
    );
  }

  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
