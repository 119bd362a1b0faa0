//! Directory conventions for the upstream clone and the two target files
//!
//! The tool runs from the root of the downstream checkout. The upstream pikchr
//! clone is its sibling:
//!
//! ```text
//! <parent>/pikchr     upstream repository (read-only)
//! <parent>/gopikchr   downstream checkout (cwd)
//!   c/VERSION.h
//!   internal/pikchr.y
//! ```

use crate::core::error::{GitError, SyncResult};
use std::path::{Path, PathBuf};

/// Resolved locations for one run
#[derive(Debug, Clone)]
pub struct Layout {
  /// Downstream checkout root
  pub root: PathBuf,
  /// Upstream pikchr clone
  pub upstream: PathBuf,
}

impl Layout {
  /// Upstream directory name, next to the downstream checkout
  pub const UPSTREAM_DIR: &'static str = "pikchr";
  /// C header holding the version `#define`s
  pub const VERSION_HEADER: &'static str = "c/VERSION.h";
  /// Go grammar holding the version constants
  pub const GRAMMAR_FILE: &'static str = "internal/pikchr.y";

  /// Work out paths for `root`, optionally overriding the upstream location
  ///
  /// Fails with `RepoNotFound` when the upstream directory is missing.
  pub fn discover(root: &Path, upstream: Option<PathBuf>) -> SyncResult<Self> {
    let upstream = match upstream {
      Some(path) if path.is_absolute() => path,
      Some(path) => root.join(path),
      None => root
        .parent()
        .map(|parent| parent.join(Self::UPSTREAM_DIR))
        .unwrap_or_else(|| root.join("..").join(Self::UPSTREAM_DIR)),
    };

    if !upstream.is_dir() {
      return Err(GitError::RepoNotFound { path: upstream }.into());
    }

    Ok(Self {
      root: root.to_path_buf(),
      upstream,
    })
  }

  pub fn version_header(&self) -> PathBuf {
    self.root.join(Self::VERSION_HEADER)
  }

  pub fn grammar_file(&self) -> PathBuf {
    self.root.join(Self::GRAMMAR_FILE)
  }
}
