//! Downstream artifacts that embed the canonical version values
//!
//! Currently supports:
//! - C header (`c/VERSION.h`), regenerated in full
//! - Go grammar (`internal/pikchr.y`), three constants substituted in place
//!
//! Rendering is pure apart from reading the current file; nothing touches disk
//! until `Rendered::write`, so every artifact can be checked before any write.

use crate::core::error::{ResultExt, SyncResult};
use crate::core::version_info::CanonicalVersionInfo;
use serde::Serialize;
use similar::TextDiff;
use std::path::{Path, PathBuf};

pub mod grammar;
pub mod header;

pub use grammar::GrammarConstants;
pub use header::VersionHeader;

/// A target file carrying the version values
pub trait Artifact {
  /// Short label for progress output
  fn name(&self) -> &'static str;

  /// File this artifact owns
  fn path(&self) -> &Path;

  /// Produce the new file content for `info`
  fn render(&self, info: &CanonicalVersionInfo) -> SyncResult<Rendered>;
}

/// How often one constant was replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
  pub constant: &'static str,
  pub replacements: usize,
}

/// New content for one artifact, not yet written
#[derive(Debug, Clone)]
pub struct Rendered {
  pub path: PathBuf,
  /// Content on disk at render time, `None` if the file did not exist
  pub previous: Option<String>,
  pub content: String,
  /// Per-constant counts; empty for full-file regeneration
  pub substitutions: Vec<Substitution>,
}

impl Rendered {
  /// Whether writing would change the file
  pub fn is_changed(&self) -> bool {
    self.previous.as_deref() != Some(self.content.as_str())
  }

  /// Write the new content, skipping unchanged files
  ///
  /// Returns whether the file was written.
  pub fn write(&self) -> SyncResult<bool> {
    if !self.is_changed() {
      return Ok(false);
    }
    std::fs::write(&self.path, &self.content).with_context(|| format!("Failed to write {}", self.path.display()))?;
    Ok(true)
  }

  /// Unified diff from the previous content, labelled with `label`
  pub fn diff(&self, label: &str) -> String {
    let old = self.previous.as_deref().unwrap_or("");
    TextDiff::from_lines(old, self.content.as_str())
      .unified_diff()
      .context_radius(2)
      .header(&format!("a/{}", label), &format!("b/{}", label))
      .to_string()
  }
}

/// Read a target file, mapping "missing" to `None`
pub(crate) fn read_existing(path: &Path) -> SyncResult<Option<String>> {
  match std::fs::read_to_string(path) {
    Ok(content) => Ok(Some(content)),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
  }
}
