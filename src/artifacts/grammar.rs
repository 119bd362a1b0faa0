use super::{Artifact, Rendered, Substitution};
use crate::core::error::{ArtifactError, ResultExt, SyncError, SyncResult};
use crate::core::version_info::CanonicalVersionInfo;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};

pub const RELEASE_VERSION: &str = "ReleaseVersion";
pub const MANIFEST_DATE: &str = "ManifestDate";
pub const MANIFEST_ISODATE: &str = "ManifestISODate";

/// `internal/pikchr.y`: a grammar file with three Go string constants
///
/// Only the quoted literal after `<Name> =` is replaced. Names, alignment
/// and everything else in the file stay byte-for-byte. Every occurrence of a
/// constant is replaced; a constant with no occurrence is an error.
pub struct GrammarConstants {
  path: PathBuf,
}

impl GrammarConstants {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Substitute all three constants in `content`
  ///
  /// Returns the new text and how many times each constant was replaced.
  /// Counts of zero are reported, not rejected; see `render`.
  pub fn substitute(content: &str, info: &CanonicalVersionInfo) -> SyncResult<(String, Vec<Substitution>)> {
    let values = [
      (RELEASE_VERSION, info.release_version()),
      (MANIFEST_DATE, info.manifest_date()),
      (MANIFEST_ISODATE, info.manifest_isodate()),
    ];

    let mut text = content.to_string();
    let mut substitutions = Vec::with_capacity(values.len());

    for (constant, value) in values {
      let re = assignment_pattern(constant)?;
      let replacements = re.find_iter(&text).count();
      if replacements > 0 {
        text = re
          .replace_all(&text, |caps: &Captures| format!("{}\"{}\"", &caps["lead"], value))
          .into_owned();
      }
      substitutions.push(Substitution { constant, replacements });
    }

    Ok((text, substitutions))
  }
}

impl Artifact for GrammarConstants {
  fn name(&self) -> &'static str {
    "Go grammar"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn render(&self, info: &CanonicalVersionInfo) -> SyncResult<Rendered> {
    let previous =
      std::fs::read_to_string(&self.path).with_context(|| format!("Failed to read {}", self.path.display()))?;

    let (content, substitutions) = Self::substitute(&previous, info)?;

    if let Some(missing) = substitutions.iter().find(|s| s.replacements == 0) {
      return Err(
        ArtifactError::ConstantNotFound {
          path: self.path.clone(),
          constant: missing.constant.to_string(),
        }
        .into(),
      );
    }

    Ok(Rendered {
      path: self.path.clone(),
      previous: Some(previous),
      content,
      substitutions,
    })
  }
}

/// `Name = "..."` with any spacing around `=`; `lead` captures up to the quote
fn assignment_pattern(constant: &str) -> SyncResult<Regex> {
  let pattern = format!(r#"(?P<lead>\b{}\s*=\s*)"[^"]*""#, regex::escape(constant));
  Regex::new(&pattern).map_err(|e| SyncError::message(format!("Invalid pattern for {}: {}", constant, e)))
}
