use super::{Artifact, Rendered, read_existing};
use crate::core::error::SyncResult;
use crate::core::version_info::CanonicalVersionInfo;
use std::path::{Path, PathBuf};

/// `c/VERSION.h`: three `#define`s and nothing else
///
/// The file is regenerated from the template on every run; any other content
/// it held is dropped.
pub struct VersionHeader {
  path: PathBuf,
}

impl VersionHeader {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Full header text for `info`
  pub fn content(info: &CanonicalVersionInfo) -> String {
    format!(
      "#define RELEASE_VERSION \"{}\"\n#define MANIFEST_DATE \"{}\"\n#define MANIFEST_ISODATE \"{}\"\n",
      info.release_version(),
      info.manifest_date(),
      info.manifest_isodate()
    )
  }
}

impl Artifact for VersionHeader {
  fn name(&self) -> &'static str {
    "C header"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn render(&self, info: &CanonicalVersionInfo) -> SyncResult<Rendered> {
    Ok(Rendered {
      path: self.path().to_path_buf(),
      previous: read_existing(self.path())?,
      content: Self::content(info),
      substitutions: Vec::new(),
    })
  }
}
