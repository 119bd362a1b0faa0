//! Error types for update-version with contextual messages and exit codes
//!
//! Every failure the pipeline can hit maps onto one of three categories (git,
//! metadata, artifact) plus plain I/O. Each category knows its exit code and,
//! where useful, a hint for the operator.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for update-version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad arguments, unusable input)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Validation failure (malformed metadata, target drift)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for update-version
#[derive(Debug)]
pub enum SyncError {
  /// Upstream repository errors
  Git(GitError),

  /// Commit metadata could not be normalized
  Metadata(MetadataError),

  /// Target artifact could not be rendered or written
  Artifact(ArtifactError),

  /// I/O errors, with what was being attempted
  Io {
    source: io::Error,
    context: Option<String>,
  },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl SyncError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    SyncError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error message with a hint for the operator
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    SyncError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      SyncError::Message { message, context, help } => SyncError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      SyncError::Io { source, context } => SyncError::Io {
        source,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      SyncError::Git(_) => ExitCode::System,
      SyncError::Metadata(_) => ExitCode::Validation,
      SyncError::Artifact(ArtifactError::PartialWrite { .. }) => ExitCode::System,
      SyncError::Artifact(_) => ExitCode::Validation,
      SyncError::Io { .. } => ExitCode::System,
      SyncError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      SyncError::Git(e) => e.help_message(),
      SyncError::Metadata(e) => e.help_message(),
      SyncError::Artifact(e) => e.help_message(),
      SyncError::Message { help, .. } => help.clone(),
      SyncError::Io { .. } => None,
    }
  }
}

impl fmt::Display for SyncError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SyncError::Git(e) => write!(f, "{}", e),
      SyncError::Metadata(e) => write!(f, "{}", e),
      SyncError::Artifact(e) => write!(f, "{}", e),
      SyncError::Io { source, context } => match context {
        Some(ctx) => write!(f, "{}: {}", ctx, source),
        None => write!(f, "I/O error: {}", source),
      },
      SyncError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for SyncError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SyncError::Io { source, .. } => Some(source),
      SyncError::Artifact(ArtifactError::PartialWrite { source, .. }) => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for SyncError {
  fn from(err: io::Error) -> Self {
    SyncError::Io {
      source: err,
      context: None,
    }
  }
}

impl From<GitError> for SyncError {
  fn from(err: GitError) -> Self {
    SyncError::Git(err)
  }
}

impl From<MetadataError> for SyncError {
  fn from(err: MetadataError) -> Self {
    SyncError::Metadata(err)
  }
}

impl From<ArtifactError> for SyncError {
  fn from(err: ArtifactError) -> Self {
    SyncError::Artifact(err)
  }
}

impl From<serde_json::Error> for SyncError {
  fn from(err: serde_json::Error) -> Self {
    SyncError::with_help(
      format!("JSON error: {}", err),
      "The --json report could not be serialized; rerun without --json.",
    )
  }
}

/// Upstream repository errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Upstream checkout missing
  RepoNotFound { path: PathBuf },

  /// Identifier does not name a commit
  CommitNotFound { sha: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { .. } => Some(
        "Expected directory structure:\n  <parent>/pikchr    (upstream repo)\n  <parent>/gopikchr  (this repo, run from here)\nor pass --upstream <DIR>."
          .to_string(),
      ),
      GitError::CommitNotFound { .. } => {
        Some("Fetch the upstream repository, or check the commit id with `git log` there.".to_string())
      }
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "pikchr repository not found at {}", path.display())
      }
      GitError::CommitNotFound { sha } => {
        write!(f, "Commit {} not found in pikchr repository", sha)
      }
    }
  }
}

/// Commit metadata that cannot be turned into canonical values
#[derive(Debug, PartialEq, Eq)]
pub enum MetadataError {
  /// Commit date is not `YYYY-MM-DD HH:MM:SS [...]`
  MalformedDate { raw: String },

  /// VERSION content cannot be embedded in a quoted literal
  InvalidReleaseVersion { raw: String },
}

impl MetadataError {
  fn help_message(&self) -> Option<String> {
    match self {
      MetadataError::MalformedDate { .. } => {
        Some("The commit date is read with `git show -s --format=%ci`; check the upstream git version.".to_string())
      }
      MetadataError::InvalidReleaseVersion { .. } => {
        Some("VERSION must hold a single line without quotes or backslashes.".to_string())
      }
    }
  }
}

impl fmt::Display for MetadataError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MetadataError::MalformedDate { raw } => {
        write!(f, "Malformed commit date: {:?}", raw)
      }
      MetadataError::InvalidReleaseVersion { raw } => {
        write!(f, "Invalid release version: {:?}", raw)
      }
    }
  }
}

/// Target file errors
#[derive(Debug)]
pub enum ArtifactError {
  /// A constant assignment was not found in the target file
  ConstantNotFound { path: PathBuf, constant: String },

  /// The first artifact was written, the second was not
  PartialWrite {
    updated: PathBuf,
    stale: PathBuf,
    source: Box<SyncError>,
  },
}

impl ArtifactError {
  fn help_message(&self) -> Option<String> {
    match self {
      ArtifactError::ConstantNotFound { constant, .. } => Some(format!(
        "Restore a `{} = \"...\"` assignment in the file; no files were modified.",
        constant
      )),
      ArtifactError::PartialWrite { updated, stale, .. } => Some(format!(
        "{} is up to date but {} is stale. Fix the cause and rerun; the command is idempotent.",
        updated.display(),
        stale.display()
      )),
    }
  }
}

impl fmt::Display for ArtifactError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArtifactError::ConstantNotFound { path, constant } => {
        write!(f, "Constant {} not found in {}", constant, path.display())
      }
      ArtifactError::PartialWrite { stale, source, .. } => {
        write!(f, "Failed to update {}: {}", stale.display(), source)
      }
    }
  }
}

/// Result type alias for update-version
pub type SyncResult<T> = Result<T, SyncError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> SyncResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> SyncResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<SyncError>,
{
  fn context(self, ctx: impl Into<String>) -> SyncResult<T> {
    self.map_err(|e| Into::<SyncError>::into(e).context(ctx))
  }

  fn with_context<F>(self, f: F) -> SyncResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| Into::<SyncError>::into(e).context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &SyncError) {
  eprintln!("❌ Error: {}", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}", help);
  }
}
