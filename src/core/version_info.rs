//! Canonical version values shared by both artifacts
//!
//! `CanonicalVersionInfo` is the single typed value both rewriters consume.
//! The two date forms come from the same parsed date token, so the header and
//! the grammar can never disagree about the date.

use crate::core::error::MetadataError;
use crate::core::vcs::CommitMetadata;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Release version plus manifest dates, ready to embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalVersionInfo {
  release_version: String,
  manifest_date: String,
  manifest_isodate: String,
}

impl CanonicalVersionInfo {
  /// Normalize raw commit metadata
  pub fn from_metadata(meta: &CommitMetadata) -> Result<Self, MetadataError> {
    let (date, time) = split_commit_date(&meta.full_date)?;
    let release_version = validate_release_version(&meta.release_version)?;

    Ok(Self {
      release_version: release_version.to_string(),
      manifest_date: format!("{} {}", date, time),
      manifest_isodate: date.replace('-', ""),
    })
  }

  /// Release version, e.g. `1.0`
  pub fn release_version(&self) -> &str {
    &self.release_version
  }

  /// Date and time without zone, e.g. `2025-03-05 00:29:51`
  pub fn manifest_date(&self) -> &str {
    &self.manifest_date
  }

  /// Date digits only, e.g. `20250305`
  pub fn manifest_isodate(&self) -> &str {
    &self.manifest_isodate
  }
}

/// Split a `%ci` timestamp into its date and time tokens
///
/// Tokens past the second (the zone offset) are dropped. Both tokens must be
/// in canonical zero-padded form.
fn split_commit_date(full_date: &str) -> Result<(&str, &str), MetadataError> {
  let malformed = || MetadataError::MalformedDate {
    raw: full_date.to_string(),
  };

  let mut parts = full_date.split_whitespace();
  let (Some(date), Some(time)) = (parts.next(), parts.next()) else {
    return Err(malformed());
  };

  let parsed_date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| malformed())?;
  let parsed_time = NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| malformed())?;

  // chrono accepts unpadded fields; the artifacts need the exact text
  if parsed_date.format(DATE_FORMAT).to_string() != date || parsed_time.format(TIME_FORMAT).to_string() != time {
    return Err(malformed());
  }

  Ok((date, time))
}

fn validate_release_version(raw: &str) -> Result<&str, MetadataError> {
  let version = raw.trim();
  if version.is_empty() || version.contains(['"', '\\', '\n', '\r']) {
    return Err(MetadataError::InvalidReleaseVersion { raw: raw.to_string() });
  }
  Ok(version)
}
