//! Integration tests for `update-version` failure paths
//!
//! Every failure here happens before the first write, so both targets must
//! be left exactly as they were.

use crate::helpers::{GRAMMAR, HEADER, TestLayout, run_update_version_raw};
use anyhow::Result;

fn assert_untouched(layout: &TestLayout) -> Result<()> {
  assert_eq!(layout.read("c/VERSION.h")?, HEADER);
  assert_eq!(layout.read("internal/pikchr.y")?, GRAMMAR);
  Ok(())
}

#[test]
fn test_no_arguments_is_usage_error() -> Result<()> {
  let layout = TestLayout::new()?;

  let output = run_update_version_raw(&layout.downstream, &[])?;
  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));

  assert_untouched(&layout)
}

#[test]
fn test_extra_arguments_are_usage_error() -> Result<()> {
  let layout = TestLayout::new()?;
  let sha = layout.upstream_commit("Release 2.0", "2025-03-05 00:29:51 +0000", Some("2.0"))?;

  let output = run_update_version_raw(&layout.downstream, &[sha.as_str(), "HEAD"])?;
  assert!(!output.status.success());

  assert_untouched(&layout)
}

#[test]
fn test_unknown_commit() -> Result<()> {
  let layout = TestLayout::new()?;
  layout.upstream_commit("Release 2.0", "2025-03-05 00:29:51 +0000", Some("2.0"))?;

  let output = run_update_version_raw(&layout.downstream, &["0badc0ffee0badc0ffee"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr.contains("Commit 0badc0ffee0badc0ffee not found"), "stderr: {}", stderr);

  assert_untouched(&layout)
}

#[test]
fn test_missing_upstream_directory() -> Result<()> {
  let layout = TestLayout::new()?;
  std::fs::remove_dir_all(&layout.upstream)?;

  let output = run_update_version_raw(&layout.downstream, &["HEAD"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!output.status.success());
  assert!(stderr.contains("pikchr repository not found"), "stderr: {}", stderr);
  assert!(stderr.contains("Expected directory structure"));

  assert_untouched(&layout)
}

#[test]
fn test_missing_grammar_constant_writes_nothing() -> Result<()> {
  let layout = TestLayout::new()?;
  let sha = layout.upstream_commit("Release 2.0", "2025-03-05 00:29:51 +0000", Some("2.0"))?;
  let drifted = GRAMMAR.replace("ManifestISODate  =", "ManifestIsoDate  =");
  layout.write("internal/pikchr.y", &drifted)?;

  let output = run_update_version_raw(&layout.downstream, &[sha.as_str()])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr.contains("ManifestISODate"), "stderr: {}", stderr);
  // Header is written first, but only after the grammar rendered cleanly
  assert_eq!(layout.read("c/VERSION.h")?, HEADER);
  assert_eq!(layout.read("internal/pikchr.y")?, drifted);

  Ok(())
}

#[test]
fn test_missing_grammar_file_writes_nothing() -> Result<()> {
  let layout = TestLayout::new()?;
  let sha = layout.upstream_commit("Release 2.0", "2025-03-05 00:29:51 +0000", Some("2.0"))?;
  std::fs::remove_file(layout.downstream.join("internal/pikchr.y"))?;

  let output = run_update_version_raw(&layout.downstream, &[sha.as_str()])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  // I/O failures are system errors even when wrapped with context
  assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr);
  assert!(stderr.contains("Failed to read"), "stderr: {}", stderr);
  assert!(stderr.contains("internal/pikchr.y"), "stderr: {}", stderr);
  assert_eq!(layout.read("c/VERSION.h")?, HEADER);

  Ok(())
}

#[test]
fn test_unusable_version_file_writes_nothing() -> Result<()> {
  let layout = TestLayout::new()?;
  let sha = layout.upstream_commit("Odd VERSION", "2025-03-05 00:29:51 +0000", Some("2.0 \"beta\""))?;

  let output = run_update_version_raw(&layout.downstream, &[sha.as_str()])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr.contains("Invalid release version"), "stderr: {}", stderr);

  assert_untouched(&layout)
}
