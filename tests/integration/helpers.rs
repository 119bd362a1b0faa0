//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Grammar fixture with stale values and unrelated surrounding content
pub const GRAMMAR: &str = r#"%include {
/*
** Zero-Clause BSD license:
*/
package internal

import (
	"fmt"
	"math"
)

// Version information, kept in sync with upstream pikchr.
const (
	ReleaseVersion   = "1.0"
	ManifestDate     = "2024-11-20 12:53:35"
	ManifestISODate  = "20241120"
)
}

%token_prefix T_
%token_type {PToken}
%extra_context {p *Pik}

document ::= statement_list(X). { p.pik_render(X) }
"#;

/// Header fixture with stale values
pub const HEADER: &str = "#define RELEASE_VERSION \"1.0\"\n#define MANIFEST_DATE \"2024-11-20 12:53:35\"\n#define MANIFEST_ISODATE \"20241120\"\n";

/// Upstream clone and downstream tree side by side in a temp dir
pub struct TestLayout {
  _root: TempDir,
  /// `<tmp>/pikchr`
  pub upstream: PathBuf,
  /// `<tmp>/gopikchr`, the working directory for the binary
  pub downstream: PathBuf,
}

impl TestLayout {
  /// Create an empty upstream repo and a downstream tree with both targets
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let upstream = root.path().join("pikchr");
    let downstream = root.path().join("gopikchr");

    std::fs::create_dir_all(&upstream)?;
    git(&upstream, &["init", "--initial-branch=master"])?;
    git(&upstream, &["config", "user.name", "Test User"])?;
    git(&upstream, &["config", "user.email", "test@example.com"])?;
    git(&upstream, &["config", "commit.gpgsign", "false"])?;

    std::fs::create_dir_all(downstream.join("c"))?;
    std::fs::create_dir_all(downstream.join("internal"))?;
    std::fs::write(downstream.join("c/VERSION.h"), HEADER)?;
    std::fs::write(downstream.join("internal/pikchr.y"), GRAMMAR)?;

    Ok(Self {
      _root: root,
      upstream,
      downstream,
    })
  }

  /// Commit to upstream with a pinned date, optionally writing VERSION first
  ///
  /// `date` uses git's ISO form, e.g. `2025-03-05 00:29:51 +0000`.
  pub fn upstream_commit(&self, message: &str, date: &str, version: Option<&str>) -> Result<String> {
    if let Some(version) = version {
      std::fs::write(self.upstream.join("VERSION"), format!("{}\n", version))?;
    }
    std::fs::write(self.upstream.join("pikchr.c"), format!("/* {} */\n", message))?;

    git(&self.upstream, &["add", "-A"])?;
    let output = Command::new("git")
      .current_dir(&self.upstream)
      .args(["commit", "-m", message])
      .env("GIT_AUTHOR_DATE", date)
      .env("GIT_COMMITTER_DATE", date)
      .output()
      .context("Failed to run git commit")?;
    if !output.status.success() {
      anyhow::bail!("git commit failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    let output = git(&self.upstream, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Remove VERSION from upstream so later commits carry none
  pub fn drop_version_file(&self) -> Result<()> {
    let path = self.upstream.join("VERSION");
    if path.exists() {
      std::fs::remove_file(path)?;
    }
    Ok(())
  }

  /// Read a downstream file
  pub fn read(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.downstream.join(path))?)
  }

  /// Overwrite a downstream file
  pub fn write(&self, path: &str, content: &str) -> Result<()> {
    Ok(std::fs::write(self.downstream.join(path), content)?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run update-version, returning the output whatever the exit status
pub fn run_update_version_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_update-version");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run update-version")
}

/// Run update-version and require success
pub fn run_update_version(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_update_version_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "update-version failed: update-version {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
