//! Update command implementation
//!
//! Resolve → normalize → render both artifacts → write header → write grammar.
//! Nothing is written until both artifacts have rendered cleanly; the header
//! (full regeneration) is written first so a failure can only leave the
//! grammar stale.

use crate::artifacts::{Artifact, GrammarConstants, Rendered, Substitution, VersionHeader};
use crate::core::error::{ArtifactError, SyncResult};
use crate::core::layout::Layout;
use crate::core::resolver;
use crate::core::vcs::{CommitMetadata, SystemGit};
use crate::core::version_info::CanonicalVersionInfo;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// Outcome for one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
  Updated,
  Unchanged,
  /// Dry-run: would be updated
  Pending,
}

#[derive(Debug, Serialize)]
pub struct ArtifactReport {
  pub path: PathBuf,
  pub status: ArtifactStatus,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub substitutions: Vec<Substitution>,
}

/// Machine-readable summary printed with `--json`
#[derive(Debug, Serialize)]
pub struct UpdateReport {
  pub commit: String,
  pub sha: String,
  pub full_date: String,
  pub version: CanonicalVersionInfo,
  pub dry_run: bool,
  pub artifacts: Vec<ArtifactReport>,
}

/// Everything needed to write, computed without touching the targets
pub struct UpdatePlan {
  pub commit: String,
  pub metadata: CommitMetadata,
  pub info: CanonicalVersionInfo,
  /// Header first, grammar second
  pub rendered: Vec<(&'static str, Rendered)>,
}

/// Run the update command from the current directory
pub fn run_update(commit: String, upstream: Option<PathBuf>, dry_run: bool, json: bool) -> SyncResult<()> {
  let root = env::current_dir()?;
  let layout = Layout::discover(&root, upstream)?;

  if !json {
    println!("🔍 Getting commit info from {}...", layout.upstream.display());
  }

  let plan = plan_update(&layout, &commit)?;

  if !json {
    println!();
    println!("  Commit:  {}", plan.commit);
    println!("  SHA:     {}", plan.metadata.sha);
    println!("  Date:    {}", plan.metadata.full_date);
    println!("  Version: {}", plan.info.release_version());
    println!();
  }

  let statuses: Vec<ArtifactStatus> = if dry_run {
    if !json {
      print_dry_run(&layout.root, &plan);
    }
    plan
      .rendered
      .iter()
      .map(|(_, r)| {
        if r.is_changed() {
          ArtifactStatus::Pending
        } else {
          ArtifactStatus::Unchanged
        }
      })
      .collect()
  } else {
    let statuses = apply_plan(&plan)?;
    if !json {
      for ((name, rendered), status) in plan.rendered.iter().zip(&statuses) {
        print_status(&layout.root, name, rendered, *status);
      }
    }
    statuses
  };

  if json {
    let report = UpdateReport {
      commit: plan.commit.clone(),
      sha: plan.metadata.sha.clone(),
      full_date: plan.metadata.full_date.clone(),
      version: plan.info.clone(),
      dry_run,
      artifacts: plan
        .rendered
        .iter()
        .zip(statuses)
        .map(|((_, r), status)| ArtifactReport {
          path: relative(&layout.root, &r.path),
          status,
          substitutions: r.substitutions.clone(),
        })
        .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  if dry_run {
    println!("🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  println!();
  println!("✅ Version information updated successfully!");
  println!();
  println!("Next steps:");
  println!("  1. Regenerate internal/pikchr.go: cd internal && ../../golemon/bin/golemon pikchr.y");
  println!("  2. Run tests: ./dotest.sh");
  println!("  3. Commit changes");

  Ok(())
}

/// Resolve, normalize and render both artifacts
///
/// Fails before any file is written: unknown commit, malformed date, an
/// unreadable grammar file or a missing constant all surface here.
pub fn plan_update(layout: &Layout, commit: &str) -> SyncResult<UpdatePlan> {
  let git = SystemGit::open(&layout.upstream)?;
  let metadata = resolver::resolve(&git, commit)?;
  let info = CanonicalVersionInfo::from_metadata(&metadata)?;

  let artifacts: [Box<dyn Artifact>; 2] = [
    Box::new(VersionHeader::new(layout.version_header())),
    Box::new(GrammarConstants::new(layout.grammar_file())),
  ];

  let rendered = artifacts
    .iter()
    .map(|artifact| artifact.render(&info).map(|rendered| (artifact.name(), rendered)))
    .collect::<SyncResult<Vec<_>>>()?;

  Ok(UpdatePlan {
    commit: commit.to_string(),
    metadata,
    info,
    rendered,
  })
}

/// Write the rendered artifacts in order
///
/// A failure after the first write is reported as `PartialWrite` naming the
/// updated and the stale file. Nothing is rolled back.
pub fn apply_plan(plan: &UpdatePlan) -> SyncResult<Vec<ArtifactStatus>> {
  let mut statuses = Vec::with_capacity(plan.rendered.len());
  let mut written: Option<&Path> = None;

  for (_, rendered) in &plan.rendered {
    match rendered.write() {
      Ok(true) => {
        statuses.push(ArtifactStatus::Updated);
        written.get_or_insert(rendered.path.as_path());
      }
      Ok(false) => statuses.push(ArtifactStatus::Unchanged),
      Err(e) => {
        return Err(match written {
          Some(updated) => ArtifactError::PartialWrite {
            updated: updated.to_path_buf(),
            stale: rendered.path.clone(),
            source: Box::new(e),
          }
          .into(),
          None => e,
        });
      }
    }
  }

  Ok(statuses)
}

fn print_status(root: &Path, name: &str, rendered: &Rendered, status: ArtifactStatus) {
  let path = relative(root, &rendered.path);
  match status {
    ArtifactStatus::Updated => {
      if rendered.substitutions.is_empty() {
        println!("✅ Updated {} ({})", path.display(), name);
      } else {
        let total: usize = rendered.substitutions.iter().map(|s| s.replacements).sum();
        println!("✅ Updated {} ({}, {} substitutions)", path.display(), name, total);
      }
    }
    ArtifactStatus::Unchanged => println!("   {} already up to date ({})", path.display(), name),
    ArtifactStatus::Pending => println!("   {} would be updated ({})", path.display(), name),
  }

  for sub in rendered.substitutions.iter().filter(|s| s.replacements > 1) {
    println!("   ⚠️  {} matched {} times; all occurrences replaced", sub.constant, sub.replacements);
  }
}

fn print_dry_run(root: &Path, plan: &UpdatePlan) {
  for (name, rendered) in &plan.rendered {
    let path = relative(root, &rendered.path);
    if rendered.is_changed() {
      println!("📝 {} ({}):", path.display(), name);
      print!("{}", rendered.diff(&path.to_string_lossy()));
      println!();
    } else {
      println!("   {} already up to date ({})", path.display(), name);
    }
  }
}

fn relative(root: &Path, path: &Path) -> PathBuf {
  path.strip_prefix(root).map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
}
