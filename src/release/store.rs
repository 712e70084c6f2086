//! Version store: read the persisted version and write it back to both the
//! version resource and the metadata file.
//!
//! The two writes are separate steps. Each replaces its file atomically
//! (temp file + rename), but there is no transaction across the pair: if the
//! second step fails the first stays written, and `SyncReport` says which file
//! is now stale.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::release::metadata;
use crate::release::resource;
use crate::release::version::Version;
use crate::utils::atomic_write;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one write step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum StepOutcome {
  /// File rewritten
  Written,
  /// Step intentionally not attempted
  Skipped(String),
  /// Step attempted and failed; the file is unchanged
  Failed(String),
}

impl StepOutcome {
  fn from_result(result: ReleaseResult<()>) -> Self {
    match result {
      Ok(()) => StepOutcome::Written,
      Err(e) => StepOutcome::Failed(e.to_string()),
    }
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, StepOutcome::Failed(_))
  }
}

/// Overall state of a dual write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
  /// Every attempted step succeeded
  Complete,
  /// At least one step succeeded and at least one failed
  Partial,
  /// Nothing was written
  Failed,
}

/// Result of writing a version to both persisted locations
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
  pub version: String,
  pub resource: StepOutcome,
  pub metadata: StepOutcome,
  /// Whether a changelog placeholder was inserted (packaging writes only)
  pub changelog_entry: bool,
}

impl SyncReport {
  pub fn status(&self) -> SyncStatus {
    let steps = [&self.resource, &self.metadata];
    let written = steps.iter().filter(|s| matches!(s, StepOutcome::Written)).count();
    let failed = steps.iter().filter(|s| s.is_failed()).count();
    match (written, failed) {
      (_, 0) if written > 0 => SyncStatus::Complete,
      (0, _) => SyncStatus::Failed,
      _ => SyncStatus::Partial,
    }
  }

  pub fn is_complete(&self) -> bool {
    self.status() == SyncStatus::Complete
  }

  /// Print per-file outcome lines
  pub fn print(&self, resource_path: &Path, metadata_path: &Path) {
    for (path, outcome) in [(resource_path, &self.resource), (metadata_path, &self.metadata)] {
      let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
      match outcome {
        StepOutcome::Written => println!("   Updated {} to {}", name, self.version),
        StepOutcome::Skipped(reason) => println!("   Skipped {}: {}", name, reason),
        StepOutcome::Failed(reason) => println!("❌ Error updating {}: {}", name, reason),
      }
    }
    if self.status() == SyncStatus::Partial {
      println!("⚠️  Version files are out of sync; fix the failed file and rerun");
    }
  }
}

/// Reads and writes the plugin version
#[derive(Debug, Clone)]
pub struct VersionStore {
  resource_path: PathBuf,
  metadata_path: PathBuf,
}

impl VersionStore {
  pub fn new(resource_path: impl Into<PathBuf>, metadata_path: impl Into<PathBuf>) -> Self {
    Self {
      resource_path: resource_path.into(),
      metadata_path: metadata_path.into(),
    }
  }

  pub fn resource_path(&self) -> &Path {
    &self.resource_path
  }

  pub fn metadata_path(&self) -> &Path {
    &self.metadata_path
  }

  /// Read the current version from the version resource
  pub fn read(&self) -> ReleaseResult<Version> {
    if !self.resource_path.exists() {
      return Err(ReleaseError::MissingFile {
        path: self.resource_path.clone(),
      });
    }
    let content = fs::read_to_string(&self.resource_path)
      .with_context(|| format!("Failed to read {}", self.resource_path.display()))?;
    let version = resource::parse(&content)?;
    tracing::debug!(%version, path = %self.resource_path.display(), "read version resource");
    Ok(version)
  }

  /// Persist `version` to the resource (full rewrite) and to the metadata
  /// `version=` line.
  pub fn write(&self, version: &Version) -> SyncReport {
    let version_string = version.to_string();
    let resource = StepOutcome::from_result(self.write_resource(version));
    let metadata = StepOutcome::from_result(
      self.update_metadata(|content| Ok(metadata::set_version(content, &version_string)?)),
    );

    SyncReport {
      version: version_string,
      resource,
      metadata,
      changelog_entry: false,
    }
  }

  /// Packaging write: metadata `version=` line plus a placeholder changelog
  /// entry, and the version resource when it exists and `version` is a
  /// well-formed version.
  pub fn write_packaged(&self, version: &str, changelog_placeholder: &str) -> SyncReport {
    let resource = match version.parse::<Version>() {
      Ok(_) if !self.resource_path.exists() => StepOutcome::Skipped("no version resource".to_string()),
      Ok(parsed) => StepOutcome::from_result(self.write_resource(&parsed)),
      Err(e) => StepOutcome::Skipped(e.to_string()),
    };

    let mut changelog_entry = false;
    let metadata = StepOutcome::from_result(self.update_metadata(|content| {
      let updated = metadata::set_version(content, version)?;
      match metadata::insert_changelog_entry(&updated, version, changelog_placeholder) {
        Some(with_entry) => {
          changelog_entry = true;
          Ok(with_entry)
        }
        None => {
          tracing::warn!(path = %self.metadata_path.display(), "no changelog= entry, changelog not updated");
          Ok(updated)
        }
      }
    }));

    let changelog_entry = changelog_entry && !metadata.is_failed();
    SyncReport {
      version: version.to_string(),
      resource,
      metadata,
      changelog_entry,
    }
  }

  fn write_resource(&self, version: &Version) -> ReleaseResult<()> {
    atomic_write(&self.resource_path, resource::render(version).as_bytes())
  }

  fn update_metadata<F>(&self, edit: F) -> ReleaseResult<()>
  where
    F: FnOnce(&str) -> ReleaseResult<String>,
  {
    if !self.metadata_path.exists() {
      return Err(ReleaseError::MissingFile {
        path: self.metadata_path.clone(),
      });
    }
    let content = fs::read_to_string(&self.metadata_path)
      .with_context(|| format!("Failed to read {}", self.metadata_path.display()))?;
    let updated = edit(&content)?;
    atomic_write(&self.metadata_path, updated.as_bytes())
  }
}
