//! Archive manifest: which project files go into the plugin zip

use crate::core::config::PackageConfig;
use crate::utils::path_to_archive_format;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Fixed list of files and directory trees copied into the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
  pub files: Vec<PathBuf>,
  pub dirs: Vec<PathBuf>,
}

/// One resolved manifest line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManifestEntry {
  /// File that will be stored as `member`
  File { source: PathBuf, relative: String, member: String },
  /// Listed file that does not exist
  MissingFile { relative: String },
  /// Listed directory that does not exist
  MissingDir { relative: String },
}

impl ManifestEntry {
  pub fn is_included(&self) -> bool {
    matches!(self, ManifestEntry::File { .. })
  }
}

impl Manifest {
  pub fn from_config(config: &PackageConfig) -> Self {
    Self {
      files: config.include.clone(),
      dirs: config.include_dirs.clone(),
    }
  }

  /// Resolve against `root`, naming every member `{plugin_name}/<relative>`.
  ///
  /// Listed files come first in manifest order, then each directory's files
  /// in sorted walk order. Missing entries are kept so they can be reported.
  pub fn resolve(&self, root: &Path, plugin_name: &str) -> Vec<ManifestEntry> {
    let mut entries = Vec::new();

    for file in &self.files {
      let relative = path_to_archive_format(file);
      let source = root.join(file);
      if source.is_file() {
        entries.push(ManifestEntry::File {
          member: format!("{}/{}", plugin_name, relative),
          source,
          relative,
        });
      } else {
        entries.push(ManifestEntry::MissingFile { relative });
      }
    }

    for dir in &self.dirs {
      let source_dir = root.join(dir);
      if !source_dir.is_dir() {
        entries.push(ManifestEntry::MissingDir {
          relative: path_to_archive_format(dir),
        });
        continue;
      }

      for entry in WalkDir::new(&source_dir).sort_by_file_name() {
        let entry = match entry {
          Ok(entry) => entry,
          Err(e) => {
            tracing::warn!(dir = %source_dir.display(), error = %e, "skipping unreadable entry");
            continue;
          }
        };
        if !entry.file_type().is_file() {
          continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
          continue;
        };
        let relative = path_to_archive_format(rel);
        entries.push(ManifestEntry::File {
          member: format!("{}/{}", plugin_name, relative),
          source: entry.path().to_path_buf(),
          relative,
        });
      }
    }

    entries
  }
}
