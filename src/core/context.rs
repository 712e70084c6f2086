//! Project context - resolve once, pass everywhere
//!
//! The project root and its configuration are resolved in main.rs and handed
//! to every command by reference, so file locations are computed in a single
//! place.

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use std::path::{Path, PathBuf};

/// Plugin project directory plus its release configuration.
#[derive(Debug, Clone)]
pub struct ProjectContext {
  /// Project root directory (where metadata.txt lives)
  pub root: PathBuf,

  /// Release configuration (legend-release.toml or defaults)
  pub config: ReleaseConfig,
}

impl ProjectContext {
  /// Build context from a root directory and an optional explicit config file.
  pub fn build(root: &Path, config_path: Option<&Path>) -> ReleaseResult<Self> {
    let config = ReleaseConfig::load(root, config_path)?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Absolute path of the version resource
  pub fn version_resource_path(&self) -> PathBuf {
    self.root.join(&self.config.files.version_resource)
  }

  /// Absolute path of the metadata file
  pub fn metadata_path(&self) -> PathBuf {
    self.root.join(&self.config.files.metadata)
  }

  /// Get project root as Path reference (convenience)
  pub fn project_root(&self) -> &Path {
    &self.root
  }
}
