use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration for legend-release
/// Searched in order: legend-release.toml, .legend-release.toml, .config/legend-release.toml
///
/// Every key is optional; a project without a config file packages the
/// Legend View plugin layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub files: FilesConfig,
  #[serde(default)]
  pub package: PackageConfig,
  #[serde(default)]
  pub validate: ValidateConfig,
}

/// Locations of the two files that carry the plugin version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
  /// Python module holding MAJOR/MINOR/PATCH/PRERELEASE (default: version.py)
  #[serde(default = "default_version_resource")]
  pub version_resource: PathBuf,

  /// INI-style plugin metadata (default: metadata.txt)
  #[serde(default = "default_metadata")]
  pub metadata: PathBuf,
}

fn default_version_resource() -> PathBuf {
  PathBuf::from("version.py")
}

fn default_metadata() -> PathBuf {
  PathBuf::from("metadata.txt")
}

impl Default for FilesConfig {
  fn default() -> Self {
    Self {
      version_resource: default_version_resource(),
      metadata: default_metadata(),
    }
  }
}

/// Archive manifest and packaging fallbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
  /// Plugin name used when metadata.txt cannot be read
  #[serde(default = "default_fallback_name")]
  pub fallback_name: String,

  /// Version used when metadata.txt cannot be read
  #[serde(default = "default_fallback_version")]
  pub fallback_version: String,

  /// Individual files copied into the archive, in order
  #[serde(default = "default_include")]
  pub include: Vec<PathBuf>,

  /// Directory trees copied recursively into the archive
  #[serde(default = "default_include_dirs")]
  pub include_dirs: Vec<PathBuf>,

  /// Body line of the changelog entry inserted on every pack
  #[serde(default = "default_changelog_placeholder")]
  pub changelog_placeholder: String,
}

fn default_fallback_name() -> String {
  "QGIS-legendView".to_string()
}

fn default_fallback_version() -> String {
  "0.0.1".to_string()
}

fn default_include() -> Vec<PathBuf> {
  [
    "__init__.py",
    "legend_view.py",
    "legend_view_dockwidget.py",
    "legend_view_dockwidget_base.ui",
    "resources_rc.py",
    "resources_rc_qt5.py",
    "metadata.txt",
    "LICENSE",
    "README.md",
    "icon.png",
    "legend.png",
    "qt_compat.py",
    "version.py",
  ]
  .into_iter()
  .map(PathBuf::from)
  .collect()
}

fn default_include_dirs() -> Vec<PathBuf> {
  vec![PathBuf::from("i18n")]
}

fn default_changelog_placeholder() -> String {
  "- (describe changes here)".to_string()
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      fallback_name: default_fallback_name(),
      fallback_version: default_fallback_version(),
      include: default_include(),
      include_dirs: default_include_dirs(),
      changelog_placeholder: default_changelog_placeholder(),
    }
  }
}

impl PackageConfig {
  /// Validate packaging configuration
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.fallback_name.trim().is_empty() {
      return Err(invalid("package.fallback_name", "must not be empty"));
    }

    if semver::Version::parse(&self.fallback_version).is_err() {
      return Err(invalid(
        "package.fallback_version",
        format!("'{}' must look like '0.0.1'", self.fallback_version),
      ));
    }

    for path in self.include.iter().chain(&self.include_dirs) {
      if !is_contained(path) {
        return Err(invalid(
          "package.include",
          format!("'{}' must be a relative path inside the project", path.display()),
        ));
      }
    }

    Ok(())
  }
}

/// File sets checked by `validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateConfig {
  /// Missing entries are errors
  #[serde(default = "default_required")]
  pub required: Vec<String>,

  /// Missing entries are warnings
  #[serde(default = "default_recommended")]
  pub recommended: Vec<String>,
}

fn default_required() -> Vec<String> {
  vec!["__init__.py".to_string(), "metadata.txt".to_string(), "LICENSE".to_string()]
}

fn default_recommended() -> Vec<String> {
  vec!["README.md".to_string(), "CHANGELOG.md".to_string(), "icon.png".to_string()]
}

impl Default for ValidateConfig {
  fn default() -> Self {
    Self {
      required: default_required(),
      recommended: default_recommended(),
    }
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> ReleaseError {
  ReleaseError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.into(),
  })
}

/// True when `path` is relative and never climbs out of its base
fn is_contained(path: &Path) -> bool {
  !path.as_os_str().is_empty() && path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl ReleaseConfig {
  /// Find config file in search order: legend-release.toml, .legend-release.toml, .config/legend-release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("legend-release.toml"),
      path.join(".legend-release.toml"),
      path.join(".config").join("legend-release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config for a project directory
  ///
  /// An explicit path must exist. Without one, the search locations are tried
  /// and the built-in defaults are used when none is present.
  pub fn load(project_root: &Path, explicit: Option<&Path>) -> ReleaseResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        let path = if path.is_absolute() {
          path.to_path_buf()
        } else {
          project_root.join(path)
        };
        if !path.exists() {
          return Err(ReleaseError::Config(ConfigError::NotFound { path }));
        }
        path
      }
      None => match Self::find_config_path(project_root) {
        Some(path) => path,
        None => {
          tracing::debug!(root = %project_root.display(), "no config file, using defaults");
          return Ok(Self::default());
        }
      },
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .package
      .validate()
      .with_context(|| format!("Invalid package configuration in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }
}
