//! Plugin version model and the two bump policies
//!
//! `Version::bump` is the release-manager policy (cascading reset of lower
//! components). `bump_patch_only` is the packaging policy: it works on the raw
//! metadata string, never resets anything and fails open. The two are kept
//! apart on purpose; callers pick the one whose contract they need.

use crate::core::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prerelease tag. Stable releases carry no tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prerelease {
  Alpha,
  Beta,
  Rc,
}

impl Prerelease {
  pub fn as_str(self) -> &'static str {
    match self {
      Prerelease::Alpha => "alpha",
      Prerelease::Beta => "beta",
      Prerelease::Rc => "rc",
    }
  }

  /// Parse a persisted tag; the empty string means stable.
  pub fn parse_tag(tag: &str) -> Result<Option<Self>, ParseError> {
    match tag {
      "" => Ok(None),
      "alpha" => Ok(Some(Prerelease::Alpha)),
      "beta" => Ok(Some(Prerelease::Beta)),
      "rc" => Ok(Some(Prerelease::Rc)),
      other => Err(ParseError::InvalidField {
        field: "PRERELEASE",
        value: other.to_string(),
      }),
    }
  }
}

impl fmt::Display for Prerelease {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Version component targeted by a bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
  /// Major version bump (resets minor and patch)
  Major,
  /// Minor version bump (resets patch)
  Minor,
  /// Patch version bump
  Patch,
}

impl VersionBump {
  pub fn as_str(self) -> &'static str {
    match self {
      VersionBump::Major => "major",
      VersionBump::Minor => "minor",
      VersionBump::Patch => "patch",
    }
  }
}

/// Plugin version: `major.minor.patch[-prerelease][+build]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
  pub major: u64,
  pub minor: u64,
  pub patch: u64,
  pub prerelease: Option<Prerelease>,
  /// Build metadata; empty for ordinary releases
  #[serde(default)]
  pub build: String,
}

impl Version {
  /// Create a stable version without build metadata
  pub fn new(major: u64, minor: u64, patch: u64) -> Self {
    Self {
      major,
      minor,
      patch,
      prerelease: None,
      build: String::new(),
    }
  }

  /// Same numbers, different prerelease tag
  pub fn with_prerelease(mut self, prerelease: Option<Prerelease>) -> Self {
    self.prerelease = prerelease;
    self
  }

  /// Check if this is a stable release
  pub fn is_stable(&self) -> bool {
    self.prerelease.is_none()
  }

  /// Increment `component`, zero every less significant component and set
  /// the prerelease tag. Build metadata is dropped.
  pub fn bump(&self, component: VersionBump, prerelease: Option<Prerelease>) -> Self {
    let (major, minor, patch) = match component {
      VersionBump::Major => (self.major + 1, 0, 0),
      VersionBump::Minor => (self.major, self.minor + 1, 0),
      VersionBump::Patch => (self.major, self.minor, self.patch + 1),
    };

    Self {
      major,
      minor,
      patch,
      prerelease,
      build: String::new(),
    }
  }

  /// Equivalent `semver::Version`, used for precedence checks
  pub fn to_semver(&self) -> semver::Version {
    let mut version = semver::Version::new(self.major, self.minor, self.patch);
    if let Some(tag) = self.prerelease {
      version.pre = semver::Prerelease::new(tag.as_str()).unwrap_or(semver::Prerelease::EMPTY);
    }
    if !self.build.is_empty() {
      version.build = semver::BuildMetadata::new(&self.build).unwrap_or(semver::BuildMetadata::EMPTY);
    }
    version
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
    if let Some(tag) = self.prerelease {
      write!(f, "-{}", tag)?;
    }
    if !self.build.is_empty() {
      write!(f, "+{}", self.build)?;
    }
    Ok(())
  }
}

impl FromStr for Version {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ParseError::InvalidVersion { input: s.to_string() };
    let parsed = semver::Version::parse(s.trim()).map_err(|_| invalid())?;
    let prerelease = Prerelease::parse_tag(parsed.pre.as_str()).map_err(|_| invalid())?;

    Ok(Self {
      major: parsed.major,
      minor: parsed.minor,
      patch: parsed.patch,
      prerelease,
      build: parsed.build.as_str().to_string(),
    })
  }
}

/// Packaging bump: `A.B.C` becomes `A.B.(C+1)`.
///
/// Anything that is not exactly three dot-separated integers is returned
/// unchanged.
pub fn bump_patch_only(version: &str) -> String {
  let trimmed = version.trim();
  let parts: Vec<&str> = trimmed.split('.').collect();
  if parts.len() != 3 {
    return version.to_string();
  }

  let numbers: Result<Vec<u64>, _> = parts.iter().map(|p| p.trim().parse::<u64>()).collect();
  match numbers.as_deref() {
    Ok([a, b, c]) => match c.checked_add(1) {
      Some(next) => format!("{}.{}.{}", a, b, next),
      None => version.to_string(),
    },
    _ => version.to_string(),
  }
}
