use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::release::{Prerelease, SyncStatus, Version, VersionBump, VersionStore};
use serde::Serialize;

const USAGE: &str = "\
QGIS Legend View Plugin - Version Management

Usage:
  legend-release version show           - Show current version
  legend-release version major          - Bump major version
  legend-release version minor          - Bump minor version
  legend-release version patch          - Bump patch version
  legend-release version alpha          - Set as alpha release
  legend-release version beta           - Set as beta release
  legend-release version rc             - Set as release candidate
  legend-release version stable         - Mark as stable release";

/// Parsed `version` subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCommand {
  Show,
  Bump(VersionBump),
  /// Retag without touching the numbers; `None` marks stable
  Tag(Option<Prerelease>),
}

impl VersionCommand {
  /// Case-insensitive; `None` for anything unrecognised
  pub fn parse(command: &str) -> Option<Self> {
    match command.to_ascii_lowercase().as_str() {
      "show" => Some(Self::Show),
      "major" => Some(Self::Bump(VersionBump::Major)),
      "minor" => Some(Self::Bump(VersionBump::Minor)),
      "patch" => Some(Self::Bump(VersionBump::Patch)),
      "alpha" => Some(Self::Tag(Some(Prerelease::Alpha))),
      "beta" => Some(Self::Tag(Some(Prerelease::Beta))),
      "rc" => Some(Self::Tag(Some(Prerelease::Rc))),
      "stable" => Some(Self::Tag(None)),
      _ => None,
    }
  }
}

#[derive(Debug, Serialize)]
struct VersionInfo<'a> {
  version: String,
  major: u64,
  minor: u64,
  patch: u64,
  prerelease: Option<Prerelease>,
  build: &'a str,
  stable: bool,
}

impl<'a> From<&'a Version> for VersionInfo<'a> {
  fn from(version: &'a Version) -> Self {
    Self {
      version: version.to_string(),
      major: version.major,
      minor: version.minor,
      patch: version.patch,
      prerelease: version.prerelease,
      build: &version.build,
      stable: version.is_stable(),
    }
  }
}

/// Run the version command
///
/// No command prints usage. An unrecognised command is reported but, like the
/// usage path, is not treated as a failure.
pub fn run_version(ctx: &ProjectContext, command: Option<String>, json: bool) -> ReleaseResult<()> {
  let Some(raw) = command else {
    println!("{}", USAGE);
    return Ok(());
  };

  let Some(command) = VersionCommand::parse(&raw) else {
    println!("❌ Unknown command: {}", raw.to_ascii_lowercase());
    tracing::warn!(command = %raw, "unknown version command");
    return Ok(());
  };

  let store = VersionStore::new(ctx.version_resource_path(), ctx.metadata_path());
  let current = store.read()?;

  match command {
    VersionCommand::Show => show(&current, json),
    VersionCommand::Bump(component) => {
      let next = current.bump(component, None);
      tracing::debug!(component = component.as_str(), from = %current, to = %next, "bumping version");
      write(&store, &next)?;
      println!("✅ Version bumped to {}", next);
      Ok(())
    }
    VersionCommand::Tag(prerelease) => {
      let mut next = current.clone().with_prerelease(prerelease);
      next.build.clear();
      if next.to_semver() < current.to_semver() {
        println!("⚠️  {} has lower precedence than {}", next, current);
      }
      write(&store, &next)?;
      if next.is_stable() {
        println!("✅ Version set to stable: {}", next);
      } else {
        println!("✅ Version set to {}", next);
      }
      Ok(())
    }
  }
}

fn show(version: &Version, json: bool) -> ReleaseResult<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(&VersionInfo::from(version))?);
    return Ok(());
  }

  println!("Current version: {}", version);
  println!("  Major: {}", version.major);
  println!("  Minor: {}", version.minor);
  println!("  Patch: {}", version.patch);
  if let Some(tag) = version.prerelease {
    println!("  Pre-release: {}", tag);
  }
  if !version.build.is_empty() {
    println!("  Build: {}", version.build);
  }
  Ok(())
}

fn write(store: &VersionStore, version: &Version) -> ReleaseResult<()> {
  let report = store.write(version);
  report.print(store.resource_path(), store.metadata_path());

  match report.status() {
    SyncStatus::Complete => Ok(()),
    SyncStatus::Partial => Err(ReleaseError::with_help(
      format!("Version {} was only partially written", version),
      "One version file is stale. Fix the reported error and run the command again.",
    )),
    SyncStatus::Failed => Err(ReleaseError::message(format!("Failed to write version {}", version))),
  }
}
