//! Tests for the `version` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_version_without_command_prints_usage() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["version"])?;
  assert!(stdout(&output).contains("Version Management"));
  Ok(())
}

#[test]
fn test_version_show() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["version", "show"])?;
  let out = stdout(&output);
  assert!(out.contains("Current version: 2.0.1"));
  assert!(out.contains("  Patch: 1"));
  assert!(!out.contains("Pre-release"));
  Ok(())
}

#[test]
fn test_version_show_json() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["version", "show", "--json"])?;
  let info: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(info["version"], "2.0.1");
  assert_eq!(info["stable"], true);
  Ok(())
}

#[test]
fn test_version_minor_resets_patch_and_syncs_metadata() -> Result<()> {
  let project = PluginProject::new()?;
  run_legend_release(&project.path, &["version", "minor"])?;

  let resource = project.read_file("version.py")?;
  assert!(resource.contains("MAJOR = 2\n"));
  assert!(resource.contains("MINOR = 1\n"));
  assert!(resource.contains("PATCH = 0\n"));

  let metadata = project.read_file("metadata.txt")?;
  assert!(metadata.contains("\nversion=2.1.0\n"));
  assert!(metadata.contains("qgisMinimumVersion=3.0\n"));
  Ok(())
}

#[test]
fn test_version_alpha_then_stable() -> Result<()> {
  let project = PluginProject::new()?;

  run_legend_release(&project.path, &["version", "alpha"])?;
  assert!(project.read_file("version.py")?.contains("PRERELEASE = \"alpha\""));
  assert!(project.read_file("metadata.txt")?.contains("\nversion=2.0.1-alpha\n"));

  let output = run_legend_release(&project.path, &["version", "stable"])?;
  assert!(stdout(&output).contains("Version set to stable: 2.0.1"));
  assert!(project.read_file("version.py")?.contains("PRERELEASE = \"\""));
  assert!(project.read_file("metadata.txt")?.contains("\nversion=2.0.1\n"));
  Ok(())
}

#[test]
fn test_version_retag_to_lower_precedence_warns() -> Result<()> {
  let project = PluginProject::new()?;
  run_legend_release(&project.path, &["version", "rc"])?;

  let output = run_legend_release(&project.path, &["version", "alpha"])?;
  assert!(stdout(&output).contains("2.0.1-alpha has lower precedence than 2.0.1-rc"));
  assert!(project.read_file("metadata.txt")?.contains("\nversion=2.0.1-alpha\n"));
  Ok(())
}

#[test]
fn test_version_unknown_command_is_not_fatal() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["version", "bogus"])?;
  assert!(stdout(&output).contains("Unknown command: bogus"));
  assert_eq!(project.read_file("version.py")?, VERSION_RESOURCE);
  Ok(())
}

#[test]
fn test_version_missing_resource_fails() -> Result<()> {
  let project = PluginProject::new()?;
  std::fs::remove_file(project.path.join("version.py"))?;

  let output = run_legend_release_raw(&project.path, &["version", "patch"])?;
  assert_eq!(output.status.code(), Some(1));
  Ok(())
}

#[test]
fn test_version_partial_write_is_reported() -> Result<()> {
  let project = PluginProject::new()?;
  std::fs::remove_file(project.path.join("metadata.txt"))?;

  let output = run_legend_release_raw(&project.path, &["version", "patch"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("out of sync"));
  // The resource step is not rolled back
  assert!(project.read_file("version.py")?.contains("PATCH = 2\n"));
  Ok(())
}
