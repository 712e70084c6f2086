//! Tests for the `pack` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_pack_creates_archive_and_bumps_version() -> Result<()> {
  let project = PluginProject::new()?;

  let output = run_legend_release(&project.path, &["pack"])?;
  assert!(stdout(&output).contains("Successfully created: QGIS-legendView_v2.0.2.zip"));

  assert_eq!(project.archives()?, vec!["QGIS-legendView_v2.0.2.zip"]);

  let members = zip_members(&project.path.join("QGIS-legendView_v2.0.2.zip"))?;
  assert!(members.contains(&"QGIS-legendView/__init__.py".to_string()));
  assert!(members.contains(&"QGIS-legendView/metadata.txt".to_string()));
  assert!(members.contains(&"QGIS-legendView/version.py".to_string()));
  assert!(members.contains(&"QGIS-legendView/i18n/LegendView_ja.qm".to_string()));
  assert!(members.iter().all(|m| m.starts_with("QGIS-legendView/")));

  let metadata = project.read_file("metadata.txt")?;
  assert!(metadata.contains("\nversion=2.0.2\n"));
  assert!(metadata.contains("qgisMinimumVersion=3.0\n"));
  assert!(metadata.contains("changelog=\n    Version 2.0.2:\n    - (describe changes here)\n    Version 2.0.1:\n"));

  let resource = project.read_file("version.py")?;
  assert!(resource.contains("PATCH = 2"));

  Ok(())
}

#[test]
fn test_pack_twice_leaves_single_archive() -> Result<()> {
  let project = PluginProject::new()?;

  run_legend_release(&project.path, &["pack"])?;
  run_legend_release(&project.path, &["pack"])?;

  assert_eq!(project.archives()?, vec!["QGIS-legendView_v2.0.3.zip"]);
  let metadata = project.read_file("metadata.txt")?;
  assert_eq!(metadata.matches("- (describe changes here)").count(), 2);

  Ok(())
}

#[test]
fn test_pack_reports_missing_manifest_files() -> Result<()> {
  let project = PluginProject::new()?;

  let output = run_legend_release(&project.path, &["pack"])?;
  let out = stdout(&output);
  assert!(out.contains("✓ Added: __init__.py"));
  assert!(out.contains("✗ Not found: icon.png"));

  Ok(())
}

#[test]
fn test_pack_dry_run_changes_nothing() -> Result<()> {
  let project = PluginProject::new()?;
  project.write_file("QGIS-legendView_v2.0.0.zip", "old")?;

  let output = run_legend_release(&project.path, &["pack", "--dry-run"])?;
  let out = stdout(&output);
  assert!(out.contains("QGIS-legendView_v2.0.2.zip"));
  assert!(out.contains("would remove QGIS-legendView_v2.0.0.zip"));

  assert_eq!(project.archives()?, vec!["QGIS-legendView_v2.0.0.zip"]);
  assert_eq!(project.read_file("metadata.txt")?, METADATA);

  Ok(())
}

#[test]
fn test_pack_without_metadata_uses_fallback() -> Result<()> {
  let project = PluginProject::new()?;
  std::fs::remove_file(project.path.join("metadata.txt"))?;

  run_legend_release(&project.path, &["pack"])?;

  assert_eq!(project.archives()?, vec!["QGIS-legendView_v0.0.2.zip"]);
  assert!(!project.file_exists("metadata.txt"));

  Ok(())
}

#[test]
fn test_pack_then_validate() -> Result<()> {
  let project = PluginProject::new()?;
  run_legend_release(&project.path, &["pack"])?;

  let output = run_legend_release(&project.path, &["validate", "QGIS-legendView_v2.0.2.zip"])?;
  assert!(stdout(&output).contains("Package validation passed with warnings"));

  Ok(())
}
