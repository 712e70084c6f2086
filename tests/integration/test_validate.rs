//! Tests for the `validate` command

use crate::helpers::*;
use anyhow::Result;

fn complete_members() -> Vec<(&'static str, &'static str)> {
  vec![
    ("QGIS-legendView/__init__.py", ""),
    ("QGIS-legendView/metadata.txt", METADATA),
    ("QGIS-legendView/LICENSE", "GPL"),
    ("QGIS-legendView/README.md", "# Legend"),
    ("QGIS-legendView/CHANGELOG.md", "# Changes"),
    ("QGIS-legendView/icon.png", "png"),
  ]
}

#[test]
fn test_validate_without_path_prints_usage() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["validate"])?;
  assert!(stdout(&output).contains("Usage: legend-release validate <plugin_zip_file>"));
  Ok(())
}

#[test]
fn test_validate_complete_archive_passes() -> Result<()> {
  let project = PluginProject::new()?;
  let archive = project.path.join("plugin.zip");
  write_zip(&archive, &complete_members())?;

  let output = run_legend_release(&project.path, &["validate", "plugin.zip"])?;
  let out = stdout(&output);
  assert!(out.contains("Plugin name: QGIS-legendView"));
  assert!(out.contains("Total files: 6"));
  assert!(out.contains("Package validation passed with no issues!"));
  Ok(())
}

#[test]
fn test_validate_missing_license_fails() -> Result<()> {
  let project = PluginProject::new()?;
  let archive = project.path.join("plugin.zip");
  let members: Vec<_> = complete_members()
    .into_iter()
    .filter(|(name, _)| !name.ends_with("LICENSE"))
    .collect();
  write_zip(&archive, &members)?;

  let output = run_legend_release_raw(&project.path, &["validate", "plugin.zip"])?;
  assert_eq!(output.status.code(), Some(1));
  let out = stdout(&output);
  assert!(out.contains("Missing required file: LICENSE"));
  assert!(out.contains("Package validation failed"));
  Ok(())
}

#[test]
fn test_validate_missing_recommended_only_warns() -> Result<()> {
  let project = PluginProject::new()?;
  let archive = project.path.join("plugin.zip");
  let members: Vec<_> = complete_members()
    .into_iter()
    .filter(|(name, _)| !name.ends_with("icon.png"))
    .collect();
  write_zip(&archive, &members)?;

  let output = run_legend_release(&project.path, &["validate", "plugin.zip"])?;
  let out = stdout(&output);
  assert!(out.contains("Missing recommended file: icon.png"));
  assert!(out.contains("Package validation passed with warnings"));
  Ok(())
}

#[test]
fn test_validate_not_a_zip_fails() -> Result<()> {
  let project = PluginProject::new()?;
  project.write_file("plugin.zip", "definitely not a zip")?;

  let output = run_legend_release_raw(&project.path, &["validate", "plugin.zip"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("Invalid ZIP file format"));
  Ok(())
}

#[test]
fn test_validate_missing_archive_fails() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release_raw(&project.path, &["validate", "nope.zip"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("ZIP file not found"));
  Ok(())
}

#[test]
fn test_validate_json_report() -> Result<()> {
  let project = PluginProject::new()?;
  let archive = project.path.join("plugin.zip");
  write_zip(&archive, &complete_members())?;

  let output = run_legend_release(&project.path, &["validate", "plugin.zip", "--json"])?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(report["plugin_name"], "QGIS-legendView");
  assert_eq!(report["total_files"], 6);
  assert_eq!(report["errors"].as_array().map(Vec::len), Some(0));
  Ok(())
}
