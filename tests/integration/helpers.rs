//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const PLUGIN_NAME: &str = "QGIS-legendView";

pub const METADATA: &str = "\
[general]
name=QGIS-legendView
qgisMinimumVersion=3.0
description=Dockable legend for the active layer
version=2.0.1
author=Legend View Team
email=legend@example.com
changelog=
    Version 2.0.1:
    - Qt6 support
tags=legend,symbology
";

pub const VERSION_RESOURCE: &str = "\
# -*- coding: utf-8 -*-
MAJOR = 2
MINOR = 0
PATCH = 1
PRERELEASE = \"\"
BUILD = \"\"
";

/// A plugin project directory with the usual release inputs
pub struct PluginProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl PluginProject {
  /// Project with metadata, version resource and a few manifest files
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    let project = Self { _root: root, path };

    project.write_file("metadata.txt", METADATA)?;
    project.write_file("version.py", VERSION_RESOURCE)?;
    project.write_file("__init__.py", "def classFactory(iface):\n    pass\n")?;
    project.write_file("legend_view.py", "class LegendView:\n    pass\n")?;
    project.write_file("LICENSE", "GNU GENERAL PUBLIC LICENSE\n")?;
    project.write_file("README.md", "# Legend View\n")?;
    project.write_file("i18n/LegendView_ja.qm", "qm")?;

    Ok(project)
  }

  /// Write a file relative to the project root, creating parent directories
  pub fn write_file(&self, relative: &str, content: &str) -> Result<()> {
    let path = self.path.join(relative);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
    Ok(())
  }

  pub fn read_file(&self, relative: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(relative)).with_context(|| format!("Failed to read {}", relative))
  }

  pub fn file_exists(&self, relative: &str) -> bool {
    self.path.join(relative).exists()
  }

  /// File names in the project root matching `{PLUGIN_NAME}_v*.zip`
  pub fn archives(&self) -> Result<Vec<String>> {
    let prefix = format!("{}_v", PLUGIN_NAME);
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&self.path)? {
      let name = entry?.file_name().to_string_lossy().to_string();
      if name.starts_with(&prefix) && name.ends_with(".zip") {
        names.push(name);
      }
    }
    names.sort();
    Ok(names)
  }
}

/// Member names of a zip archive, in archive order
pub fn zip_members(path: &Path) -> Result<Vec<String>> {
  let mut archive = zip::ZipArchive::new(File::open(path)?)?;
  let mut names = Vec::new();
  for i in 0..archive.len() {
    names.push(archive.by_index(i)?.name().to_string());
  }
  Ok(names)
}

/// Write a zip archive with the given (member, content) pairs
pub fn write_zip(path: &Path, members: &[(&str, &str)]) -> Result<()> {
  use std::io::Write;

  let mut zip = zip::ZipWriter::new(File::create(path)?);
  for (member, content) in members {
    zip.start_file(*member, zip::write::SimpleFileOptions::default())?;
    zip.write_all(content.as_bytes())?;
  }
  zip.finish()?;
  Ok(())
}

/// Run legend-release and return its output whatever the exit status
pub fn run_legend_release_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_legend-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("LEGEND_RELEASE_LOG")
    .output()
    .context("Failed to run legend-release")
}

/// Run legend-release and fail unless it exits successfully
pub fn run_legend_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_legend_release_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "legend-release command failed: legend-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}
