//! Plugin archive validation against repository submission rules
//!
//! Read-only: the archive is opened, its member list inspected and the
//! archived metadata parsed in memory. Errors fail validation; warnings and
//! file counts only annotate the report.

use crate::core::config::ValidateConfig;
use crate::core::error::ArchiveError;
use crate::package::check::{CheckResult, Severity};
use crate::release::metadata::{GENERAL, Metadata, REQUIRED_GENERAL_KEYS};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const METADATA_FILE: &str = "metadata.txt";

/// Counts of notable file types anywhere in the archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileTypeCounts {
  /// `.py`
  pub scripts: usize,
  /// `.ui`
  pub interfaces: usize,
  /// `.qm`, `.ts`
  pub translations: usize,
  /// `.qrc`, `_rc.py`
  pub resources: usize,
}

impl FileTypeCounts {
  pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
    let mut counts = Self::default();
    for name in names {
      if name.ends_with(".py") {
        counts.scripts += 1;
      }
      if name.ends_with(".ui") {
        counts.interfaces += 1;
      }
      if name.ends_with(".qm") || name.ends_with(".ts") {
        counts.translations += 1;
      }
      if name.ends_with(".qrc") || name.ends_with("_rc.py") {
        counts.resources += 1;
      }
    }
    counts
  }
}

/// Outcome of one validation run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
  pub archive: PathBuf,
  pub plugin_name: Option<String>,
  pub total_files: usize,
  pub checks: Vec<CheckResult>,
  /// `[general]` values found for the required keys
  pub metadata: Vec<(String, String)>,
  pub counts: FileTypeCounts,
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
}

impl ValidationReport {
  fn new(archive: &Path) -> Self {
    Self {
      archive: archive.to_path_buf(),
      plugin_name: None,
      total_files: 0,
      checks: Vec::new(),
      metadata: Vec::new(),
      counts: FileTypeCounts::default(),
      errors: Vec::new(),
      warnings: Vec::new(),
    }
  }

  /// Validation passes when there are no errors; warnings never fail it
  pub fn passed(&self) -> bool {
    self.errors.is_empty()
  }

  fn record(&mut self, result: CheckResult) {
    if !result.passed {
      match result.severity {
        Severity::Error => self.errors.push(result.message.clone()),
        Severity::Warning => self.warnings.push(result.message.clone()),
        Severity::Info => {}
      }
    }
    self.checks.push(result);
  }

  fn structural(&mut self, err: ArchiveError) {
    self.record(CheckResult::error("archive", self.archive.display().to_string(), err.to_string()));
  }

  /// Print the report the way the validator always has
  pub fn print(&self) {
    println!("Validating plugin package: {}", self.archive.display());
    println!("{}", "=".repeat(50));

    if let Some(name) = &self.plugin_name {
      println!("Plugin name: {}", name);
      println!("Total files: {}", self.total_files);
      println!();

      for (group, title) in [
        ("required-files", "Required files check:"),
        ("recommended-files", "Recommended files check:"),
      ] {
        println!("{}", title);
        for check in self.checks.iter().filter(|c| c.check_name == group) {
          println!("{} {}", check.icon(), check.subject);
        }
        println!();
      }

      let metadata_checks: Vec<_> = self.checks.iter().filter(|c| c.check_name == "metadata").collect();
      if !metadata_checks.is_empty() {
        println!("Metadata validation:");
        for check in metadata_checks {
          if check.passed {
            println!("{} {}: {}", check.icon(), check.subject, check.message);
          } else {
            println!("{} {}", check.icon(), check.message);
          }
        }
        println!();
      }

      println!("Python files found: {}", self.counts.scripts);
      if self.counts.interfaces > 0 {
        println!("UI files found: {}", self.counts.interfaces);
      }
      if self.counts.translations > 0 {
        println!("Translation files found: {}", self.counts.translations);
      }
      if self.counts.resources > 0 {
        println!("Resource files found: {}", self.counts.resources);
      }
    } else {
      for check in self.checks.iter().filter(|c| c.check_name == "archive") {
        println!("❌ {}", check.message);
      }
    }

    println!();
    println!("Validation Summary:");
    println!("{}", "=".repeat(50));

    if !self.errors.is_empty() {
      println!("❌ ERRORS:");
      for error in &self.errors {
        println!("   • {}", error);
      }
      println!();
    }

    if !self.warnings.is_empty() {
      println!("⚠️  WARNINGS:");
      for warning in &self.warnings {
        println!("   • {}", warning);
      }
      println!();
    }

    if self.errors.is_empty() && self.warnings.is_empty() {
      println!("✅ Package validation passed with no issues!");
    } else if self.errors.is_empty() {
      println!("✅ Package validation passed with warnings");
    } else {
      println!("❌ Package validation failed");
    }
  }
}

/// Validate the archive at `path`. Never modifies the archive.
pub fn validate_archive(path: &Path, rules: &ValidateConfig) -> ValidationReport {
  let mut report = ValidationReport::new(path);

  if !path.is_file() {
    report.structural(ArchiveError::NotFound {
      path: path.to_path_buf(),
    });
    return report;
  }

  let mut archive = match File::open(path)
    .map_err(|e| e.to_string())
    .and_then(|f| ZipArchive::new(f).map_err(|e| e.to_string()))
  {
    Ok(archive) => archive,
    Err(e) => {
      tracing::debug!(error = %e, "failed to open archive");
      report.structural(ArchiveError::Zip(e));
      return report;
    }
  };

  let names = match member_names(&mut archive) {
    Ok(names) => names,
    Err(e) => {
      report.structural(ArchiveError::Zip(e.to_string()));
      return report;
    }
  };

  let plugin_name = match names.first().and_then(|n| n.split('/').next()) {
    Some(name) if !name.is_empty() => name.to_string(),
    _ => {
      report.structural(ArchiveError::NoPluginFolder);
      return report;
    }
  };

  report.plugin_name = Some(plugin_name.clone());
  report.total_files = names.len();

  let has = |file: &str| {
    let member = format!("{}/{}", plugin_name, file);
    names.iter().any(|n| *n == member)
  };

  for file in &rules.required {
    let result = if has(file) {
      CheckResult::pass("required-files", file, "present")
    } else {
      CheckResult::error("required-files", file, format!("Missing required file: {}", file))
    };
    report.record(result);
  }

  for file in &rules.recommended {
    let result = if has(file) {
      CheckResult::pass("recommended-files", file, "present")
    } else {
      CheckResult::warning("recommended-files", file, format!("Missing recommended file: {}", file))
    };
    report.record(result);
  }

  let metadata_member = format!("{}/{}", plugin_name, METADATA_FILE);
  if has(METADATA_FILE) {
    match read_metadata(&mut archive, &metadata_member) {
      Ok(meta) => {
        for key in REQUIRED_GENERAL_KEYS {
          let result = match meta.get(GENERAL, key) {
            Some(value) => {
              report.metadata.push((key.to_string(), value.to_string()));
              CheckResult::pass("metadata", key, value)
            }
            None => CheckResult::error("metadata", key, format!("Missing metadata: [{}] {}", GENERAL, key)),
          };
          report.record(result);
        }
      }
      Err(e) => report.record(CheckResult::error(
        "metadata",
        METADATA_FILE,
        format!("Error reading {}: {}", METADATA_FILE, e),
      )),
    }
  } else {
    report.record(CheckResult::error(
      "metadata",
      METADATA_FILE,
      format!("Missing metadata file: {}", METADATA_FILE),
    ));
  }

  report.counts = FileTypeCounts::from_names(names.iter().map(String::as_str));
  report
}

fn member_names<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> zip::result::ZipResult<Vec<String>> {
  let mut names = Vec::with_capacity(archive.len());
  for i in 0..archive.len() {
    names.push(archive.by_index_raw(i)?.name().to_string());
  }
  Ok(names)
}

fn read_metadata<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, member: &str) -> Result<Metadata, String> {
  let mut bytes = Vec::new();
  archive
    .by_name(member)
    .map_err(|e| e.to_string())?
    .read_to_end(&mut bytes)
    .map_err(|e| e.to_string())?;
  let text = String::from_utf8(bytes).map_err(|e| e.to_string())?;
  Metadata::parse(&text).map_err(|e| e.to_string())
}
