//! Build the distributable plugin archive
//!
//! A packaging run:
//! 1. reads plugin name and version from metadata (configured fallbacks on failure)
//! 2. bumps the patch number and persists it (metadata + changelog entry)
//! 3. removes stale `{name}_v*.zip` archives
//! 4. writes `{name}_v{version}.zip` with every manifest entry under `{name}/`

use crate::core::context::ProjectContext;
use crate::core::error::{ArchiveError, ReleaseError, ReleaseResult, ResultExt};
use crate::package::manifest::{Manifest, ManifestEntry};
use crate::release::metadata::Metadata;
use crate::release::store::{SyncReport, VersionStore};
use crate::release::version::bump_patch_only;
use crate::utils::format_kb;
use glob::Pattern;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Everything a packaging run will do, computed without side effects
#[derive(Debug, Clone, Serialize)]
pub struct PackPlan {
  pub plugin_name: String,
  pub current_version: String,
  pub next_version: String,
  /// True when metadata could not be read and fallbacks were used
  pub used_fallback: bool,
  pub archive_path: PathBuf,
  pub stale_archives: Vec<PathBuf>,
  pub entries: Vec<ManifestEntry>,
}

impl PackPlan {
  /// Inspect the project and decide name, versions, archive and entries.
  pub fn analyze(ctx: &ProjectContext) -> ReleaseResult<Self> {
    let package = &ctx.config.package;
    let (plugin_name, current_version, used_fallback) = match read_name_and_version(&ctx.metadata_path()) {
      Ok((name, version)) => (name, version, false),
      Err(e) => {
        println!("⚠️  Could not read plugin name/version from metadata: {}", e);
        tracing::warn!(error = %e, "using fallback plugin name and version");
        (package.fallback_name.clone(), package.fallback_version.clone(), true)
      }
    };

    let next_version = bump_patch_only(&current_version);
    let archive_path = ctx.project_root().join(archive_file_name(&plugin_name, &next_version));
    let stale_archives = find_stale_archives(ctx.project_root(), &plugin_name)?;
    let entries = Manifest::from_config(package).resolve(ctx.project_root(), &plugin_name);

    Ok(Self {
      plugin_name,
      current_version,
      next_version,
      used_fallback,
      archive_path,
      stale_archives,
      entries,
    })
  }

  pub fn included(&self) -> impl Iterator<Item = &ManifestEntry> {
    self.entries.iter().filter(|e| e.is_included())
  }
}

/// Result of a completed packaging run
#[derive(Debug, Clone, Serialize)]
pub struct PackReport {
  pub archive_path: PathBuf,
  pub version_sync: SyncReport,
  pub removed_archives: Vec<PathBuf>,
  pub added: usize,
  pub skipped: usize,
  pub size_bytes: u64,
  pub sha256: String,
  /// (member, uncompressed size)
  pub contents: Vec<(String, u64)>,
}

/// `{name}_v{version}.zip`
pub fn archive_file_name(plugin_name: &str, version: &str) -> String {
  format!("{}_v{}.zip", plugin_name, version)
}

fn read_name_and_version(metadata_path: &Path) -> ReleaseResult<(String, String)> {
  let content = fs::read_to_string(metadata_path).with_context(|| format!("Failed to read {}", metadata_path.display()))?;
  Ok(Metadata::parse(&content)?.name_and_version()?)
}

/// Files in `root` matching `{plugin_name}_v*.zip`
pub fn find_stale_archives(root: &Path, plugin_name: &str) -> ReleaseResult<Vec<PathBuf>> {
  let pattern = Pattern::new(&format!("{}_v*.zip", Pattern::escape(plugin_name)))?;
  let mut stale = Vec::new();
  for entry in fs::read_dir(root).with_context(|| format!("Failed to list {}", root.display()))? {
    let entry = entry?;
    if entry.file_type()?.is_file() && pattern.matches(&entry.file_name().to_string_lossy()) {
      stale.push(entry.path());
    }
  }
  stale.sort();
  Ok(stale)
}

/// Run the packaging steps for `plan`.
///
/// Missing manifest entries are reported and skipped. The run fails only when
/// the archive cannot be written or is absent afterwards.
pub fn execute(ctx: &ProjectContext, plan: &PackPlan) -> ReleaseResult<PackReport> {
  let store = VersionStore::new(ctx.version_resource_path(), ctx.metadata_path());
  let version_sync = store.write_packaged(&plan.next_version, &ctx.config.package.changelog_placeholder);
  version_sync.print(store.resource_path(), store.metadata_path());

  let mut removed_archives = Vec::new();
  for stale in &plan.stale_archives {
    match fs::remove_file(stale) {
      Ok(()) => {
        println!("   Removed old package: {}", display_name(stale));
        removed_archives.push(stale.clone());
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(ReleaseError::write(stale, e)),
    }
  }

  println!("Creating plugin ZIP package: {}", display_name(&plan.archive_path));
  println!("Adding files to ZIP archive...");

  if let Err(e) = write_archive(&plan.archive_path, &plan.entries) {
    // A half-written archive is worse than none
    let _ = fs::remove_file(&plan.archive_path);
    return Err(e);
  }

  if !plan.archive_path.is_file() {
    return Err(ArchiveError::NotProduced {
      path: plan.archive_path.clone(),
    }
    .into());
  }

  let size_bytes = fs::metadata(&plan.archive_path)?.len();
  let sha256 = file_sha256(&plan.archive_path)?;
  let contents = list_archive(&plan.archive_path)?;

  Ok(PackReport {
    archive_path: plan.archive_path.clone(),
    version_sync,
    removed_archives,
    added: plan.included().count(),
    skipped: plan.entries.len() - plan.included().count(),
    size_bytes,
    sha256,
    contents,
  })
}

fn write_archive(archive_path: &Path, entries: &[ManifestEntry]) -> ReleaseResult<()> {
  let file = File::create(archive_path).map_err(|e| ReleaseError::write(archive_path, e))?;
  let mut zip = ZipWriter::new(file);
  let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

  for entry in entries {
    match entry {
      ManifestEntry::File { source, relative, member } => {
        let mut input = BufReader::new(File::open(source).with_context(|| format!("Failed to read {}", relative))?);
        zip.start_file(member.as_str(), options)?;
        io::copy(&mut input, &mut zip).map_err(|e| ReleaseError::write(archive_path, e))?;
        println!("✓ Added: {}", relative);
      }
      ManifestEntry::MissingFile { relative } => println!("✗ Not found: {}", relative),
      ManifestEntry::MissingDir { relative } => println!("✗ Directory not found: {}", relative),
    }
  }

  // Flushes the central directory; the file handle is dropped with the writer
  zip.finish()?;
  Ok(())
}

/// Hex SHA-256 of a file
pub fn file_sha256(path: &Path) -> ReleaseResult<String> {
  let mut hasher = Sha256::new();
  let mut file = File::open(path)?;
  io::copy(&mut file, &mut hasher)?;
  Ok(format!("{:x}", hasher.finalize()))
}

/// Member names and uncompressed sizes, in archive order
pub fn list_archive(path: &Path) -> ReleaseResult<Vec<(String, u64)>> {
  let mut archive = ZipArchive::new(File::open(path)?)?;
  let mut contents = Vec::with_capacity(archive.len());
  for i in 0..archive.len() {
    let member = archive.by_index_raw(i)?;
    contents.push((member.name().to_string(), member.size()));
  }
  Ok(contents)
}

fn display_name(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| path.display().to_string())
}

/// Print the dry-run view of a plan
pub fn print_plan(plan: &PackPlan) {
  println!("📦 Package plan for '{}'", plan.plugin_name);
  println!();
  println!("  Current:  {}", plan.current_version);
  if plan.next_version == plan.current_version {
    println!("  Next:     {} (not a three-part version, left unchanged)", plan.next_version);
  } else {
    println!("  Next:     {}", plan.next_version);
  }
  println!("  Archive:  {}", display_name(&plan.archive_path));
  if plan.used_fallback {
    println!("  ⚠️  metadata unreadable, using fallback name/version");
  }
  println!();
  for stale in &plan.stale_archives {
    println!("  would remove {}", display_name(stale));
  }
  for entry in &plan.entries {
    match entry {
      ManifestEntry::File { member, .. } => println!("  ✓ {}", member),
      ManifestEntry::MissingFile { relative } => println!("  ✗ Not found: {}", relative),
      ManifestEntry::MissingDir { relative } => println!("  ✗ Directory not found: {}", relative),
    }
  }
  println!();
  println!("🔍 Dry-run mode (no changes applied)");
}

/// Print the success summary and archive listing
pub fn print_report(report: &PackReport) {
  println!();
  println!("✓ Successfully created: {}", display_name(&report.archive_path));
  println!("   File size: {}", format_kb(report.size_bytes));
  println!("   Full path: {}", report.archive_path.display());
  println!("   SHA-256:   {}", report.sha256);
  println!("   Files:     {} added, {} skipped", report.added, report.skipped);
  if !report.version_sync.is_complete() {
    println!("⚠️  Version {} was not written to every version file", report.version_sync.version);
  }
  println!();
  println!("Plugin ZIP package created successfully!");
  println!("Ready for distribution or upload to QGIS Plugin Repository");

  println!();
  println!("Contents of {}:", display_name(&report.archive_path));
  println!("{}", "-".repeat(50));
  for (name, size) in &report.contents {
    println!("{:<40} {:>11}", name, format_kb(*size));
  }
  println!("{}", "-".repeat(50));
}
