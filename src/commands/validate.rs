use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::package::validator::validate_archive;
use std::path::PathBuf;

const USAGE: &str = "Usage: legend-release validate <plugin_zip_file>";

/// Run the validate command
///
/// Without an archive path only the usage line is printed. A failed
/// validation exits with status 1 after the report is shown.
pub fn run_validate(ctx: &ProjectContext, archive: Option<PathBuf>, json: bool) -> ReleaseResult<()> {
  let Some(archive) = archive else {
    println!("{}", USAGE);
    return Ok(());
  };

  // Relative paths are taken from the project root, like every other input
  let archive = if archive.is_absolute() {
    archive
  } else {
    ctx.project_root().join(archive)
  };

  let report = validate_archive(&archive, &ctx.config.validate);
  tracing::debug!(
    errors = report.errors.len(),
    warnings = report.warnings.len(),
    "validation finished"
  );

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    report.print();
  }

  if !report.passed() {
    std::process::exit(1);
  }

  Ok(())
}
