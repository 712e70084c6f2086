//! Utility functions for path handling and file replacement

use crate::core::error::{ReleaseError, ReleaseResult};
use std::io::Write;
use std::path::Path;

/// Convert a relative path to archive member format (always forward slashes)
///
/// Zip member names use `/` as separator on every platform.
pub fn path_to_archive_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Replace `path` with `contents` by writing a sibling temp file and renaming it.
///
/// Readers see either the old or the new file, never a truncated one.
pub fn atomic_write(path: &Path, contents: &[u8]) -> ReleaseResult<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| ReleaseError::write(path, e))?;
  // Keep the mode of the file being replaced (temp files are created 0600)
  if let Ok(existing) = std::fs::metadata(path) {
    tmp
      .as_file()
      .set_permissions(existing.permissions())
      .map_err(|e| ReleaseError::write(path, e))?;
  }
  tmp.write_all(contents).map_err(|e| ReleaseError::write(path, e))?;
  tmp.as_file().sync_all().map_err(|e| ReleaseError::write(path, e))?;
  tmp.persist(path).map_err(|e| ReleaseError::write(path, e.error))?;
  Ok(())
}

/// Human-readable size in KB with two decimals
pub fn format_kb(bytes: u64) -> String {
  format!("{:.2} KB", bytes as f64 / 1024.0)
}
