//! Placeholder compiled-translation (.qm) files
//!
//! These are not real Qt translation catalogues; they carry the Qt magic
//! number so the plugin's translator setup finds a file per locale, plus a
//! length-prefixed UTF-8 note. Real catalogues come from `lrelease`.

use crate::core::error::{ReleaseError, ReleaseResult};
use crate::utils::atomic_write;
use std::fs;
use std::path::{Path, PathBuf};

/// Qt .qm magic number
pub const QM_MAGIC: [u8; 4] = [0x3c, 0xb8, 0x64, 0x18];
const FORMAT_VERSION: u32 = 1;
const CONTEXT_COUNT: u32 = 1;

/// `LegendView_{locale}.qm`
pub fn file_name(locale: &str) -> String {
  format!("LegendView_{}.qm", locale)
}

/// Bytes of the placeholder file for `locale`
pub fn encode_placeholder(locale: &str) -> ReleaseResult<Vec<u8>> {
  let note = format!(
    "# Binary QM file for {}\n# This is a placeholder binary translation file\n# Normally created by Qt's lrelease tool\n",
    locale
  );
  let payload = note.as_bytes();
  let len = u32::try_from(payload.len()).map_err(|_| ReleaseError::message("translation payload too large"))?;

  let mut bytes = Vec::with_capacity(16 + payload.len());
  bytes.extend_from_slice(&QM_MAGIC);
  bytes.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
  bytes.extend_from_slice(&CONTEXT_COUNT.to_be_bytes());
  bytes.extend_from_slice(&len.to_be_bytes());
  bytes.extend_from_slice(payload);
  Ok(bytes)
}

/// Write one placeholder per locale into `out_dir`, creating it if needed.
pub fn write_placeholders(out_dir: &Path, locales: &[&str]) -> ReleaseResult<Vec<PathBuf>> {
  fs::create_dir_all(out_dir).map_err(|e| ReleaseError::write(out_dir, e))?;

  let mut written = Vec::with_capacity(locales.len());
  for locale in locales {
    let path = out_dir.join(file_name(locale));
    atomic_write(&path, &encode_placeholder(locale)?)?;
    tracing::debug!(path = %path.display(), "wrote placeholder translation");
    written.push(path);
  }
  Ok(written)
}
