//! `translations.py`, the pure-Python fallback the plugin imports when no
//! `.qm` file loads

use super::catalog::{CATALOG, DEFAULT_LOCALE};
use crate::core::error::ReleaseResult;
use crate::utils::atomic_write;
use std::path::{Path, PathBuf};

/// File name of the fallback module
pub const MODULE_NAME: &str = "translations.py";

const HEADER: &str = "# -*- coding: utf-8 -*-\n\"\"\"\nPython-based translations for QGIS Legend View plugin\nFallback when .qm files are not available\n\"\"\"\n";

/// Python string literal, single-quoted like `repr()`
fn py_str(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('\'');
  for c in value.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c => out.push(c),
    }
  }
  out.push('\'');
  out
}

/// `{'ja': {'LegendView': {...}, ...}, ...}` from the catalogue
fn translations_literal() -> String {
  let locales: Vec<String> = CATALOG
    .iter()
    .map(|(locale, contexts)| {
      let contexts: Vec<String> = contexts
        .iter()
        .map(|(context, messages)| {
          let messages: Vec<String> = messages
            .iter()
            .map(|(source, target)| format!("{}: {}", py_str(source), py_str(target)))
            .collect();
          format!("{}: {{{}}}", py_str(context), messages.join(", "))
        })
        .collect();
      format!("{}: {{{}}}", py_str(locale), contexts.join(", "))
    })
    .collect();
  format!("{{{}}}", locales.join(", "))
}

/// Full module source
pub fn render_module() -> String {
  format!(
    "{header}
TRANSLATIONS = {table}

def translate(context, message, locale={default}):
    \"\"\"Get translation for a message\"\"\"
    if locale in TRANSLATIONS and context in TRANSLATIONS[locale]:
        return TRANSLATIONS[locale][context].get(message, message)
    return message

def get_available_locales():
    \"\"\"Return list of available locales\"\"\"
    return list(TRANSLATIONS.keys())
",
    header = HEADER,
    table = translations_literal(),
    default = py_str(DEFAULT_LOCALE),
  )
}

/// Write the module into `out_dir`, which must already exist.
pub fn write_module(out_dir: &Path) -> ReleaseResult<PathBuf> {
  let path = out_dir.join(MODULE_NAME);
  atomic_write(&path, render_module().as_bytes())?;
  tracing::debug!(path = %path.display(), "wrote python translation module");
  Ok(path)
}
