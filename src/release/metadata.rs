//! Plugin metadata (metadata.txt) parsing and in-place editing
//!
//! The file follows the INI dialect QGIS reads with Python's `configparser`:
//! `key=value` or `key: value`, case-insensitive keys, `#`/`;` comment lines
//! and indented continuation lines for multi-line values such as `changelog`.
//!
//! Edits never re-serialize the document. Only the `version=` line is
//! replaced and the changelog entry is spliced in after `changelog=`, so
//! comments and layout survive untouched.

use crate::core::error::ParseError;
use ini::{Ini, ParseOption};
use regex::Regex;
use std::sync::LazyLock;

/// Section holding the repository-required keys
pub const GENERAL: &str = "general";

/// Keys the plugin repository requires in `[general]`
pub const REQUIRED_GENERAL_KEYS: [&str; 6] = ["name", "version", "qgisMinimumVersion", "description", "author", "email"];

static VERSION_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^version[ \t]*[=:][^\r\n]*").expect("static regex"));

static CHANGELOG_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^changelog[ \t]*[=:][^\r\n]*(\r?\n)?").expect("static regex"));

/// Text after a section header's closing bracket (`[general] ; note`)
static HEADER_TRAILER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^(\[[^\r\n]*\])[^\]\r\n]*$").expect("static regex"));

/// Parsed metadata document
#[derive(Debug, Clone)]
pub struct Metadata {
  ini: Ini,
}

impl Metadata {
  /// Parse metadata text.
  ///
  /// Values are taken verbatim (no quote or escape processing) and indented
  /// lines continue the previous value. Keys outside a section, duplicate
  /// sections and duplicate keys are rejected.
  pub fn parse(content: &str) -> Result<Self, ParseError> {
    let normalized = HEADER_TRAILER.replace_all(content, "${1}");
    let options = ParseOption {
      enabled_quote: false,
      enabled_escape: false,
      enabled_indented_mutiline_value: true,
      enabled_preserve_key_leading_whitespace: false,
    };
    let ini = Ini::load_from_str_opt(&normalized, options).map_err(|e| ParseError::Metadata {
      line: e.line,
      reason: e.msg.to_string(),
    })?;

    let mut seen_sections: Vec<String> = Vec::new();
    for (section, properties) in ini.iter() {
      let Some(name) = section else {
        if let Some((key, _)) = properties.iter().next() {
          return Err(ParseError::Metadata {
            line: line_of(content, key, 0),
            reason: "file contains no section headers".to_string(),
          });
        }
        continue;
      };

      let folded = name.to_lowercase();
      if seen_sections.contains(&folded) {
        return Err(ParseError::Metadata {
          line: line_of(content, &format!("[{}", name), 1),
          reason: format!("section '{}' already exists", name),
        });
      }
      seen_sections.push(folded);

      let mut seen_keys: Vec<String> = Vec::new();
      for (key, _) in properties.iter() {
        if key.contains(['\n', '\r']) {
          let first = key.lines().next().unwrap_or_default();
          return Err(ParseError::Metadata {
            line: line_of(content, first, 0),
            reason: format!("expected 'key=value', found '{}'", first.trim()),
          });
        }
        let folded = key.to_lowercase();
        if seen_keys.contains(&folded) {
          return Err(ParseError::Metadata {
            line: line_of(content, key, 1),
            reason: format!("option '{}' in section '{}' already exists", folded, name),
          });
        }
        seen_keys.push(folded);
      }
    }

    Ok(Self { ini })
  }

  /// Look up a value; keys are case-insensitive.
  pub fn get(&self, section: &str, key: &str) -> Option<&str> {
    self.ini.get_from(Some(section), key)
  }

  /// Look up a required value
  pub fn require(&self, section: &str, key: &str) -> Result<&str, ParseError> {
    self.get(section, key).ok_or_else(|| ParseError::MissingKey {
      section: section.to_string(),
      key: key.to_string(),
    })
  }

  /// `[general] name` and `version`
  pub fn name_and_version(&self) -> Result<(String, String), ParseError> {
    let name = self.require(GENERAL, "name")?.to_string();
    let version = self.require(GENERAL, "version")?.to_string();
    Ok((name, version))
  }
}

/// 1-based line of the `nth` unindented line starting with `prefix`
/// (case-insensitive), or 0 when there is none.
fn line_of(content: &str, prefix: &str, nth: usize) -> usize {
  let prefix = prefix.trim().to_lowercase();
  content
    .lines()
    .enumerate()
    .filter(|(_, line)| !line.starts_with([' ', '\t']) && line.to_lowercase().starts_with(&prefix))
    .nth(nth)
    .map(|(idx, _)| idx + 1)
    .unwrap_or(0)
}

/// Replace every top-level `version=` line with `version={version}`.
///
/// Indented lines are continuation text of another value and are left alone.
/// Fails when no such line exists.
pub fn set_version(content: &str, version: &str) -> Result<String, ParseError> {
  if !VERSION_LINE.is_match(content) {
    return Err(ParseError::MissingKey {
      section: GENERAL.to_string(),
      key: "version".to_string(),
    });
  }
  let replacement = format!("version={}", version);
  Ok(VERSION_LINE.replace_all(content, regex::NoExpand(&replacement)).into_owned())
}

/// Insert a placeholder changelog entry directly below the `changelog=` line.
///
/// Returns `None` when the file has no top-level changelog entry.
pub fn insert_changelog_entry(content: &str, version: &str, placeholder: &str) -> Option<String> {
  let found = CHANGELOG_LINE.find(content)?;
  let line = found.as_str();
  let newline = if line.ends_with("\r\n") { "\r\n" } else { "\n" };

  let mut updated = String::with_capacity(content.len() + 64);
  updated.push_str(&content[..found.end()]);
  if !line.ends_with('\n') {
    updated.push_str(newline);
  }
  updated.push_str(&format!("    Version {}:{}", version, newline));
  updated.push_str(&format!("    {}{}", placeholder, newline));
  updated.push_str(&content[found.end()..]);
  Some(updated)
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = "\
# Plugin metadata
[general]
name=QGIS-legendView
qgisMinimumVersion=3.0
qgisMaximumVersion=3.99
description=Shows layer symbology in a dock
version=2.0.1
author=Example Author
email=author@example.com

changelog=
    Version 2.0.1:
    - Qt6 support

    Version 2.0.0:
    - First release
tags=legend, symbology
";

  #[test]
  fn test_parse_general_section() {
    let meta = Metadata::parse(SAMPLE).unwrap();
    assert_eq!(meta.get(GENERAL, "name"), Some("QGIS-legendView"));
    assert_eq!(meta.get(GENERAL, "version"), Some("2.0.1"));
    assert_eq!(meta.get(GENERAL, "tags"), Some("legend, symbology"));
    for key in REQUIRED_GENERAL_KEYS {
      assert!(meta.get(GENERAL, key).is_some(), "{} missing", key);
    }
  }

  #[test]
  fn test_keys_are_case_insensitive() {
    let meta = Metadata::parse(SAMPLE).unwrap();
    assert_eq!(meta.get(GENERAL, "qgisMinimumVersion"), Some("3.0"));
    assert_eq!(meta.get(GENERAL, "QGISMINIMUMVERSION"), Some("3.0"));
  }

  #[test]
  fn test_multiline_changelog() {
    let meta = Metadata::parse(SAMPLE).unwrap();
    assert_eq!(
      meta.get(GENERAL, "changelog"),
      Some("Version 2.0.1:\n- Qt6 support\n\nVersion 2.0.0:\n- First release")
    );
  }

  #[test]
  fn test_colon_delimiter() {
    let meta = Metadata::parse("[general]\nname: Legend\nurl=http://x\n").unwrap();
    assert_eq!(meta.get(GENERAL, "name"), Some("Legend"));
    assert_eq!(meta.get(GENERAL, "url"), Some("http://x"));
  }

  #[test]
  fn test_values_are_verbatim() {
    let meta = Metadata::parse("[general]\ndescription=\"Legend\" dock\nicon=icons\\legend.png\n").unwrap();
    assert_eq!(meta.get(GENERAL, "description"), Some("\"Legend\" dock"));
    assert_eq!(meta.get(GENERAL, "icon"), Some("icons\\legend.png"));
  }

  #[test]
  fn test_section_header_with_trailing_comment() {
    let meta = Metadata::parse("[general] ; plugin repository fields\nname=x\n").unwrap();
    assert_eq!(meta.get(GENERAL, "name"), Some("x"));
  }

  #[test]
  fn test_key_before_section_is_error() {
    let err = Metadata::parse("name=x\n[general]\n").unwrap_err();
    assert!(matches!(err, ParseError::Metadata { line: 1, .. }));
  }

  #[test]
  fn test_duplicate_key_is_error() {
    let err = Metadata::parse("[general]\nname=a\nName=b\n").unwrap_err();
    assert!(matches!(err, ParseError::Metadata { line: 3, .. }));
  }

  #[test]
  fn test_duplicate_section_is_error() {
    assert!(Metadata::parse("[general]\n[general]\n").is_err());
  }

  #[test]
  fn test_line_without_delimiter_is_error() {
    assert!(Metadata::parse("[general]\njust text\n").is_err());
    let err = Metadata::parse("[general]\njust text\nname=x\n").unwrap_err();
    assert!(matches!(err, ParseError::Metadata { line: 2, .. }));
  }

  #[test]
  fn test_name_and_version() {
    let meta = Metadata::parse(SAMPLE).unwrap();
    assert_eq!(
      meta.name_and_version().unwrap(),
      ("QGIS-legendView".to_string(), "2.0.1".to_string())
    );
    let empty = Metadata::parse("[general]\n").unwrap();
    assert!(empty.name_and_version().is_err());
  }

  #[test]
  fn test_set_version_only_touches_version_line() {
    let updated = set_version(SAMPLE, "2.0.2").unwrap();
    assert!(updated.contains("\nversion=2.0.2\n"));
    assert!(updated.contains("qgisMinimumVersion=3.0\n"));
    assert!(updated.contains("qgisMaximumVersion=3.99\n"));
    assert!(!updated.contains("version=2.0.1"));
    assert_eq!(updated.lines().count(), SAMPLE.lines().count());
  }

  #[test]
  fn test_set_version_without_line_fails() {
    assert!(set_version("[general]\nname=x\n", "1.0.0").is_err());
  }

  #[test]
  fn test_insert_changelog_entry() {
    let updated = insert_changelog_entry(SAMPLE, "2.0.2", "- (describe changes here)").unwrap();
    assert!(updated.contains("changelog=\n    Version 2.0.2:\n    - (describe changes here)\n    Version 2.0.1:\n"));

    let meta = Metadata::parse(&updated).unwrap();
    assert!(meta.get(GENERAL, "changelog").unwrap().starts_with("Version 2.0.2:"));
  }

  #[test]
  fn test_insert_changelog_at_end_of_file() {
    let updated = insert_changelog_entry("[general]\nchangelog=", "1.0.1", "- x").unwrap();
    assert_eq!(updated, "[general]\nchangelog=\n    Version 1.0.1:\n    - x\n");
  }

  #[test]
  fn test_insert_changelog_without_entry() {
    assert!(insert_changelog_entry("[general]\nname=x\n", "1.0.1", "- x").is_none());
  }
}
