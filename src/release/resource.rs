//! Version resource (version.py) reading and rendering
//!
//! The resource is always re-emitted in full from a template; reading only
//! looks at the `NAME = value` assignment lines.

use crate::core::error::ParseError;
use crate::release::version::{Prerelease, Version};
use regex::Regex;
use std::sync::LazyLock;

const TEMPLATE: &str = include_str!("version_resource.py.in");

static NUMBER_FIELD: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^(MAJOR|MINOR|PATCH)[ \t]*=[ \t]*([^\s#]*)").expect("static regex"));

static STRING_FIELD: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?m)^(PRERELEASE|BUILD)[ \t]*=[ \t]*["']([^"'\n]*)["']"#).expect("static regex"));

/// Parse the version assignments out of version resource text.
///
/// MAJOR, MINOR and PATCH are required and must be non-negative integers.
/// PRERELEASE and BUILD default to empty. The first assignment of a name wins.
pub fn parse(content: &str) -> Result<Version, ParseError> {
  let mut major = None;
  let mut minor = None;
  let mut patch = None;

  for caps in NUMBER_FIELD.captures_iter(content) {
    let slot = match &caps[1] {
      "MAJOR" => &mut major,
      "MINOR" => &mut minor,
      _ => &mut patch,
    };
    if slot.is_none() {
      *slot = Some(caps[2].to_string());
    }
  }

  let mut prerelease = None;
  let mut build = None;
  for caps in STRING_FIELD.captures_iter(content) {
    let slot = if &caps[1] == "PRERELEASE" {
      &mut prerelease
    } else {
      &mut build
    };
    if slot.is_none() {
      *slot = Some(caps[2].to_string());
    }
  }

  let numbers = Version::new(number("MAJOR", major)?, number("MINOR", minor)?, number("PATCH", patch)?);
  Ok(Version {
    prerelease: Prerelease::parse_tag(prerelease.as_deref().unwrap_or(""))?,
    build: build.unwrap_or_default(),
    ..numbers
  })
}

fn number(field: &'static str, raw: Option<String>) -> Result<u64, ParseError> {
  let raw = raw.ok_or(ParseError::MissingField { field })?;
  raw.parse::<u64>().map_err(|_| ParseError::InvalidField { field, value: raw })
}

/// Render the complete version resource for `version`.
pub fn render(version: &Version) -> String {
  TEMPLATE
    .replace("@MAJOR@", &version.major.to_string())
    .replace("@MINOR@", &version.minor.to_string())
    .replace("@PATCH@", &version.patch.to_string())
    .replace("@PRERELEASE@", version.prerelease.map(|p| p.as_str()).unwrap_or(""))
    .replace("@BUILD@", &version.build)
}
