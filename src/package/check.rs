//! Individual check outcomes collected by the package validator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
  /// Informational message (not an issue)
  Info,
  /// Warning (non-blocking, but should be addressed)
  Warning,
  /// Error (blocking, must be fixed)
  Error,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Info => write!(f, "INFO"),
      Severity::Warning => write!(f, "WARN"),
      Severity::Error => write!(f, "ERROR"),
    }
  }
}

/// Result of one check line (one file, one metadata key, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
  /// Group the check belongs to (required-files, metadata, ...)
  pub check_name: String,
  /// What was checked, e.g. `LICENSE` or `email`
  pub subject: String,
  /// Whether the check passed
  pub passed: bool,
  /// Severity level (if failed)
  pub severity: Severity,
  /// Human-readable message
  pub message: String,
}

impl CheckResult {
  /// Create a passing check result
  pub fn pass(check_name: impl Into<String>, subject: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      subject: subject.into(),
      passed: true,
      severity: Severity::Info,
      message: message.into(),
    }
  }

  /// Create a failing check result with error severity
  pub fn error(check_name: impl Into<String>, subject: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      subject: subject.into(),
      passed: false,
      severity: Severity::Error,
      message: message.into(),
    }
  }

  /// Create a failing check result with warning severity
  pub fn warning(check_name: impl Into<String>, subject: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      subject: subject.into(),
      passed: false,
      severity: Severity::Warning,
      message: message.into(),
    }
  }

  /// Status icon used in console output
  pub fn icon(&self) -> &'static str {
    match (self.passed, self.severity) {
      (true, _) => "✅",
      (false, Severity::Warning) => "⚠️ ",
      (false, _) => "❌",
    }
  }
}
