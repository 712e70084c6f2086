//! Error types for legend-release with contextual messages and exit codes
//!
//! Errors are grouped by the category of failure so that callers can decide
//! what is fatal: a missing manifest file only skips an entry, a malformed
//! version resource aborts the command, a broken archive fails validation,
//! and a failed write is reported without rolling anything back.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for legend-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Any failed command
  Failure = 1,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for legend-release
#[derive(Debug)]
pub enum ReleaseError {
  /// A file the command depends on does not exist
  MissingFile { path: PathBuf },

  /// Version resource, version string or metadata could not be parsed
  Parse(ParseError),

  /// Archive could not be opened, read or produced
  Archive(ArchiveError),

  /// A write to disk failed (nothing written earlier is rolled back)
  Write { path: PathBuf, source: io::Error },

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Wrap an I/O failure that happened while writing `path`
  pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
    ReleaseError::Write {
      path: path.into(),
      source,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(e) => ReleaseError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", e)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    ExitCode::Failure
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::MissingFile { path } => Some(format!(
        "Run the command from the plugin directory or pass --root. Expected: {}",
        path.display()
      )),
      ReleaseError::Parse(e) => e.help_message(),
      ReleaseError::Archive(e) => e.help_message(),
      ReleaseError::Write { .. } => {
        Some("Check file permissions and free disk space; earlier writes in this run were kept.".to_string())
      }
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::MissingFile { path } => write!(f, "File not found: {}", path.display()),
      ReleaseError::Parse(e) => write!(f, "{}", e),
      ReleaseError::Archive(e) => write!(f, "{}", e),
      ReleaseError::Write { path, source } => write!(f, "Failed to write {}: {}", path.display(), source),
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::Write { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<ParseError> for ReleaseError {
  fn from(err: ParseError) -> Self {
    ReleaseError::Parse(err)
  }
}

impl From<ArchiveError> for ReleaseError {
  fn from(err: ArchiveError) -> Self {
    ReleaseError::Archive(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<zip::result::ZipError> for ReleaseError {
  fn from(err: zip::result::ZipError) -> Self {
    ReleaseError::Archive(ArchiveError::Zip(err.to_string()))
  }
}

impl From<glob::PatternError> for ReleaseError {
  fn from(err: glob::PatternError) -> Self {
    ReleaseError::message(format!("Invalid archive pattern: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

/// Parse failures for the version resource, version strings and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  /// A required `NAME = value` assignment is absent from the version resource
  MissingField { field: &'static str },

  /// A version resource field is present but not a valid value
  InvalidField { field: &'static str, value: String },

  /// A version string is not `major.minor.patch[-tag][+build]`
  InvalidVersion { input: String },

  /// Metadata text violates the INI dialect
  Metadata { line: usize, reason: String },

  /// Metadata parsed but lacks a key
  MissingKey { section: String, key: String },
}

impl ParseError {
  fn help_message(&self) -> Option<String> {
    match self {
      ParseError::MissingField { field } => Some(format!(
        "The version resource must contain a line like `{} = 0`.",
        field
      )),
      ParseError::InvalidField { field, .. } if *field == "PRERELEASE" => {
        Some("Prerelease must be one of \"\", \"alpha\", \"beta\" or \"rc\".".to_string())
      }
      ParseError::MissingKey { section, key } => Some(format!("Add `{}=...` under [{}] in metadata.txt.", key, section)),
      _ => None,
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::MissingField { field } => write!(f, "Version resource is missing {}", field),
      ParseError::InvalidField { field, value } => {
        write!(f, "Version resource has invalid {}: '{}'", field, value)
      }
      ParseError::InvalidVersion { input } => write!(f, "Invalid version string: '{}'", input),
      ParseError::Metadata { line, reason } => write!(f, "Metadata parse error at line {}: {}", line, reason),
      ParseError::MissingKey { section, key } => write!(f, "Missing metadata: [{}] {}", section, key),
    }
  }
}

impl std::error::Error for ParseError {}

/// Archive-level (structural) failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveError {
  /// The archive path does not exist
  NotFound { path: PathBuf },

  /// The file is not a readable zip container
  Zip(String),

  /// No top-level plugin folder could be derived from the member list
  NoPluginFolder,

  /// The packaging run finished but no archive is on disk
  NotProduced { path: PathBuf },
}

impl ArchiveError {
  fn help_message(&self) -> Option<String> {
    match self {
      ArchiveError::NotFound { .. } => Some("Build the package first with `legend-release pack`.".to_string()),
      ArchiveError::NoPluginFolder => {
        Some("Every archive member must live under a single `<plugin-name>/` folder.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ArchiveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArchiveError::NotFound { path } => write!(f, "ZIP file not found: {}", path.display()),
      ArchiveError::Zip(_) => write!(f, "Invalid ZIP file format"),
      ArchiveError::NoPluginFolder => write!(f, "Cannot determine plugin name from ZIP structure"),
      ArchiveError::NotProduced { path } => write!(f, "ZIP file was not created: {}", path.display()),
    }
  }
}

impl std::error::Error for ArchiveError {}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit --config path does not exist
  NotFound { path: PathBuf },

  /// A field has a value that cannot be used
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to use legend-release.toml from the project directory, or the built-in defaults.".to_string())
      }
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::InvalidField { field, reason } => write!(f, "Invalid config value for {}: {}", field, reason),
    }
  }
}

/// Result type alias for legend-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
