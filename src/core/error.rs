//! Error types for appcast-gen with contextual messages and exit codes
//!
//! Every fatal condition in a run maps to one `AppcastError`. Recoverable
//! conditions (unreadable release notes and the like) never reach this type;
//! they are defaulted where they happen.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for appcast-gen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (missing artifact, bad config, invalid args)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (malformed feed document)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for appcast-gen
#[derive(Debug)]
pub enum AppcastError {
  /// Packaged artifact problems
  Artifact(ArtifactError),

  /// Feed document problems
  Document(DocumentError),

  /// Product profile problems
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

impl AppcastError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    AppcastError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      AppcastError::Message { message, context, help } => AppcastError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      AppcastError::Io(err) => AppcastError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      AppcastError::Artifact(_) => ExitCode::User,
      AppcastError::Document(_) => ExitCode::Validation,
      AppcastError::Config(_) => ExitCode::User,
      AppcastError::Io(_) => ExitCode::System,
      AppcastError::Message { .. } => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      AppcastError::Artifact(e) => e.help_message(),
      AppcastError::Document(e) => e.help_message(),
      AppcastError::Config(e) => e.help_message(),
      AppcastError::Message { help, .. } => help.clone(),
      AppcastError::Io(_) => None,
    }
  }
}

impl fmt::Display for AppcastError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AppcastError::Artifact(e) => write!(f, "{}", e),
      AppcastError::Document(e) => write!(f, "{}", e),
      AppcastError::Config(e) => write!(f, "{}", e),
      AppcastError::Io(e) => write!(f, "I/O error: {}", e),
      AppcastError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for AppcastError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      AppcastError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for AppcastError {
  fn from(err: io::Error) -> Self {
    AppcastError::Io(err)
  }
}

impl From<ArtifactError> for AppcastError {
  fn from(err: ArtifactError) -> Self {
    AppcastError::Artifact(err)
  }
}

impl From<DocumentError> for AppcastError {
  fn from(err: DocumentError) -> Self {
    AppcastError::Document(err)
  }
}

impl From<ConfigError> for AppcastError {
  fn from(err: ConfigError) -> Self {
    AppcastError::Config(err)
  }
}

impl From<serde_json::Error> for AppcastError {
  fn from(err: serde_json::Error) -> Self {
    AppcastError::message(format!("JSON error: {}", err))
  }
}

impl From<tempfile::PersistError> for AppcastError {
  fn from(err: tempfile::PersistError) -> Self {
    AppcastError::Io(err.error)
  }
}

/// Packaged artifact errors
#[derive(Debug)]
pub enum ArtifactError {
  /// The zip for the requested version is not in the dist directory
  NotFound { path: PathBuf },
}

impl ArtifactError {
  fn help_message(&self) -> Option<String> {
    match self {
      ArtifactError::NotFound { .. } => {
        Some("Package the release first, or check --dist-dir and --version.".to_string())
      }
    }
  }
}

impl fmt::Display for ArtifactError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArtifactError::NotFound { path } => write!(f, "Zip file not found at {}", path.display()),
    }
  }
}

/// Feed document errors
#[derive(Debug)]
pub enum DocumentError {
  /// The document has no `</channel>` to insert before
  MissingChannelMarker { path: Option<PathBuf> },
}

impl DocumentError {
  fn help_message(&self) -> Option<String> {
    match self {
      DocumentError::MissingChannelMarker { path: Some(path) } => Some(format!(
        "Repair {} by hand, or move it aside so a fresh feed is created.",
        path.display()
      )),
      DocumentError::MissingChannelMarker { path: None } => None,
    }
  }

  /// Attach the document path once it is known
  pub fn at(self, doc: impl Into<PathBuf>) -> Self {
    match self {
      DocumentError::MissingChannelMarker { .. } => DocumentError::MissingChannelMarker {
        path: Some(doc.into()),
      },
    }
  }
}

impl fmt::Display for DocumentError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DocumentError::MissingChannelMarker { .. } => write!(f, "Malformed appcast: missing </channel> marker"),
    }
  }
}

/// Product profile errors
#[derive(Debug)]
pub enum ConfigError {
  /// Profile file could not be read
  Unreadable { path: PathBuf, reason: String },

  /// Profile file is not valid TOML for a profile
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Unreadable { .. } => Some("Check the path passed to --config.".to_string()),
      ConfigError::Invalid { .. } => Some(
        "Allowed keys: product_name, artifact_stem, feed_title, feed_description, os, content_type, fallback_notes"
          .to_string(),
      ),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Unreadable { path, reason } => {
        write!(f, "Failed to read product profile {}: {}", path.display(), reason)
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid product profile {}:\n{}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for appcast-gen
pub type AppcastResult<T> = Result<T, AppcastError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> AppcastResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<AppcastError>,
{
  fn with_context<F>(self, f: F) -> AppcastResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error to stderr with help text
pub fn print_error(error: &AppcastError) {
  eprintln!("{}", error);

  if let Some(help) = error.help_message() {
    eprintln!("help: {}", help);
  }
}
