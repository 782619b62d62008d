//! Error types for ppa-gate with contextual messages and exit codes
//!
//! Every failure is terminal for the process: parsers and the validator return
//! these values, and only `main` turns them into an exit status.

use crate::release::Rejection;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for ppa-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad channel, bad file name, missing artifact, config)
  User = 1,
  /// System error (I/O, publish step failed)
  System = 2,
  /// Validation rejection (release mismatch, pre-release to stable)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for ppa-gate
#[derive(Debug)]
pub enum GateError {
  /// Malformed command-line input
  Input(InputError),

  /// The validator refused the channel/artifact pair
  Rejected(Rejection),

  /// The publish step itself failed
  Publish(PublishError),

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

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GateError::Message { message, context, help } => GateError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      GateError::Io(e) => GateError::Message {
        message: format!("I/O error: {}", e),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Input(_) => ExitCode::User,
      GateError::Rejected(_) => ExitCode::Validation,
      GateError::Publish(_) => ExitCode::System,
      GateError::Config(_) => ExitCode::User,
      GateError::Io(_) => ExitCode::System,
      GateError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Input(e) => e.help_message(),
      GateError::Rejected(r) => r.help_message(),
      GateError::Publish(e) => e.help_message(),
      GateError::Config(e) => e.help_message(),
      GateError::Message { help, .. } => help.clone(),
      GateError::Io(_) => None,
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Input(e) => write!(f, "{}", e),
      GateError::Rejected(r) => write!(f, "{}", r),
      GateError::Publish(e) => write!(f, "{}", e),
      GateError::Config(e) => write!(f, "{}", e),
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Io(e) => Some(e),
      GateError::Input(InputError::ArtifactNotFound { source, .. }) => Some(source),
      GateError::Publish(PublishError::LaunchFailed { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<InputError> for GateError {
  fn from(err: InputError) -> Self {
    GateError::Input(err)
  }
}

impl From<Rejection> for GateError {
  fn from(rejection: Rejection) -> Self {
    GateError::Rejected(rejection)
  }
}

impl From<PublishError> for GateError {
  fn from(err: PublishError) -> Self {
    GateError::Publish(err)
  }
}

impl From<ConfigError> for GateError {
  fn from(err: ConfigError) -> Self {
    GateError::Config(err)
  }
}

impl From<toml_edit::de::Error> for GateError {
  fn from(err: toml_edit::de::Error) -> Self {
    GateError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

/// Malformed command-line input
#[derive(Debug)]
pub enum InputError {
  /// Channel string does not match `<scheme>:<namespace>/<release>[-<pocket>]`
  InvalidChannelFormat { channel: String, reason: String },

  /// Artifact file name does not match `<product>_<version>-<rest>_source.<ext>`
  InvalidArtifactFileName { file_name: String, reason: String },

  /// Artifact path cannot be opened
  ArtifactNotFound { path: PathBuf, source: io::Error },
}

impl InputError {
  fn help_message(&self) -> Option<String> {
    match self {
      InputError::InvalidChannelFormat { .. } => Some(
        "Channels look like `<scheme>:<namespace>/<major>.<minor>[-<pocket>]`; schemes come from [channel] schemes."
          .to_string(),
      ),
      InputError::InvalidArtifactFileName { .. } => Some(
        "Pass a file named `<product>_<version>-<rest>_source.<ext>`, with <product> as set in [artifact] product."
          .to_string(),
      ),
      InputError::ArtifactNotFound { .. } => None,
    }
  }
}

impl fmt::Display for InputError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InputError::InvalidChannelFormat { channel, reason } => {
        write!(f, "Invalid channel '{}': {}", channel, reason)
      }
      InputError::InvalidArtifactFileName { file_name, reason } => {
        write!(f, "Invalid artifact file name '{}': {}", file_name, reason)
      }
      InputError::ArtifactNotFound { path, source } => {
        write!(f, "Cannot open artifact {}: {}", path.display(), source)
      }
    }
  }
}

/// Failures of the publish step
#[derive(Debug)]
pub enum PublishError {
  /// The publish command ran and exited unsuccessfully
  PublishFailure {
    command: String,
    status: Option<i32>,
    stderr: String,
  },

  /// The publish command could not be started
  LaunchFailed { command: String, source: io::Error },
}

impl PublishError {
  fn help_message(&self) -> Option<String> {
    match self {
      PublishError::LaunchFailed { command, .. } => Some(format!(
        "Make sure `{}` is installed and on PATH, or set [publish] command in ppa-gate.toml.",
        command
      )),
      PublishError::PublishFailure { .. } => None,
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::PublishFailure { command, status, stderr } => {
        match status {
          Some(code) => write!(f, "{} exited with status {}", command, code)?,
          None => write!(f, "{} was terminated by a signal", command)?,
        }
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
      PublishError::LaunchFailed { command, source } => {
        write!(f, "Failed to run {}: {}", command, source)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// An explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// A field holds a value the gate cannot work with
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Drop --config to fall back to ppa-gate.toml in the current directory, or the built-in defaults.".to_string())
      }
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::Invalid { field, reason } => {
        write!(f, "Invalid config value for {}: {}", field, reason)
      }
    }
  }
}

/// Result type alias for ppa-gate
pub type GateResult<T> = Result<T, GateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GateResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn context(self, ctx: impl Into<String>) -> GateResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
