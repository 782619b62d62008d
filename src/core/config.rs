use crate::core::error::{ConfigError, GateResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for ppa-gate
/// Searched in order: ppa-gate.toml, .ppa-gate.toml, .config/ppa-gate.toml
///
/// Every section is optional; a missing file means built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GateConfig {
  #[serde(default)]
  pub artifact: ArtifactConfig,
  #[serde(default)]
  pub channel: ChannelConfig,
  #[serde(default)]
  pub publish: PublishConfig,
}

/// How artifact file names are recognised
///
/// # Example
///
/// ```toml
/// [artifact]
/// product = "maas"
/// marker = "~"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
  /// Source package name, the `<product>` in `<product>_<version>-<rest>_source.<ext>`
  #[serde(default = "default_product")]
  pub product: String,

  /// Character that marks a build as preceding its nominal version
  #[serde(default = "default_marker")]
  pub marker: char,
}

fn default_product() -> String {
  "maas".to_string()
}

fn default_marker() -> char {
  '~'
}

impl Default for ArtifactConfig {
  fn default() -> Self {
    Self {
      product: default_product(),
      marker: default_marker(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
  /// Accepted `<scheme>` prefixes (default: ["ppa"])
  #[serde(default = "default_schemes")]
  pub schemes: Vec<String>,
}

fn default_schemes() -> Vec<String> {
  vec!["ppa".to_string()]
}

impl Default for ChannelConfig {
  fn default() -> Self {
    Self {
      schemes: default_schemes(),
    }
  }
}

/// The upload command run after a successful validation.
/// Invoked as `<command> <args...> <channel> <artifact>`.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
  #[serde(default = "default_command")]
  pub command: String,
  #[serde(default)]
  pub args: Vec<String>,
}

fn default_command() -> String {
  "dput".to_string()
}

impl Default for PublishConfig {
  fn default() -> Self {
    Self {
      command: default_command(),
      args: Vec::new(),
    }
  }
}

impl GateConfig {
  /// Find config file in search order: ppa-gate.toml, .ppa-gate.toml, .config/ppa-gate.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("ppa-gate.toml"),
      path.join(".ppa-gate.toml"),
      path.join(".config").join("ppa-gate.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config, preferring an explicit path over the search in `dir`.
  ///
  /// An explicit path must exist. Without one, a missing file yields defaults.
  pub fn load(dir: &Path, explicit: Option<&Path>) -> GateResult<Self> {
    let config_path = match explicit {
      Some(p) if p.is_file() => p.to_path_buf(),
      Some(p) => return Err(ConfigError::NotFound { path: p.to_path_buf() }.into()),
      None => match Self::find_config_path(dir) {
        Some(p) => p,
        None => {
          tracing::debug!(dir = %dir.display(), "no ppa-gate.toml found, using defaults");
          return Ok(Self::default());
        }
      },
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::from_toml(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }

  /// Parse and validate config from TOML text
  pub fn from_toml(content: &str) -> GateResult<Self> {
    let config: GateConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Reject values that would make the file-name or channel grammar ambiguous
  pub fn validate(&self) -> GateResult<()> {
    let product = &self.artifact.product;
    if product.is_empty() {
      return Err(invalid("artifact.product", "must not be empty"));
    }
    if product.contains('_') {
      return Err(invalid(
        "artifact.product",
        format!("'{}' must not contain '_' (it separates name and version)", product),
      ));
    }

    let marker = self.artifact.marker;
    if marker.is_ascii_alphanumeric() || matches!(marker, '-' | '_' | '.' | '+') {
      return Err(invalid(
        "artifact.marker",
        format!("'{}' collides with version or file-name syntax", marker),
      ));
    }

    if self.channel.schemes.is_empty() {
      return Err(invalid("channel.schemes", "at least one scheme is required"));
    }
    if let Some(bad) = self.channel.schemes.iter().find(|s| s.is_empty() || s.contains([':', '/'])) {
      return Err(invalid("channel.schemes", format!("'{}' is not a valid scheme", bad)));
    }

    if self.publish.command.trim().is_empty() {
      return Err(invalid("publish.command", "must not be empty"));
    }

    Ok(())
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> crate::core::error::GateError {
  ConfigError::Invalid {
    field: field.to_string(),
    reason: reason.into(),
  }
  .into()
}
