//! Artifact version extraction from source upload file names
//!
//! File names follow `<product>_<version>-<rest>_source.<ext>`, for example
//! `maas_2.9.1~rc1-9876-g0123abc-0ubuntu1_source.changes`. The version is
//! everything between the first `_` and the first `-` after it.
//!
//! Debian versions use a marker character (`~` by default) to say "this build
//! sorts before its nominal version". semver rejects it, so the marker is
//! stripped before parsing and its presence is kept as `is_prerelease`. The
//! parsed [`Version`] still gets whatever follows the numeric core as its
//! pre-release tag (`2.9.1~rc1` becomes `2.9.1-rc1`), which keeps precedence
//! comparisons honest, but `is_prerelease` is the only signal the gate trusts.
//!
//! The marker is removed from the whole token before the numeric core is
//! split off, so digits right after it join the preceding group: `2.9.0~1`
//! parses as `2.9.1` and `2.9~1` as `2.91.0`. Such a token gets no
//! pre-release tag and does not sort below its nominal version.

use crate::core::config::ArtifactConfig;
use crate::core::error::{GateError, GateResult, InputError};
use crate::release::version::{ReleaseLine, parse_numeric, split_numeric_core};
use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// The version an artifact declares in its file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVersion {
  /// Version token as it appeared in the file name
  pub raw: String,
  /// Parsed version with the marker removed
  pub semantic: Version,
  /// True when `raw` contained the pre-release marker
  pub is_prerelease: bool,
}

impl ArtifactVersion {
  /// Parse a version token, stripping `marker` before the numeric parse
  pub fn parse(raw: &str, marker: char) -> Result<Self, String> {
    let is_prerelease = raw.contains(marker);
    let stripped: String = raw.chars().filter(|&c| c != marker).collect();

    let (core, rest) = split_numeric_core(&stripped);
    let mut semantic = parse_numeric(core)
      .ok_or_else(|| format!("version '{}' must start with one to three numeric groups", raw))?;

    let (pre, build) = match rest.split_once('+') {
      Some((pre, build)) => (pre, Some(build)),
      None => (rest, None),
    };
    let pre = pre.trim_start_matches(['.', '-']);
    if !pre.is_empty() {
      semantic.pre = Prerelease::new(pre).map_err(|e| format!("pre-release tag '{}' in '{}': {}", pre, raw, e))?;
    }
    if let Some(build) = build {
      semantic.build =
        BuildMetadata::new(build).map_err(|e| format!("build metadata '{}' in '{}': {}", build, raw, e))?;
    }

    Ok(Self {
      raw: raw.to_string(),
      semantic,
      is_prerelease,
    })
  }

  pub fn release_line(&self) -> ReleaseLine {
    ReleaseLine::of(&self.semantic)
  }
}

/// An artifact file on disk together with its declared version
#[derive(Debug, Clone)]
pub struct Artifact {
  pub path: PathBuf,
  pub file_name: String,
  pub version: ArtifactVersion,
}

/// Matcher for `<product>_<version>-<rest>_source.<ext>`
pub struct ArtifactPattern {
  regex: Regex,
  marker: char,
}

impl ArtifactPattern {
  pub fn new(config: &ArtifactConfig) -> GateResult<Self> {
    let pattern = format!(
      r"^{}_(?P<version>[^-]+)-(?P<rest>.+)_source\.(?P<ext>[^.]+)$",
      regex::escape(&config.product)
    );
    let regex = Regex::new(&pattern)
      .map_err(|e| GateError::message(format!("Failed to build artifact pattern for '{}': {}", config.product, e)))?;
    Ok(Self {
      regex,
      marker: config.marker,
    })
  }

  /// Open the artifact and extract its version from the file name.
  ///
  /// The open happens first: an unreadable path, or anything that is not a
  /// regular file, is `ArtifactNotFound` even when its name would not match
  /// either.
  pub fn extract(&self, path: &Path) -> GateResult<Artifact> {
    let not_found = |source: io::Error| InputError::ArtifactNotFound {
      path: path.to_path_buf(),
      source,
    };
    let metadata = File::open(path).and_then(|file| file.metadata()).map_err(not_found)?;
    if !metadata.is_file() {
      return Err(not_found(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file")).into());
    }

    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    let version = self.version_from_file_name(&file_name)?;

    tracing::debug!(
      file = %file_name,
      version = %version.semantic,
      prerelease = version.is_prerelease,
      "extracted artifact version"
    );

    Ok(Artifact {
      path: path.to_path_buf(),
      file_name,
      version,
    })
  }

  /// Match a bare file name and parse its version token
  pub fn version_from_file_name(&self, file_name: &str) -> GateResult<ArtifactVersion> {
    let invalid = |reason: String| InputError::InvalidArtifactFileName {
      file_name: file_name.to_string(),
      reason,
    };

    let caps = self
      .regex
      .captures(file_name)
      .ok_or_else(|| invalid("expected <product>_<version>-<rest>_source.<ext>".to_string()))?;

    ArtifactVersion::parse(&caps["version"], self.marker).map_err(|reason| invalid(reason).into())
  }
}
