//! Channel/artifact compatibility rules
//!
//! Two rules, checked in this order:
//!
//! 1. **Release line**: the artifact's major.minor must equal the channel's.
//!    Patch numbers are ignored.
//! 2. **Stability**: a marked pre-release numbered strictly ahead of the
//!    channel's release must not go to a stable (pocket-less) channel.
//!
//! The validator is a pure function; callers decide what a rejection means
//! for the process.

use crate::release::artifact::ArtifactVersion;
use crate::release::channel::ChannelIdentifier;
use crate::release::version::ReleaseLine;
use semver::Version;
use std::fmt;

/// Why a channel/artifact pair was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
  /// Channel and artifact belong to different major.minor lines
  ReleaseMismatch { channel: ReleaseLine, artifact: ReleaseLine },

  /// A pre-release build ahead of the channel's version aimed at a stable channel
  PrereleaseToStable { channel: Version, artifact: Version },
}

impl Rejection {
  /// Stable identifier used in `--json` reports
  pub fn reason(&self) -> &'static str {
    match self {
      Rejection::ReleaseMismatch { .. } => "release_mismatch",
      Rejection::PrereleaseToStable { .. } => "prerelease_to_stable",
    }
  }

  pub(crate) fn help_message(&self) -> Option<String> {
    match self {
      Rejection::ReleaseMismatch { artifact, .. } => Some(format!(
        "Upload to the {} channel instead, or rebuild the source package for this release line.",
        artifact
      )),
      Rejection::PrereleaseToStable { .. } => {
        Some("Publish to a pocket such as `-proposed` first, or build the final release.".to_string())
      }
    }
  }
}

impl fmt::Display for Rejection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Rejection::ReleaseMismatch { channel, artifact } => {
        write!(f, "Release mismatch: channel is {} but artifact is {}", channel, artifact)
      }
      Rejection::PrereleaseToStable { .. } => {
        write!(f, "Refusing to publish a pre-release build to a stable channel")
      }
    }
  }
}

/// Result of checking one channel/artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
  Approved,
  Rejected(Rejection),
}

impl ValidationOutcome {
  /// Convert into a `Result` so callers can use `?`
  pub fn into_result(self) -> Result<(), Rejection> {
    match self {
      ValidationOutcome::Approved => Ok(()),
      ValidationOutcome::Rejected(rejection) => Err(rejection),
    }
  }
}

/// Decide whether `artifact` may be published to `channel`
pub fn validate(channel: &ChannelIdentifier, artifact: &ArtifactVersion) -> ValidationOutcome {
  let channel_line = channel.release_line();
  let artifact_line = artifact.release_line();

  if channel_line != artifact_line {
    tracing::debug!(channel = %channel_line, artifact = %artifact_line, "release lines differ");
    return ValidationOutcome::Rejected(Rejection::ReleaseMismatch {
      channel: channel_line,
      artifact: artifact_line,
    });
  }

  // Strictly ahead only: a marked build equal to or behind the channel's version passes.
  if artifact.semantic > channel.release && artifact.is_prerelease && channel.is_stable() {
    tracing::debug!(
      channel = %channel.release,
      artifact = %artifact.semantic,
      "pre-release ahead of stable channel"
    );
    return ValidationOutcome::Rejected(Rejection::PrereleaseToStable {
      channel: channel.release.clone(),
      artifact: artifact.semantic.clone(),
    });
  }

  ValidationOutcome::Approved
}
