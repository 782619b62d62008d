//! Channel identifiers: `<scheme>:<namespace>/<major>.<minor>[.<patch>][-<pocket>]`
//!
//! A channel without a pocket is the stable (production) target for its
//! release line. `ppa:maas/2.9` is stable, `ppa:maas/2.9-proposed` is not.

use crate::core::error::{GateResult, InputError};
use crate::release::version::{ReleaseLine, parse_numeric};
use regex::Regex;
use semver::Version;
use std::fmt;
use std::sync::LazyLock;

static CHANNEL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?P<scheme>[^:/\s]+):(?P<namespace>[^/\s]+)/(?P<release>\d+(?:\.\d+)*)(?:-(?P<pocket>.+))?$")
    .expect("channel pattern is valid")
});

/// A parsed publication target. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelIdentifier {
  pub raw: String,
  pub scheme: String,
  pub namespace: String,
  pub release: Version,
  pub pocket: Option<String>,
}

impl ChannelIdentifier {
  /// Parse a channel string, accepting only the given schemes
  pub fn parse(raw: &str, schemes: &[String]) -> GateResult<Self> {
    let invalid = |reason: String| InputError::InvalidChannelFormat {
      channel: raw.to_string(),
      reason,
    };

    let caps = CHANNEL_RE.captures(raw).ok_or_else(|| {
      invalid("expected <scheme>:<namespace>/<major>.<minor>[.<patch>][-<pocket>]".to_string())
    })?;

    let scheme = &caps["scheme"];
    if !schemes.iter().any(|s| s == scheme) {
      return Err(invalid(format!("unsupported scheme '{}' (accepted: {})", scheme, schemes.join(", "))).into());
    }

    let release_text = &caps["release"];
    let release = parse_numeric(release_text)
      .ok_or_else(|| invalid(format!("release '{}' must have at most three numeric groups", release_text)))?;

    let channel = Self {
      raw: raw.to_string(),
      scheme: scheme.to_string(),
      namespace: caps["namespace"].to_string(),
      release,
      pocket: caps.name("pocket").map(|m| m.as_str().to_string()),
    };

    tracing::debug!(
      channel = %channel.raw,
      release = %channel.release,
      pocket = channel.pocket.as_deref().unwrap_or("-"),
      "parsed channel"
    );
    Ok(channel)
  }

  /// A channel is stable when it carries no pocket qualifier
  pub fn is_stable(&self) -> bool {
    self.pocket.as_deref().is_none_or(str::is_empty)
  }

  pub fn release_line(&self) -> ReleaseLine {
    ReleaseLine::of(&self.release)
  }
}

impl fmt::Display for ChannelIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}
