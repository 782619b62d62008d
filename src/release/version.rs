//! Dotted numeric releases and the major.minor release line

use semver::Version;
use serde::Serialize;
use std::fmt;

/// A product's release series, independent of patch number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReleaseLine {
  pub major: u64,
  pub minor: u64,
}

impl ReleaseLine {
  /// Truncate a version to its first two components
  pub fn of(version: &Version) -> Self {
    Self {
      major: version.major,
      minor: version.minor,
    }
  }
}

impl fmt::Display for ReleaseLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.major, self.minor)
  }
}

/// Parse one to three dot-separated numeric groups, padding missing ones with zero.
///
/// `"2.9"` becomes `2.9.0`. Returns `None` for empty groups, non-digits,
/// more than three groups, or values that overflow `u64`.
pub fn parse_numeric(text: &str) -> Option<Version> {
  let mut parts = [0u64; 3];
  let mut count = 0;
  for group in text.split('.') {
    if count == 3 || group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    parts[count] = group.parse().ok()?;
    count += 1;
  }
  Some(Version::new(parts[0], parts[1], parts[2]))
}

/// Split `text` into its leading numeric core (`\d+(\.\d+)*`) and the remainder
pub fn split_numeric_core(text: &str) -> (&str, &str) {
  let bytes = text.as_bytes();
  let mut end = 0;
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i].is_ascii_digit() {
      i += 1;
      end = i;
    } else if bytes[i] == b'.' && end == i && end > 0 && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
      i += 1;
    } else {
      break;
    }
  }
  text.split_at(end)
}
