//! Diagnostic logging to stderr
//!
//! stdout carries the gate's report and the upload command's output, so
//! tracing output always goes to stderr. `PPA_GATE_LOG` takes an
//! `EnvFilter` directive and overrides `-v`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PPA_GATE_LOG";

/// Default filter for a `-v` count
fn default_directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "warn",
    1 => "ppa_gate=debug",
    _ => "trace",
  }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact()
    .try_init();
}
