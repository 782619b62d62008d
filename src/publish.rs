//! Publishing approved artifacts through an external upload command
//!
//! The gate never inspects what the upload does. It runs the command once,
//! hands back captured stdout on success, and passes stderr through verbatim
//! on failure.

use crate::core::config::PublishConfig;
use crate::core::error::{GateResult, PublishError};
use crate::release::ChannelIdentifier;
use std::path::Path;
use std::process::Command;

/// Captured output of a successful publish
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutput {
  pub stdout: String,
}

/// Performs the upload for an approved channel/artifact pair
pub trait Publisher {
  fn publish(&self, channel: &ChannelIdentifier, artifact: &Path) -> GateResult<PublishOutput>;
}

/// Runs `<command> <args...> <channel> <artifact>` and waits for it
pub struct CommandPublisher {
  command: String,
  args: Vec<String>,
}

impl CommandPublisher {
  pub fn new(config: &PublishConfig) -> Self {
    Self {
      command: config.command.clone(),
      args: config.args.clone(),
    }
  }
}

impl Publisher for CommandPublisher {
  fn publish(&self, channel: &ChannelIdentifier, artifact: &Path) -> GateResult<PublishOutput> {
    tracing::info!(command = %self.command, channel = %channel, artifact = %artifact.display(), "publishing");

    let output = Command::new(&self.command)
      .args(&self.args)
      .arg(&channel.raw)
      .arg(artifact)
      .output()
      .map_err(|source| PublishError::LaunchFailed {
        command: self.command.clone(),
        source,
      })?;

    if !output.status.success() {
      return Err(
        PublishError::PublishFailure {
          command: self.command.clone(),
          status: output.status.code(),
          stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into(),
      );
    }

    Ok(PublishOutput {
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    })
  }
}
