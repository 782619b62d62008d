//! Gate command implementation
//!
//! Parse the channel, extract the artifact version, validate, then either
//! stop (dry run) or hand off to the publisher. Any failure ends the run.

use crate::core::config::GateConfig;
use crate::core::error::{GateResult, ResultExt};
use crate::publish::{PublishOutput, Publisher};
use crate::release::{Artifact, ArtifactPattern, ArtifactVersion, ChannelIdentifier, ValidationOutcome, validate};
use serde::Serialize;
use std::path::PathBuf;

/// Inputs collected from the command line
#[derive(Debug, Clone)]
pub struct GateOptions {
  pub channel: String,
  pub artifact: PathBuf,
  pub dry_run: bool,
  pub json: bool,
}

/// Machine-readable summary printed by `--json`
#[derive(Debug, Serialize)]
pub struct GateReport {
  pub channel: ChannelReport,
  pub artifact: ArtifactReport,
  pub outcome: OutcomeReport,
  pub dry_run: bool,
  pub published: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub publish_output: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChannelReport {
  pub raw: String,
  pub scheme: String,
  pub namespace: String,
  pub release: String,
  pub release_line: String,
  pub pocket: Option<String>,
  pub stable: bool,
}

#[derive(Debug, Serialize)]
pub struct ArtifactReport {
  pub path: PathBuf,
  pub version: String,
  pub semantic: String,
  pub release_line: String,
  pub prerelease: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeReport {
  Approved,
  Rejected { reason: String, message: String },
}

impl GateReport {
  fn new(channel: &ChannelIdentifier, artifact: &Artifact, outcome: &ValidationOutcome, dry_run: bool) -> Self {
    Self {
      channel: ChannelReport {
        raw: channel.raw.clone(),
        scheme: channel.scheme.clone(),
        namespace: channel.namespace.clone(),
        release: channel.release.to_string(),
        release_line: channel.release_line().to_string(),
        pocket: channel.pocket.clone(),
        stable: channel.is_stable(),
      },
      artifact: artifact_report(artifact),
      outcome: match outcome {
        ValidationOutcome::Approved => OutcomeReport::Approved,
        ValidationOutcome::Rejected(r) => OutcomeReport::Rejected {
          reason: r.reason().to_string(),
          message: r.to_string(),
        },
      },
      dry_run,
      published: false,
      publish_output: None,
    }
  }
}

fn artifact_report(artifact: &Artifact) -> ArtifactReport {
  let ArtifactVersion {
    raw,
    semantic,
    is_prerelease,
  } = &artifact.version;
  ArtifactReport {
    path: artifact.path.clone(),
    version: raw.clone(),
    semantic: semantic.to_string(),
    release_line: artifact.version.release_line().to_string(),
    prerelease: *is_prerelease,
  }
}

/// Parse both inputs and run the validator without publishing anything
pub fn evaluate(
  opts: &GateOptions,
  config: &GateConfig,
) -> GateResult<(ChannelIdentifier, Artifact, ValidationOutcome)> {
  let channel = ChannelIdentifier::parse(&opts.channel, &config.channel.schemes)?;
  let artifact = ArtifactPattern::new(&config.artifact)?.extract(&opts.artifact)?;
  let outcome = validate(&channel, &artifact.version);
  Ok((channel, artifact, outcome))
}

/// Run the gate command
pub fn run_gate(opts: &GateOptions, config: &GateConfig, publisher: &dyn Publisher) -> GateResult<()> {
  let (channel, artifact, outcome) = evaluate(opts, config)?;
  let mut report = GateReport::new(&channel, &artifact, &outcome, opts.dry_run);

  if let Err(rejection) = outcome.into_result() {
    tracing::info!(reason = rejection.reason(), "validation rejected");
    if opts.json {
      print_json(&report)?;
    }
    return Err(rejection.into());
  }

  tracing::info!(channel = %channel, artifact = %artifact.file_name, "validation approved");
  if !opts.json {
    print_approval(&channel, &artifact);
  }

  if opts.dry_run {
    if opts.json {
      print_json(&report)?;
    } else {
      println!("🔍 Dry-run mode - skipping publish");
    }
    return Ok(());
  }

  let PublishOutput { stdout } = publisher.publish(&channel, &artifact.path)?;
  if opts.json {
    report.published = true;
    report.publish_output = Some(stdout);
    print_json(&report)?;
  } else {
    print!("{}", stdout);
    println!("🚀 Published {} to {}", artifact.file_name, channel);
  }

  Ok(())
}

fn print_json(report: &GateReport) -> GateResult<()> {
  let json = serde_json::to_string_pretty(report).context("Failed to render JSON report")?;
  println!("{}", json);
  Ok(())
}

fn print_approval(channel: &ChannelIdentifier, artifact: &Artifact) {
  let pocket = match channel.pocket.as_deref() {
    Some(p) if !p.is_empty() => p,
    _ => "stable",
  };
  let marker = if artifact.version.is_prerelease { " (pre-release)" } else { "" };

  println!("✅ {} may be published to {}", artifact.file_name, channel);
  println!("   Channel:  {} [{}]", channel.release_line(), pocket);
  println!("   Artifact: {}{}", artifact.version.semantic, marker);
}
