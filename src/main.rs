mod commands;
mod core;
mod logging;
mod publish;
mod release;

use clap::Parser;
use crate::core::config::GateConfig;
use crate::core::error::{GateError, print_error};
use crate::publish::CommandPublisher;
use std::path::PathBuf;

/// Refuse to publish a source package to the wrong PPA
///
/// Checks that the artifact's major.minor matches the channel's and that a
/// pre-release build is not pushed to a stable (pocket-less) channel, then
/// runs the upload command.
#[derive(Parser)]
#[command(name = "ppa-gate")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct GateCli {
  /// Target channel, e.g. ppa:maas/2.9 or ppa:maas/2.9-proposed
  channel: String,

  /// Source upload to publish, e.g. maas_2.9.0-1-0ubuntu1_source.changes
  artifact: PathBuf,

  /// Validate only; do not run the upload command
  #[arg(long)]
  dry_run: bool,

  /// Output the validation report in JSON format
  #[arg(long)]
  json: bool,

  /// Config file (default: ppa-gate.toml in the current directory)
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Increase diagnostic output on stderr (-v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let yellow_header = Style::new()
    .bold()
    .underline()
    .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
  let red = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red)));

  clap::builder::Styles::styled()
    .usage(yellow_header)
    .header(yellow_header)
    .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
    .invalid(red)
    .error(red)
    .valid(
      Style::new()
        .bold()
        .underline()
        .fg_color(Some(Color::Ansi(AnsiColor::Green))),
    )
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}

fn main() {
  let cli = GateCli::parse();
  logging::init(cli.verbose);

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(GateError::with_help(
      format!("Failed to get current directory: {}", e),
      "Run ppa-gate from a directory that still exists.",
    )),
  };

  let config = match GateConfig::load(&cwd, cli.config.as_deref()) {
    Ok(config) => config,
    Err(e) => handle_error(e),
  };

  let opts = commands::GateOptions {
    channel: cli.channel,
    artifact: cli.artifact,
    dry_run: cli.dry_run,
    json: cli.json,
  };
  let publisher = CommandPublisher::new(&config.publish);

  if let Err(err) = commands::run_gate(&opts, &config, &publisher) {
    handle_error(err);
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
