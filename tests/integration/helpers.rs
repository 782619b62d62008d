//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory holding artifacts and an optional ppa-gate.toml
pub struct TestDir {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestDir {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a `.changes` file named the way `debuild -S` names it
  pub fn add_artifact(&self, product: &str, version: &str) -> Result<PathBuf> {
    let name = format!("{}_{}-0ubuntu1_source.changes", product, version);
    let path = self.path.join(&name);
    std::fs::write(
      &path,
      format!("Format: 1.8\nSource: {}\nVersion: {}-0ubuntu1\n", product, version),
    )?;
    Ok(path)
  }

  /// Write ppa-gate.toml in the directory
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("ppa-gate.toml"), content)?;
    Ok(())
  }

  /// Point the publish step at a shell snippet; `$1` is the channel, `$2` the artifact
  pub fn use_publish_script(&self, script: &str) -> Result<()> {
    self.write_config(&format!(
      "[publish]\ncommand = \"sh\"\nargs = [\"-c\", {}, \"sh\"]\n",
      toml_string(script)
    ))
  }
}

fn toml_string(s: &str) -> String {
  format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Run ppa-gate and return its output regardless of exit status
pub fn run_ppa_gate_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_ppa-gate");

  Command::new(bin)
    .current_dir(cwd)
    .env_remove("PPA_GATE_LOG")
    .args(args)
    .output()
    .context("Failed to run ppa-gate")
}

/// Run ppa-gate and fail unless it exits successfully
pub fn run_ppa_gate(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_ppa_gate_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "ppa-gate command failed: ppa-gate {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
