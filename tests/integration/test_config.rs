//! Integration tests for ppa-gate.toml handling

use crate::helpers::{TestDir, run_ppa_gate, run_ppa_gate_raw, stderr};
use anyhow::Result;

#[test]
fn test_custom_product_and_marker() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_config(
    r#"
[artifact]
product = "juju"
marker = "^"
"#,
  )?;
  let artifact = dir.add_artifact("juju", "3.1.1^rc2")?;

  let output = run_ppa_gate_raw(&dir.path, &["ppa:juju/3.1", artifact.to_str().unwrap(), "--dry-run"])?;

  assert_eq!(output.status.code(), Some(3), "stderr: {}", stderr(&output));

  Ok(())
}

#[test]
fn test_extra_scheme_accepted() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_config("[channel]\nschemes = [\"ppa\", \"staging\"]\n")?;
  let artifact = dir.add_artifact("maas", "3.0.1")?;

  run_ppa_gate(&dir.path, &["staging:maas/3.0", artifact.to_str().unwrap(), "--dry-run"])?;

  Ok(())
}

#[test]
fn test_invalid_config_is_user_error() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_config("[artifact]\nmarker = \"-\"\n")?;
  let artifact = dir.add_artifact("maas", "2.9.0")?;

  let output = run_ppa_gate_raw(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap(), "--dry-run"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("artifact.marker"));

  Ok(())
}

#[test]
fn test_explicit_config_must_exist() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("maas", "2.9.0")?;

  let output = run_ppa_gate_raw(
    &dir.path,
    &[
      "ppa:maas/2.9",
      artifact.to_str().unwrap(),
      "--dry-run",
      "--config",
      "missing.toml",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Config file not found"));

  Ok(())
}
