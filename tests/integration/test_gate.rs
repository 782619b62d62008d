//! Integration tests for the gate: validation outcomes, exit codes, publishing

use crate::helpers::{TestDir, run_ppa_gate, run_ppa_gate_raw, stderr, stdout};
use anyhow::Result;

#[test]
fn test_matching_release_line_approved() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("maas", "2.9.0")?;

  let output = run_ppa_gate(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap(), "--dry-run"])?;
  let out = stdout(&output);

  assert!(out.contains("may be published to ppa:maas/2.9"), "stdout: {}", out);
  assert!(out.contains("Dry-run"), "stdout: {}", out);

  Ok(())
}

#[test]
fn test_release_mismatch_rejected() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("maas", "2.10.0")?;

  let output = run_ppa_gate_raw(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap(), "--dry-run"])?;

  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("channel is 2.9 but artifact is 2.10"), "stderr: {}", err);

  Ok(())
}

#[test]
fn test_prerelease_to_stable_rejected() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("maas", "2.9.1~rc1")?;

  let output = run_ppa_gate_raw(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap(), "--dry-run"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("pre-release build to a stable channel"));

  Ok(())
}

#[test]
fn test_prerelease_to_pocket_approved() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("maas", "2.9.5~beta1")?;

  let output = run_ppa_gate(
    &dir.path,
    &["ppa:maas/2.9-proposed", artifact.to_str().unwrap(), "--dry-run"],
  )?;
  assert!(stdout(&output).contains("(pre-release)"));

  Ok(())
}

#[test]
fn test_invalid_channel_is_user_error() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("maas", "2.9.0")?;

  let output = run_ppa_gate_raw(&dir.path, &["maas/2.9", artifact.to_str().unwrap(), "--dry-run"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid channel 'maas/2.9'"));

  Ok(())
}

#[test]
fn test_missing_artifact_is_user_error() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_ppa_gate_raw(
    &dir.path,
    &["ppa:maas/2.9", "maas_2.9.0-0ubuntu1_source.changes", "--dry-run"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Cannot open artifact"));

  Ok(())
}

#[test]
fn test_wrong_product_is_user_error() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("juju", "2.9.0")?;

  let output = run_ppa_gate_raw(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap(), "--dry-run"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid artifact file name"));

  Ok(())
}

#[test]
fn test_json_report_for_rejection() -> Result<()> {
  let dir = TestDir::new()?;
  let artifact = dir.add_artifact("maas", "2.9.1~rc1")?;

  let output = run_ppa_gate_raw(
    &dir.path,
    &["ppa:maas/2.9", artifact.to_str().unwrap(), "--dry-run", "--json"],
  )?;
  assert_eq!(output.status.code(), Some(3));

  let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");
  assert_eq!(json["outcome"]["status"], "rejected");
  assert_eq!(json["outcome"]["reason"], "prerelease_to_stable");
  assert_eq!(json["channel"]["stable"], true);
  assert_eq!(json["artifact"]["prerelease"], true);
  assert_eq!(json["artifact"]["semantic"], "2.9.1-rc1");
  assert_eq!(json["published"], false);

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_publish_output_passed_through() -> Result<()> {
  let dir = TestDir::new()?;
  dir.use_publish_script("echo \"uploading $2 to $1\"")?;
  let artifact = dir.add_artifact("maas", "2.9.0")?;

  let output = run_ppa_gate(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap()])?;
  let out = stdout(&output);

  assert!(
    out.contains(&format!("uploading {} to ppa:maas/2.9", artifact.display())),
    "stdout: {}",
    out
  );
  assert!(out.contains("Published"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_publish_failure_stderr_passed_through() -> Result<()> {
  let dir = TestDir::new()?;
  dir.use_publish_script("echo 'Upload failed: 403 Forbidden' >&2; exit 1")?;
  let artifact = dir.add_artifact("maas", "2.9.0")?;

  let output = run_ppa_gate_raw(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap()])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Upload failed: 403 Forbidden"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_rejected_artifact_is_never_uploaded() -> Result<()> {
  let dir = TestDir::new()?;
  dir.use_publish_script("touch uploaded")?;
  let artifact = dir.add_artifact("maas", "2.8.3")?;

  let output = run_ppa_gate_raw(&dir.path, &["ppa:maas/2.9", artifact.to_str().unwrap()])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(!dir.path.join("uploaded").exists());

  Ok(())
}
