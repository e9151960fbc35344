//! Connection probe tests against stub rclone binaries
//!
//! Each stub is a small shell script standing in for rclone, so the probe's
//! outcome mapping and temp-file cleanup can be checked without a network.

#![cfg(unix)]

use rcmate::rclone::{Rclone, probe};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn block(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn scratch_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[tokio::test]
async fn successful_probe() {
    let stubs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let stub = write_stub(stubs.path(), "rclone", "exit 0");

    let rclone = Rclone::new(stub.to_str().unwrap()).with_scratch_dir(scratch.path());
    let outcome = probe::probe_remote(&rclone, &block(&[("type", "sftp")])).await;

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.message, "Connection successful");
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn probe_passes_config_file_with_sentinel_section() {
    let stubs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let capture = stubs.path().join("capture.conf");

    // args: lsf <target> --config <file>; copy the config before exiting
    let stub = write_stub(
        stubs.path(),
        "rclone",
        &format!("echo \"$2\" > {0}.target\ncat \"$4\" > {0}\nexit 0", capture.display()),
    );

    let rclone = Rclone::new(stub.to_str().unwrap()).with_scratch_dir(scratch.path());
    let outcome = probe::probe_remote(
        &rclone,
        &block(&[("type", "sftp"), ("host", "example.com"), ("pass", "")]),
    )
    .await;

    assert!(outcome.success, "{}", outcome.message);

    let written = std::fs::read_to_string(&capture).unwrap();
    assert_eq!(written, "[rcmate-probe]\ntype = sftp\nhost = example.com\n");

    let target = std::fs::read_to_string(format!("{}.target", capture.display())).unwrap();
    assert_eq!(target.trim(), "rcmate-probe:/");

    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn failed_probe_surfaces_stderr() {
    let stubs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let stub = write_stub(
        stubs.path(),
        "rclone",
        "echo 'couldn'\\''t connect: connection refused' >&2\nexit 1",
    );

    let rclone = Rclone::new(stub.to_str().unwrap()).with_scratch_dir(scratch.path());
    let outcome = probe::probe_remote(&rclone, &block(&[("type", "sftp")])).await;

    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Connection failed:"));
    assert!(outcome.message.contains("connection refused"));
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn timed_out_probe_has_distinct_message() {
    let stubs = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let stub = write_stub(stubs.path(), "rclone", "sleep 30");

    let rclone = Rclone::new(stub.to_str().unwrap())
        .with_timeout(Duration::from_secs(1))
        .with_scratch_dir(scratch.path());
    let outcome = probe::probe_remote(&rclone, &block(&[("type", "sftp")])).await;

    assert!(!outcome.success);
    assert!(outcome.message.contains("timed out"), "{}", outcome.message);
    assert!(!outcome.message.starts_with("Connection failed:"));
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn version_reports_first_line() {
    let stubs = tempfile::tempdir().unwrap();
    let stub = write_stub(
        stubs.path(),
        "rclone",
        "echo 'rclone v1.66.0'\necho '- os/version: debian 12'",
    );

    let rclone = Rclone::new(stub.to_str().unwrap());
    assert_eq!(rclone.version().await.unwrap(), "rclone v1.66.0");
}

#[tokio::test]
async fn version_fails_when_binary_is_missing() {
    let rclone = Rclone::new("/nonexistent/rclone-binary");
    assert!(rclone.version().await.is_err());
}

#[tokio::test]
async fn missing_binary_is_a_failing_outcome() {
    let scratch = tempfile::tempdir().unwrap();
    let rclone =
        Rclone::new("/nonexistent/rclone-binary").with_scratch_dir(scratch.path());
    let outcome = probe::probe_remote(&rclone, &block(&[("type", "sftp")])).await;

    assert!(!outcome.success);
    assert!(outcome.message.contains("could not run"), "{}", outcome.message);
    assert!(scratch_is_empty(scratch.path()));
}
