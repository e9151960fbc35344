//! Registry load-cycle tests: discovery order, collision policy, and the
//! guarantee that a bad manifest never aborts loading.

use rcmate::plugins::PluginRegistry;
use std::path::Path;

fn write_manifest(dir: &Path, file: &str, yaml: &str) {
    std::fs::write(dir.join(file), yaml).unwrap();
}

const FTP: &str = r#"
name: FTP
type: ftp
description: "Plain FTP servers"
fields:
  - name: host
    label: Host
  - name: user
    label: Username
    required: false
"#;

#[test]
fn loads_builtins_and_manifests_together() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "ftp.yaml", FTP);

    let load = PluginRegistry::load(dir.path());

    assert!(load.warnings.is_empty(), "{:?}", load.warnings);
    assert!(load.registry.contains("SFTP"));
    assert!(load.registry.contains("S3"));
    assert!(load.registry.contains("WebDAV"));
    assert!(load.registry.contains("FTP"));

    let ftp = load.registry.get("FTP").unwrap();
    assert_eq!(ftp.remote_type(), "ftp");
    assert_eq!(ftp.description(), "Plain FTP servers");
}

#[test]
fn missing_plugins_directory_is_not_an_error() {
    let load = PluginRegistry::load(Path::new("/nonexistent/rcmate-test-plugins"));
    assert!(load.warnings.is_empty());
    assert_eq!(load.registry.len(), PluginRegistry::builtins().len());
}

#[test]
fn earlier_filename_wins_a_name_collision() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "a-first.yaml",
        "name: Dup\ntype: ftp\nfields:\n  - {name: host, label: Host}\n",
    );
    write_manifest(
        dir.path(),
        "b-second.yaml",
        "name: Dup\ntype: sftp\nfields:\n  - {name: host, label: Host}\n",
    );

    let load = PluginRegistry::load(dir.path());

    assert_eq!(load.warnings.len(), 1);
    assert!(load.warnings[0].source.ends_with("b-second.yaml"));
    assert_eq!(load.registry.get("Dup").unwrap().remote_type(), "ftp");
}

#[test]
fn builtin_wins_over_manifest_with_same_name() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "imposter.yaml",
        "name: SFTP\ntype: ftp\nfields:\n  - {name: host, label: Host}\n",
    );

    let load = PluginRegistry::load(dir.path());

    assert_eq!(load.warnings.len(), 1);
    assert_eq!(load.registry.get("SFTP").unwrap().remote_type(), "sftp");
}

#[test]
fn malformed_manifest_warns_but_others_load() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "broken.yaml", "name: [unterminated");
    write_manifest(dir.path(), "ftp.yaml", FTP);

    let load = PluginRegistry::load(dir.path());

    assert_eq!(load.warnings.len(), 1);
    assert!(load.warnings[0].source.ends_with("broken.yaml"));
    assert!(load.registry.contains("FTP"));
}

#[test]
fn structurally_invalid_manifest_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    // Choice field without choices fails validation
    write_manifest(
        dir.path(),
        "bad.yaml",
        "name: Bad\ntype: bad\nfields:\n  - {name: mode, label: Mode, field_type: choice}\n",
    );

    let load = PluginRegistry::load(dir.path());

    assert_eq!(load.warnings.len(), 1);
    assert!(load.warnings[0].reason.contains("declares no choices"));
    assert!(!load.registry.contains("Bad"));
}

#[test]
fn disabled_manifest_is_skipped_silently() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "off.yaml",
        "name: Off\ntype: off_remote\nenabled: false\nfields:\n  - {name: host, label: Host}\n",
    );

    let load = PluginRegistry::load(dir.path());

    assert!(load.warnings.is_empty());
    assert!(!load.registry.contains("Off"));
}

#[test]
fn non_yaml_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "README.md", "not a manifest");
    write_manifest(dir.path(), "notes.txt", "also not a manifest");
    write_manifest(dir.path(), "ftp.yml", FTP);

    let load = PluginRegistry::load(dir.path());

    assert!(load.warnings.is_empty(), "{:?}", load.warnings);
    assert!(load.registry.contains("FTP"));
}

#[test]
fn manifest_plugin_validates_from_its_schema() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "ftp.yaml", FTP);

    let load = PluginRegistry::load(dir.path());
    let ftp = load.registry.get("FTP").unwrap();

    let empty = rcmate::plugins::RemoteConfig::new();
    let outcome = ftp.validate(&empty);
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Host is required");

    let mut config = rcmate::plugins::RemoteConfig::new();
    config.insert("host".to_string(), "ftp.example.com".to_string());
    assert!(ftp.validate(&config).success);
}
