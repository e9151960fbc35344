//! Config formatting behavior shared by every plugin: the `type` key is
//! always present, empty values are omitted, and output is stable.

use rcmate::plugins::{PluginRegistry, RemoteConfig};
use rcmate::rclone::probe;
use std::path::Path;

fn config(pairs: &[(&str, &str)]) -> RemoteConfig {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn registry() -> PluginRegistry {
    PluginRegistry::load(Path::new("/nonexistent/rcmate-test-plugins")).registry
}

#[test]
fn every_plugin_block_carries_its_type() {
    let input = config(&[("host", "example.com"), ("type", "spoofed")]);
    for plugin in registry().all() {
        let block = plugin.config_block(&input);
        assert_eq!(
            block.get("type").map(String::as_str),
            Some(plugin.remote_type()),
            "plugin {}",
            plugin.name()
        );
    }
}

#[test]
fn every_plugin_block_omits_empty_values() {
    let input = config(&[("host", "example.com"), ("pass", ""), ("region", "")]);
    for plugin in registry().all() {
        let block = plugin.config_block(&input);
        assert!(!block.contains_key("pass"), "plugin {}", plugin.name());
        assert!(!block.contains_key("region"), "plugin {}", plugin.name());
    }
}

#[test]
fn every_plugin_block_is_stable() {
    let input = config(&[("host", "example.com"), ("user", "alice"), ("port", "2022")]);
    for plugin in registry().all() {
        assert_eq!(
            plugin.config_block(&input),
            plugin.config_block(&input),
            "plugin {}",
            plugin.name()
        );
    }
}

#[test]
fn sftp_blank_password_end_to_end() {
    let registry = registry();
    let sftp = registry.get("SFTP").unwrap();

    // A blank optional field validates and vanishes from the output.
    let input = config(&[("host", "example.com"), ("user", "alice"), ("pass", "")]);
    let outcome = sftp.validate(&input);
    assert!(outcome.success, "{}", outcome.message);

    let block = sftp.config_block(&input);
    let rendered = probe::render_section("backup", &block);
    assert_eq!(
        rendered,
        "[backup]\ntype = sftp\nhost = example.com\nuser = alice\n"
    );
}

#[test]
fn rendered_sections_start_with_type() {
    let input = config(&[
        ("host", "example.com"),
        ("user", "alice"),
        ("access_key_id", "AKIA123"),
        ("secret_access_key", "secret"),
        ("url", "https://dav.example.com"),
    ]);
    for plugin in registry().all() {
        let rendered = probe::render_section("r", &plugin.config_block(&input));
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("[r]"), "plugin {}", plugin.name());
        assert_eq!(
            lines.next(),
            Some(format!("type = {}", plugin.remote_type()).as_str()),
            "plugin {}",
            plugin.name()
        );
    }
}
