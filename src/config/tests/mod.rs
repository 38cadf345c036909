//! Unit tests for config module

#![allow(clippy::unwrap_used, clippy::panic)]

use std::{fs, time::Duration};

use tempfile::TempDir;

use crate::config::{ClientConfig, ConfigError, LogLevel};

#[test]
fn config_default() {
    let config = ClientConfig::default();

    assert_eq!(config.call_timeout_secs, 25);
    assert_eq!(config.call_timeout(), Duration::from_secs(25));
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn config_empty_toml() {
    let config = ClientConfig::from_toml_str("").unwrap();

    assert_eq!(config, ClientConfig::default());
}

#[test]
fn config_partial_toml_keeps_defaults() {
    let config = ClientConfig::from_toml_str(r#"log_level = "debug""#).unwrap();

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.call_timeout_secs, 25);
}

#[test]
fn config_invalid_log_level() {
    let err = ClientConfig::from_toml_str(r#"log_level = "loud""#).unwrap_err();

    match err {
        ConfigError::TomlParse { location, .. } => assert_eq!(location, "string"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_serialize_roundtrip() {
    let original = ClientConfig {
        call_timeout_secs: 5,
        log_level: LogLevel::Trace,
    };

    let toml_str = toml::to_string(&original).unwrap();
    let parsed = ClientConfig::from_toml_str(&toml_str).unwrap();

    assert_eq!(parsed, original);
}

#[test]
fn load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("modemmanager.toml");
    fs::write(&path, "call_timeout_secs = 3\nlog_level = \"warn\"\n").unwrap();

    let config = ClientConfig::load(&path).unwrap();

    assert_eq!(config.call_timeout(), Duration::from_secs(3));
    assert_eq!(config.log_level, LogLevel::Warn);
}

#[test]
fn load_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = ClientConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
}

#[test]
fn load_reports_file_location() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "call_timeout_secs = \"soon\"").unwrap();

    let err = ClientConfig::load(&path).unwrap_err();

    match err {
        ConfigError::TomlParse { location, .. } => {
            assert_eq!(location, path.display().to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_names_fields() {
    let schema = ClientConfig::schema_json().unwrap();

    assert!(schema.contains("call_timeout_secs"));
    assert!(schema.contains("log_level"));
}

#[test]
fn log_level_display_matches_serde() {
    for level in [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        let config = ClientConfig::from_toml_str(&format!("log_level = \"{level}\"")).unwrap();
        assert_eq!(config.log_level, level);
    }
}
