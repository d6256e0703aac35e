use std::path::PathBuf;

use tempfile::TempDir;

use qrlink_core::config::{AppConfig, EcLevelChoice};
use qrlink_core::error::QrLinkError;

#[test]
fn test_default_config_round_trips() {
    let config = AppConfig::default();
    let text = config.to_toml().unwrap();
    let parsed: AppConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[encode]
size = 300
ec_level = "Low"
quiet_zone = 2

[storage]
pictures_dir = "/tmp/qr-out"
"#,
    )
    .unwrap();

    let config = AppConfig::resolve(Some(&path)).unwrap();
    assert_eq!(config.encode.size, 300);
    assert_eq!(config.encode.ec_level, EcLevelChoice::Low);
    assert_eq!(config.storage.pictures_dir, Some(PathBuf::from("/tmp/qr-out")));
    assert_eq!(config.remote, Default::default());
    assert_eq!(config.scan.analyzers, 1);
}

#[test]
fn test_single_key_sections_fill_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[encode]\nsize = 300\n\n[remote]\ntimeout_secs = 5\n\n[scan]\ncamera_index = 1\n",
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.encode.size, 300);
    assert_eq!(config.encode.ec_level, defaults.encode.ec_level);
    assert_eq!(config.encode.quiet_zone, defaults.encode.quiet_zone);
    assert_eq!(config.remote.timeout_secs, Some(5));
    assert_eq!(config.remote.endpoint, defaults.remote.endpoint);
    assert_eq!(config.scan.camera_index, 1);
    assert_eq!(config.scan.analyzers, defaults.scan.analyzers);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[encode]\nsize = \"huge\"\n").unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, QrLinkError::Config(_)), "got: {err}");
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_missing_explicit_config_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = AppConfig::resolve(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, QrLinkError::Io(_)));
}

#[test]
fn test_ec_level_labels() {
    assert_eq!(EcLevelChoice::High.to_string(), "High (30%)");
    assert_eq!(EcLevelChoice::default(), EcLevelChoice::High);
}
