//! Reporter configuration loading from TOML files.

use errata::{ConfigError, ConfigLoader, Reporter, ReporterConfig};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_full_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "reporter.toml",
        r#"
version = "v3.1.4"
max_depth = 8
color = false
"#,
    );

    let config = ReporterConfig::load(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.version, "v3.1.4");
    assert_eq!(config.max_depth, 8);

    let out = Reporter::new(config).echo_silent("boom");
    assert_eq!(out, "ERROR ver: v3.1.4\n  1 > boom");
}

#[test]
fn missing_fields_take_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "reporter.toml", "version = \"v1\"\n");
    let config = ReporterConfig::load(&path).unwrap();
    assert_eq!(config.max_depth, errata::consts::DEFAULT_MAX_DEPTH);
    assert!(config.color);
}

#[test]
fn missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ReporterConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound));
}

#[test]
fn unknown_field_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "reporter.toml", "verbosity = 3\n");
    let err = ReporterConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn zero_depth_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "reporter.toml", "max_depth = 0\n");
    let config = ReporterConfig::load(&path).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(_))
    ));
}
