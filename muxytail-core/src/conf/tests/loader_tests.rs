use crate::conf::error::ConfigError;
use crate::conf::loader::{load_config, parse_config};
use crate::conf::types::ColorRuleConfig;

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn parse_full_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("muxytail.hcl");

    fs::write(
        &path,
        r##"
files = ["logs/*.log", "/var/log/syslog"]
format_workers = 2

separator {
  color = "#ff0000"
  rule  = "="
  width = 40
}

access_log {
  bracket        = "#888888"
  host           = "#00ffff"
  status_ok      = "green"
  status_error   = "red"
  status_other   = "yellow"
  url            = "#ffffff"
  resolve_hosts  = false
}

colorize = [
  { color = "#ff5555", patterns = ["ERROR", "FATAL"] },
  { color = "#55ff55", patterns = ["OK"] },
]
"##,
    )
    .unwrap();

    // Act
    let config = load_config(&path).unwrap();

    // Assert
    assert_eq!(config.files, vec!["logs/*.log", "/var/log/syslog"]);
    assert_eq!(config.format_workers, 2);
    assert_eq!(config.separator.color, "#ff0000");
    assert_eq!(config.separator.rule, "=");
    assert_eq!(config.separator.width, Some(40));
    assert!(config.access_log.enabled);
    assert!(!config.access_log.resolve_hosts);
    assert_eq!(config.access_log.status_ok, "green");
    assert_eq!(
        config.colorize,
        vec![
            ColorRuleConfig {
                color: "#ff5555".to_string(),
                patterns: vec!["ERROR".to_string(), "FATAL".to_string()],
            },
            ColorRuleConfig {
                color: "#55ff55".to_string(),
                patterns: vec!["OK".to_string()],
            },
        ]
    );
}

#[test]
fn minimal_config_uses_defaults() {
    // Act
    let config = parse_config(Path::new("inline.hcl"), r#"files = ["a.log"]"#).unwrap();

    // Assert
    assert_eq!(config.format_workers, 4);
    assert_eq!(config.separator.rule, "─");
    assert_eq!(config.separator.color, "");
    assert_eq!(config.separator.width, None);
    assert!(config.access_log.enabled);
    assert!(config.access_log.resolve_hosts);
    assert!(config.colorize.is_empty());
}

#[test]
fn access_log_can_be_disabled() {
    let config = parse_config(
        Path::new("inline.hcl"),
        r#"
files = ["a.log"]
access_log {
  enabled = false
}
"#,
    )
    .unwrap();

    assert!(!config.access_log.enabled);
}

#[test]
fn unknown_fields_are_rejected() {
    let result = parse_config(
        Path::new("inline.hcl"),
        r#"
files = ["a.log"]
colour = "red"
"#,
    );

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn malformed_hcl_is_a_parse_error() {
    let result = parse_config(Path::new("broken.hcl"), "files = [");

    match result {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, Path::new("broken.hcl")),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let result = load_config(&dir.path().join("absent.hcl"));

    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}
