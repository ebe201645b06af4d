//! Tests for config functionality.

use crate::config::Config;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.similarity_threshold, 0.6);
    assert_eq!(config.max_line_length, 80);
    assert_eq!(config.annotated_suffix, "_annotated");
    assert_eq!(config.source_extensions, vec!["py".to_string()]);
    assert_eq!(config.metrics_path, PathBuf::from(".pydelta/metrics.json"));
    assert_eq!(config.history_path, PathBuf::from(".pydelta/history.ndjson"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_empty_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
similarity_threshold: 0.75
max_line_length: 100
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.similarity_threshold, 0.75);
    assert_eq!(config.max_line_length, 100);
    assert_eq!(config.annotated_suffix, "_annotated");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
similarity_threshold: 0.5
annotated_suffix: _diff
max_line_length: 120
source_extensions:
  - py
  - pyw
metrics_path: out/metrics.json
history_path: out/history.ndjson
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.similarity_threshold, 0.5);
    assert_eq!(config.annotated_suffix, "_diff");
    assert_eq!(config.max_line_length, 120);
    assert_eq!(config.source_extensions, vec!["py", "pyw"]);
    assert_eq!(config.metrics_path, PathBuf::from("out/metrics.json"));
    assert_eq!(config.history_path, PathBuf::from("out/history.ndjson"));
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
similarity_threshold: 0.7
colour_output: always
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.similarity_threshold, 0.7);
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let result = Config::from_yaml("similarity_threshold: [1, 2");
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_threshold_out_of_range() {
    let err = Config::from_yaml("similarity_threshold: 1.5").unwrap_err();
    assert!(err.to_string().contains("similarity_threshold"));

    let err = Config::from_yaml("similarity_threshold: -0.1").unwrap_err();
    assert!(err.to_string().contains("similarity_threshold"));
}

#[test]
fn test_zero_line_length_rejected() {
    let err = Config::from_yaml("max_line_length: 0").unwrap_err();
    assert!(err.to_string().contains("max_line_length"));
}

#[test]
fn test_empty_suffix_rejected() {
    let err = Config::from_yaml("annotated_suffix: \"\"").unwrap_err();
    assert!(err.to_string().contains("annotated_suffix"));
}

#[test]
fn test_extension_with_leading_dot_rejected() {
    let yaml = r#"
source_extensions:
  - .py
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("Use 'py' instead"));
}

#[test]
fn test_yaml_roundtrip() {
    let config = Config {
        similarity_threshold: 0.8,
        annotated_suffix: "_marked".to_string(),
        ..Config::default()
    };

    let yaml = config.to_yaml().unwrap();
    assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_load_or_default_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pydelta.yaml");

    let config = Config::load_or_default(&path, false).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_or_default_requires_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.yaml");

    let err = Config::load_or_default(&path, true).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pydelta.yaml");
    std::fs::write(&path, "max_line_length: 99\n").unwrap();

    let config = Config::load_or_default(&path, false).unwrap();
    assert_eq!(config.max_line_length, 99);
}

#[test]
fn test_threshold_override() {
    let config = Config::default().with_threshold(Some(0.9)).unwrap();
    assert_eq!(config.similarity_threshold, 0.9);

    let config = Config::default().with_threshold(None).unwrap();
    assert_eq!(config.similarity_threshold, 0.6);

    assert!(Config::default().with_threshold(Some(2.0)).is_err());
}

#[test]
fn test_normalized_extensions() {
    let config = Config::from_yaml("source_extensions: [PY, Pyw]").unwrap();
    assert_eq!(config.normalized_extensions(), vec!["py", "pyw"]);
}
