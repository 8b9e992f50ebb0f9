//! Tests for locating and reading config files.

use sift_config::{ConfigDiscovery, ConfigError, OutputFormat, load_file};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn toml_takes_precedence_over_package_json() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("sift.toml"),
        r#"
[bundle]
input = ["from-toml.js"]
"#,
    )
    .expect("write toml");
    fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "app", "sift": { "bundle": { "input": ["from-package.js"] } } }"#,
    )
    .expect("write package.json");

    let config = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert_eq!(config.bundle.input, vec![PathBuf::from("from-toml.js")]);
}

#[test]
fn package_json_field_is_used_without_toml() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "app",
  "sift": {
    "bundle": {
      "input": ["app/main.js"],
      "output": { "format": "cjs" }
    }
  }
}"#,
    )
    .expect("write package.json");

    let discovery = ConfigDiscovery::new(dir.path());
    assert_eq!(discovery.find(), Some(dir.path().join("package.json")));

    let config = discovery.load().expect("load");
    assert_eq!(config.bundle.output.format, OutputFormat::Cjs);
}

#[test]
fn null_package_json_field_is_not_a_config() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "app", "sift": null }"#,
    )
    .expect("write package.json");

    assert!(ConfigDiscovery::new(dir.path()).find().is_none());
}

#[test]
fn load_file_reads_json_config() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("sift.json");
    fs::write(
        &path,
        r#"{ "bundle": { "input": ["a.js", "b.js"], "external": ["react"] } }"#,
    )
    .expect("write json");

    let config = load_file(&path).expect("load json");
    assert_eq!(config.bundle.input.len(), 2);
    assert_eq!(config.bundle.external, vec!["react".to_string()]);
}

#[test]
fn wrong_field_type_is_invalid_value() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("sift.toml"),
        r#"
[bundle]
input = "app/main.js"
"#,
    )
    .expect("write toml");

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("sift.toml"),
        r#"
[bundle.output]
format = "amd"
"#,
    )
    .expect("write toml");

    assert!(ConfigDiscovery::new(dir.path()).load().is_err());
}

#[test]
fn rules_table_is_read_from_toml() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("sift.toml"),
        r#"
[bundle]
input = ["app/main.js"]

[bundle.treeshake.module_side_effects]
fallback = true
rules = [
    { suffix = "node_modules/react-scan/dist/native.js", side_effects = false },
    { pattern = "\\.css$", side_effects = true },
]
"#,
    )
    .expect("write toml");

    let config = ConfigDiscovery::new(dir.path()).load().expect("load");
    let treeshake = config.bundle.treeshake.normalize().expect("normalize");

    assert!(!treeshake.module_has_side_effects(
        "/p/node_modules/react-scan/dist/native.js",
        false
    ));
    assert!(treeshake.module_has_side_effects("/p/src/app.css", false));
    assert!(treeshake.module_has_side_effects("/p/src/app.js", false));
}
