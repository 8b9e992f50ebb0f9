//! File-based config discovery for CLI use
//!
//! Handles finding and reading Sift configuration files from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::SiftConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "sift.toml";
pub const PACKAGE_JSON_FIELD: &str = "sift";

/// File-based configuration discovery
///
/// Searches for Sift configuration files in conventional locations and loads them.
/// This is primarily for CLI use - library users should use `SiftConfig::from_value()` directly.
///
/// # Example
///
/// ```no_run
/// use sift_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: sift.toml
    /// 2. package.json (sift field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE_NAME);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let has_field = fs::read_to_string(&pkg_path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|parsed| {
                parsed
                    .get(PACKAGE_JSON_FIELD)
                    .is_some_and(|field| !field.is_null())
            });

        has_field.then_some(pkg_path)
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<SiftConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_file(&path)
    }

    /// Load config with profile merging
    pub fn load_with_profile(&self, profile: &str) -> Result<SiftConfig> {
        self.load()?.materialize_profile(Some(profile))
    }
}

/// Read a config file into a JSON value without interpreting it.
///
/// `package.json` files yield their `sift` field; anything else is parsed as TOML.
pub fn read_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        return read_package_json_field(&content);
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") | None => {}
        Some("json") => {
            return serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            });
        }
        Some(other) => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    }

    let toml_val: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("Invalid TOML syntax: {}", e)),
    })?;

    serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("TOML to JSON conversion failed: {}", e)),
    })
}

/// Load and parse a config file.
pub fn load_file(path: &Path) -> Result<SiftConfig> {
    tracing::debug!(path = %path.display(), "loading config file");
    SiftConfig::from_value(read_config_value(path)?)
}

fn read_package_json_field(content: &str) -> Result<Value> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {}", e)),
    })?;

    match parsed.get(PACKAGE_JSON_FIELD) {
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("Add a 'sift' field to your package.json".to_string()),
        }),
        Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("The 'sift' field cannot be null".to_string()),
        }),
        Some(value) => Ok(value.clone()),
    }
}
