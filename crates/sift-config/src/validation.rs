//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use crate::bundle::BundleOptions;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate bundle options
    fn validate(&self, config: &BundleOptions) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use sift_config::{BundleOptions, SchemaValidator, ConfigValidator};
///
/// let mut config = BundleOptions::default();
/// config.input = vec!["app/main.js".into()];
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BundleOptions) -> Result<()> {
        if config.input.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for external in &config.external {
            if external.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "external module names cannot be empty".to_string(),
                    hint: Some("Remove empty strings from the 'external' array".to_string()),
                });
            }
        }

        let output = &config.output;
        if output.file.is_some() {
            if output.preserve_modules {
                return Err(ConfigError::SchemaValidation {
                    message: "'output.preserve_modules' writes one file per module and cannot be combined with 'output.file'".to_string(),
                    hint: Some("Use 'output.dir' instead of 'output.file'".to_string()),
                });
            }
            if output.dir.is_some() {
                return Err(ConfigError::SchemaValidation {
                    message: "'output.file' and 'output.dir' are mutually exclusive".to_string(),
                    hint: Some("Keep only one of them".to_string()),
                });
            }
            if config.input.len() > 1 {
                return Err(ConfigError::SchemaValidation {
                    message: format!(
                        "'output.file' needs a single input, found {}",
                        config.input.len()
                    ),
                    hint: Some("Use 'output.dir' for multi-entry builds".to_string()),
                });
            }
        }

        // Compiling the policy checks every rule and pattern.
        config.treeshake.normalize()?;

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Validates that input modules exist on disk.
///
/// # Example
///
/// ```no_run
/// use sift_config::{BundleOptions, FsValidator, ConfigValidator};
///
/// let mut config = BundleOptions::default();
/// config.input = vec!["app/main.js".into()];
///
/// FsValidator::new(".").validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BundleOptions) -> Result<()> {
        SchemaValidator.validate(config)?;

        for entry in &config.input {
            let path = self.root.join(entry);
            if !path.exists() {
                return Err(ConfigError::EntryNotFound { path });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BundleOptions) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BundleOptions, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
