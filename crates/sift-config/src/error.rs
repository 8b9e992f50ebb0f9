//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry path not found: {}", path.display())]
    EntryNotFound { path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("profile '{0}' is not defined in the config")]
    ProfileNotFound(String),

    #[error("invalid config value for '{field}'{}", hint.as_deref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Schema validation errors (no filesystem checks)
    #[error("no input modules specified")]
    NoEntries,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("invalid module pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Hint attached to the error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { hint, .. } | ConfigError::SchemaValidation { hint, .. } => {
                hint.as_deref()
            }
            ConfigError::NoEntries => Some("Add at least one path to 'bundle.input'"),
            ConfigError::NotFound => Some("Create a sift.toml or add a 'sift' field to package.json"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_includes_hint_in_message() {
        let err = ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some("Invalid TOML syntax".to_string()),
        };
        assert_eq!(err.to_string(), "invalid config value for 'toml': Invalid TOML syntax");
    }

    #[test]
    fn invalid_value_without_hint() {
        let err = ConfigError::InvalidValue {
            field: "bundle".to_string(),
            hint: None,
        };
        assert_eq!(err.to_string(), "invalid config value for 'bundle'");
        assert!(err.hint().is_none());
    }

    #[test]
    fn no_entries_has_hint() {
        assert!(ConfigError::NoEntries.hint().unwrap().contains("bundle.input"));
    }
}
