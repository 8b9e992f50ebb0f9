//! Error handling for the Sift CLI.
//!
//! `CliError` wraps the library errors from `sift-config` and `sift-graph`
//! and adds the failures that only happen at the command line. Conversion to
//! a `miette` report happens once, in `main`.
//!
//! # Example
//!
//! ```rust,no_run
//! use sift_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_graph(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .context("Failed to read module graph")
//! }
//! ```

pub mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] sift_config::ConfigError),

    /// The module graph could not be read or planned
    #[error("Graph error: {0}")]
    Graph(#[from] sift_graph::GraphError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Refusing to overwrite an existing file
    #[error("File already exists: {}", .0.display())]
    FileExists(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Actionable hint shown below the error, if one applies.
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Config(err) => err.hint().map(str::to_string),
            CliError::FileExists(_) => Some("Pass --force to overwrite it".to_string()),
            CliError::Graph(sift_graph::GraphError::InvalidManifest { .. }) => Some(
                "Expected { \"entries\": [...], \"modules\": [{ \"id\": ..., \"imports\": [...] }] }"
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a "not found" I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                CliError::Graph(sift_graph::GraphError::Io(io_err))
                    if io_err.kind() == std::io::ErrorKind::NotFound =>
                {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_config::ConfigError;
    use sift_graph::{GraphError, ModuleId};

    #[test]
    fn test_cli_error_from_config_error() {
        let cli_err: CliError = ConfigError::ProfileNotFound("production".to_string()).into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(cli_err.to_string().contains("profile 'production'"));
    }

    #[test]
    fn test_cli_error_from_graph_error() {
        let cli_err: CliError = GraphError::UnknownEntry(ModuleId::new("main.js")).into();
        assert!(matches!(cli_err, CliError::Graph(_)));
        assert!(cli_err.to_string().contains("main.js"));
    }

    #[test]
    fn test_config_hint_is_forwarded() {
        let cli_err: CliError = ConfigError::NoEntries.into();
        assert!(cli_err.hint().unwrap().contains("bundle.input"));
    }

    #[test]
    fn test_file_exists_hint() {
        let err = CliError::FileExists(PathBuf::from("sift.toml"));
        assert!(err.to_string().contains("sift.toml"));
        assert!(err.hint().unwrap().contains("--force"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/graph.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_path_unwraps_graph_io() {
        let result: std::result::Result<(), GraphError> = Err(GraphError::Io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        ));

        let err = result.with_path("graph.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(ref p) if p == &PathBuf::from("graph.json")));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);

        let err = result.context("Failed to load").unwrap_err();
        assert!(err.to_string().starts_with("Failed to load: "));
    }
}
