//! Errors raised while building a module graph or planning inclusion.

use thiserror::Error;

use crate::ModuleId;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The same module id appears twice in a manifest
    #[error("module '{0}' is listed more than once")]
    DuplicateModule(ModuleId),

    /// An import points at a module the manifest does not describe
    #[error("module '{importer}' imports unknown module '{target}'")]
    UnknownImport { importer: ModuleId, target: ModuleId },

    /// An entry point is not one of the listed modules
    #[error("entry '{0}' is not a known module")]
    UnknownEntry(ModuleId),

    #[error("invalid graph manifest: {message}")]
    InvalidManifest { message: String },

    /// Tree-shaking options could not be normalized
    #[error(transparent)]
    Config(#[from] sift_config::ConfigError),

    #[error("failed to start planner threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
