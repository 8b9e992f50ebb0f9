//! Shared utilities for command implementations.

use crate::cli::GlobalOptions;
use crate::error::{CliError, Result};
use sift_config::{ConfigLoader, GlobalSettings, SiftConfig};
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| CliError::Custom(format!("Failed to get current directory: {}", e)))
}

/// Loader honoring `--config` and `--profile`.
pub fn config_loader(global: &GlobalOptions, cwd: &Path) -> ConfigLoader {
    ConfigLoader::new(cwd)
        .config_path(global.config.as_deref())
        .profile(global.profile.as_deref())
}

/// Load the fully layered configuration for the current directory.
pub fn load_config(global: &GlobalOptions) -> Result<SiftConfig> {
    let cwd = get_cwd()?;
    let config = config_loader(global, &cwd).load()?;
    if let Some(profile) = &global.profile {
        tracing::debug!(profile = %profile, "using profile");
    }
    Ok(config)
}

/// Settings for logger setup, read before any command runs.
///
/// A config that fails to load yields defaults here; the command that needs
/// it reports the error.
pub fn load_settings(global: &GlobalOptions) -> GlobalSettings {
    get_cwd()
        .ok()
        .and_then(|cwd| config_loader(global, &cwd).load().ok())
        .map(|config| config.settings)
        .unwrap_or_default()
}
