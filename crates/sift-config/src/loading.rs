//! Layered configuration loading.
//!
//! Priority: overrides > environment (`SIFT_*`) > config file > defaults.
//! Nested keys in environment variables are separated by `__`, so
//! `SIFT_BUNDLE__OUTPUT__DIR=out` sets `bundle.output.dir`.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde_json::Value;

use crate::config::SiftConfig;
use crate::discovery::{ConfigDiscovery, read_config_value};
use crate::error::{ConfigError, Result};

pub const ENV_PREFIX: &str = "SIFT_";

/// Builder for a fully resolved [`SiftConfig`].
///
/// # Example
///
/// ```no_run
/// use sift_config::ConfigLoader;
///
/// let config = ConfigLoader::new(".")
///     .profile(Some("production"))
///     .load()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    config_path: Option<PathBuf>,
    profile: Option<String>,
    use_env: bool,
    require_file: bool,
    overrides: Option<Value>,
}

impl ConfigLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config_path: None,
            profile: None,
            use_env: true,
            require_file: false,
            overrides: None,
        }
    }

    /// Load this file instead of searching the root directory.
    pub fn config_path(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.config_path = path.map(Into::into);
        self
    }

    pub fn profile(mut self, profile: Option<&str>) -> Self {
        self.profile = profile.map(str::to_string);
        self
    }

    /// Skip `SIFT_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Fail with [`ConfigError::NotFound`] when no config file exists.
    pub fn require_file(mut self, require: bool) -> Self {
        self.require_file = require;
        self
    }

    /// Values merged last, e.g. from command-line flags.
    pub fn overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// The config file that would be read, if any.
    pub fn source_file(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => Some(self.root.join(path)),
            None => ConfigDiscovery::new(&self.root).find(),
        }
    }

    pub fn load(&self) -> Result<SiftConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(SiftConfig::default()));

        match self.source_file() {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound);
                }
                let value = read_config_value(&path)?;
                tracing::info!(path = %path.display(), "using config file");
                figment = figment.merge(Serialized::defaults(value));
            }
            None if self.require_file => return Err(ConfigError::NotFound),
            None => tracing::debug!(root = %self.root.display(), "no config file found, using defaults"),
        }

        if self.use_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        if let Some(overrides) = &self.overrides {
            figment = figment.merge(Serialized::defaults(overrides.clone()));
        }

        let config: SiftConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })?;

        config.materialize_profile(self.profile.as_deref())
    }
}
