//! High-level configuration structure for Sift.
//!
//! This module provides the main `SiftConfig` struct and profile merging logic.
//! For file discovery, see the `discovery` module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::BundleOptions;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::settings::GlobalSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiftConfig {
    #[serde(default)]
    pub bundle: BundleOptions,

    #[serde(default)]
    pub profiles: IndexMap<String, ProfileConfig>,

    #[serde(default)]
    pub settings: GlobalSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub bundle: Value,

    #[serde(default)]
    pub settings: Value,
}

impl SiftConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use sift_config::SiftConfig;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let value = json!({
    ///     "bundle": {
    ///         "input": ["app/main.js"],
    ///         "treeshake": { "preset": "smallest" }
    ///     }
    /// });
    ///
    /// let config = SiftConfig::from_value(value).unwrap();
    /// assert_eq!(config.bundle.input, vec![PathBuf::from("app/main.js")]);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// The configuration this project ships with.
    pub fn app_defaults() -> Self {
        Self {
            bundle: BundleOptions::app_defaults(),
            ..Self::default()
        }
    }

    /// Apply a named profile on top of the base configuration.
    ///
    /// Objects merge key by key; arrays and scalars in the profile replace the
    /// base value outright.
    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let profile_cfg = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        if !profile_cfg.bundle.is_null() {
            self.bundle = merge_into(&self.bundle, &profile_cfg.bundle)?;
        }

        if !profile_cfg.settings.is_null() {
            self.settings = merge_into(&self.settings, &profile_cfg.settings)?;
        }

        tracing::debug!(profile = name, "applied config profile");
        Ok(self)
    }
}

fn merge_into<T>(base: &T, update: &Value) -> ConfigResult<T>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut merged =
        serde_json::to_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
            message: err.to_string(),
        })?;
    merge_values(&mut merged, update);
    serde_json::from_value(merged).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })
}

pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
