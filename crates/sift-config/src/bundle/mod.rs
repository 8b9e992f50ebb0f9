//! Bundle configuration handed to the external bundling engine.

pub(crate) mod helpers;
mod engine;
mod types;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub use engine::{
    EngineModuleSideEffects, EngineOptions, EngineOutputOptions, EngineTreeshake,
    EngineTreeshakeOptions,
};
pub use types::OutputFormat;

use crate::error::{ConfigError, Result};
use crate::treeshake::{Treeshake, TreeshakeOptions};

/// Main bundle configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleOptions {
    /// Entry modules
    #[serde(default)]
    pub input: Vec<PathBuf>,

    #[serde(default)]
    pub output: OutputOptions,

    /// External modules (not bundled, resolved at runtime)
    #[serde(default)]
    pub external: Vec<String>,

    /// Plugin names, passed through to the engine host untouched
    #[serde(default)]
    pub plugins: Vec<String>,

    #[serde(default)]
    pub treeshake: Treeshake,
}

/// Where and how chunks are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Output directory (defaults to `dist`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Single output file, for single-entry builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Emit one chunk per module instead of merging them
    #[serde(default)]
    pub preserve_modules: bool,
}

impl OutputOptions {
    /// Directory chunks end up in: `dir`, else the parent of `file`, else `dist`.
    pub fn output_dir(&self) -> PathBuf {
        match (&self.dir, &self.file) {
            (Some(dir), _) => dir.clone(),
            (None, Some(file)) => file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            (None, None) => helpers::default_output_dir(),
        }
    }
}

impl BundleOptions {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use sift_config::{BundleOptions, OutputFormat};
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let value = json!({
    ///     "input": ["app/main.js"],
    ///     "output": { "format": "cjs", "preserve_modules": true }
    /// });
    ///
    /// let options = BundleOptions::from_value(value).unwrap();
    /// assert_eq!(options.input, vec![PathBuf::from("app/main.js")]);
    /// assert_eq!(options.output.format, OutputFormat::Cjs);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "bundle".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "bundle".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// The configuration this project ships with: one CommonJS entry with
    /// preserved module structure, resolved through the CommonJS and node
    /// resolution plugins, tree-shaken with [`TreeshakeOptions::app_defaults`].
    pub fn app_defaults() -> Self {
        Self {
            input: vec![PathBuf::from("app/main.js")],
            output: OutputOptions {
                dir: Some(helpers::default_output_dir()),
                file: None,
                format: OutputFormat::Cjs,
                preserve_modules: true,
            },
            external: Vec::new(),
            plugins: vec!["commonjs".to_string(), "node-resolve".to_string()],
            treeshake: Treeshake::Options(TreeshakeOptions::app_defaults()),
        }
    }

    /// Separate the plugin list from the rest of the options.
    ///
    /// Hosts that bring their own plugin pipeline (a dev-server builder, for
    /// instance) re-use everything else as-is.
    ///
    /// # Example
    ///
    /// ```
    /// use sift_config::BundleOptions;
    ///
    /// let (plugins, rest) = BundleOptions::app_defaults().split_plugins();
    /// assert_eq!(plugins, vec!["commonjs", "node-resolve"]);
    /// assert!(rest.plugins.is_empty());
    /// ```
    pub fn split_plugins(mut self) -> (Vec<String>, Self) {
        let plugins = std::mem::take(&mut self.plugins);
        (plugins, self)
    }

    /// Render the options in the engine's own vocabulary.
    pub fn engine_options(&self) -> Result<EngineOptions> {
        EngineOptions::from_bundle(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_dir_prefers_dir() {
        let output = OutputOptions {
            dir: Some(PathBuf::from("out")),
            file: Some(PathBuf::from("build/bundle.js")),
            ..OutputOptions::default()
        };
        assert_eq!(output.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn output_dir_falls_back_to_file_parent() {
        let output = OutputOptions {
            file: Some(PathBuf::from("build/bundle.js")),
            ..OutputOptions::default()
        };
        assert_eq!(output.output_dir(), PathBuf::from("build"));
    }

    #[test]
    fn output_dir_defaults_to_dist() {
        assert_eq!(OutputOptions::default().output_dir(), PathBuf::from("dist"));
    }

    #[test]
    fn app_defaults_round_trip_through_value() {
        let options = BundleOptions::app_defaults();
        let value = options.to_value().unwrap();
        assert_eq!(value["output"]["format"], json!("cjs"));
        assert_eq!(value["output"]["preserve_modules"], json!(true));
        assert_eq!(BundleOptions::from_value(value).unwrap(), options);
    }
}
