//! # sift-config
//!
//! Tree-shaking policy and bundle configuration for an external bundling
//! engine.
//!
//! The centrepiece is the module side-effect policy: for every module in the
//! dependency graph the engine asks whether the module may be dropped when
//! nothing imports a binding from it. [`module_side_effect_policy`] is the
//! project's answer; [`ModuleSideEffects`] is the configurable form of the same
//! idea.
//!
//! ```
//! use sift_config::{BundleOptions, module_side_effect_policy};
//!
//! let treeshake = BundleOptions::app_defaults().treeshake.normalize().unwrap();
//! let id = "/project/node_modules/react-scan/dist/native.js";
//!
//! assert!(!module_side_effect_policy(id, true));
//! assert_eq!(treeshake.module_has_side_effects(id, true), module_side_effect_policy(id, true));
//! ```

pub mod bundle;
pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod settings;
pub mod treeshake;
pub mod validation;

// Re-export main types
pub use bundle::*;
pub use config::*;
pub use error::*;
pub use settings::*;
pub use treeshake::*;

// Re-export discovery, loading and validation
pub use discovery::{ConfigDiscovery, load_file};
pub use loading::ConfigLoader;
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
