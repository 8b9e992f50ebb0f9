//! JSON description of a resolved module graph, as reported by the engine.
//!
//! ```json
//! {
//!   "entries": ["/p/app/main.js"],
//!   "modules": [
//!     {
//!       "id": "/p/app/main.js",
//!       "imports": [{ "target": "/p/node_modules/react-scan/dist/native.js", "bindings": [] }]
//!     },
//!     { "id": "/p/node_modules/react-scan/dist/native.js", "has_side_effects": true }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ModuleId;
use crate::error::{GraphError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphManifest {
    #[serde(default)]
    pub entries: Vec<ModuleId>,

    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: ModuleId,

    #[serde(default)]
    pub external: bool,

    /// Statement-level analysis result; unknown when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_side_effects: Option<bool>,

    #[serde(default)]
    pub imports: Vec<ImportRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub target: ModuleId,

    /// Names the importer actually uses; empty for bare `import "x"`
    #[serde(default)]
    pub bindings: Vec<String>,
}

impl ModuleRecord {
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id: id.into(),
            external: false,
            has_side_effects: None,
            imports: Vec::new(),
        }
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn side_effects(mut self, has_side_effects: bool) -> Self {
        self.has_side_effects = Some(has_side_effects);
        self
    }

    /// Import `target`, using the given bindings.
    pub fn import(mut self, target: impl Into<ModuleId>, bindings: &[&str]) -> Self {
        self.imports.push(ImportRecord {
            target: target.into(),
            bindings: bindings.iter().map(|b| (*b).to_string()).collect(),
        });
        self
    }
}

impl GraphManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GraphError::InvalidManifest {
            message: e.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
