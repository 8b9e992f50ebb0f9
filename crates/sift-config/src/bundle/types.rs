use serde::{Deserialize, Serialize};

/// Output format for generated chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ECMAScript modules (engine default)
    #[default]
    Esm,
    /// CommonJS (`require` / `module.exports`)
    Cjs,
    /// Immediately invoked function expression
    Iife,
}

impl OutputFormat {
    /// The name the engine uses for this format.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Esm => "es",
            OutputFormat::Cjs => "cjs",
            OutputFormat::Iife => "iife",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
