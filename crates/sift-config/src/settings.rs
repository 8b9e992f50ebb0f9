//! Global configuration settings shared across profiles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// `tracing` filter directive used when neither a CLI flag nor `RUST_LOG`
    /// picks one, e.g. `"debug"` or `"sift_graph=trace"`
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub log_format: Option<LogFormat>,

    /// Worker threads for graph planning (defaults to the number of CPUs)
    #[serde(default)]
    pub parallel_jobs: Option<usize>,
}

/// Layout of log lines on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One abbreviated line per event
    #[default]
    Compact,
    /// One line per event with the full span context
    Full,
    /// Multi-line, human-oriented output
    Pretty,
}
