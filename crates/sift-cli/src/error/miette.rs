//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::{MietteDiagnostic, Report};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    let hint = err.hint();
    let code = match &err {
        CliError::Config(_) => Some("sift::config"),
        CliError::Graph(_) => Some("sift::graph"),
        CliError::FileExists(_) | CliError::FileNotFound(_) | CliError::Io(_) => Some("sift::io"),
        _ => None,
    };

    let mut diagnostic = MietteDiagnostic::new(err.to_string());
    if let Some(code) = code {
        diagnostic = diagnostic.with_code(code);
    }
    if let Some(hint) = hint {
        diagnostic = diagnostic.with_help(hint);
    }
    Report::new(diagnostic)
}
