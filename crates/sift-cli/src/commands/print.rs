//! Print command implementation.

use crate::cli::{GlobalOptions, PrintArgs};
use crate::commands::utils;
use crate::error::Result;

/// Execute the print command: the engine options as pretty JSON on stdout.
pub async fn execute(args: PrintArgs, global: &GlobalOptions) -> Result<()> {
    let config = utils::load_config(global)?;

    let bundle = if args.without_plugins {
        let (plugins, rest) = config.bundle.split_plugins();
        tracing::debug!(?plugins, "omitting plugins");
        rest
    } else {
        config.bundle
    };

    let engine = bundle.engine_options()?;
    println!("{}", serde_json::to_string_pretty(&engine)?);
    Ok(())
}
