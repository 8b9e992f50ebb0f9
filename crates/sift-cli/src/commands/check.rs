//! Check command implementation.
//!
//! Validates configuration without touching the module graph.

use crate::cli::{CheckArgs, GlobalOptions};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use sift_config::{validate_fs, validate_schema};

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Locate and load the config file, apply env overrides and the profile
/// 2. Schema validation (inputs, output options, side-effect rules)
/// 3. Input modules exist on disk (if `--fs`)
pub async fn execute(args: CheckArgs, global: &GlobalOptions) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let loader = utils::config_loader(global, &cwd);

    let Some(source) = loader.source_file() else {
        ui::warning("No sift.toml or package.json \"sift\" field found, nothing to check");
        return Ok(());
    };

    ui::info(&format!("Checking {}", source.display()));
    let config = loader.load()?;

    validate_schema(&config.bundle)?;
    ui::success("Configuration is valid");

    if args.fs {
        ui::info("Checking input modules...");
        validate_fs(&config.bundle, &cwd)?;
        for input in &config.bundle.input {
            ui::success(&format!("  {} exists", input.display()));
        }
    }

    let treeshake = config.bundle.treeshake.normalize()?;
    if !treeshake.enabled {
        ui::warning("Tree-shaking is disabled; every module will be retained");
    }

    ui::success("All checks passed!");
    Ok(())
}
