//! Init command implementation.

use crate::cli::{GlobalOptions, InitArgs};
use crate::commands::{templates, utils};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use sift_config::discovery::CONFIG_FILE_NAME;
use std::path::{Path, PathBuf};

/// Execute the init command.
///
/// Writes the default configuration to `--config` or `./sift.toml`. An
/// existing file is only replaced with `--force`.
pub async fn execute(args: InitArgs, global: &GlobalOptions) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let target = utils::resolve_path(
        global
            .config
            .as_deref()
            .unwrap_or_else(|| Path::new(CONFIG_FILE_NAME)),
        &cwd,
    );

    if tokio::fs::try_exists(&target).await? && !args.force {
        return Err(CliError::FileExists(target));
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .context(format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&target, templates::SIFT_TOML)
        .await
        .context(format!("Failed to write {}", target.display()))?;

    ui::success(&format!("Created {}", display_relative(&target, &cwd).display()));
    Ok(())
}

fn display_relative(path: &Path, cwd: &Path) -> PathBuf {
    path.strip_prefix(cwd)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
}
