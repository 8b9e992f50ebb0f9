//! Command-line interface definition for Sift.
//!
//! # Command Structure
//!
//! - `sift eval` - Evaluate the module side-effect policy
//! - `sift plan` - Plan module inclusion for a module graph
//! - `sift check` - Configuration validation
//! - `sift print` - Show the engine options
//! - `sift init` - Write the default configuration

mod commands;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{CheckArgs, Command, EvalArgs, InitArgs, PlanArgs, PrintArgs};
pub use validation::{parse_jobs, parse_module_id};

/// Sift - tree-shaking policy for an external JavaScript bundler
#[derive(Parser, Debug)]
#[command(
    name = "sift",
    version,
    about = "Tree-shaking policy for an external JavaScript bundler",
    long_about = "Sift decides which modules the bundler may drop when nothing imports from them.\n\
                  It evaluates the module side-effect policy, plans module inclusion for a\n\
                  resolved graph and renders the options handed to the bundling engine."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file to use instead of searching the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Config profile to apply
    #[arg(short, long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub profile: Option<String>,
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            config: self.config.clone(),
            profile: self.profile.clone(),
        }
    }
}
