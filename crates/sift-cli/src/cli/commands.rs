use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{parse_jobs, parse_module_id};

/// Available Sift subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the side-effect policy for module ids
    ///
    /// Prints `retain` for modules the bundler must keep even when unused and
    /// `drop` for modules it may elide when nothing imports a binding from them.
    Eval(EvalArgs),

    /// Plan module inclusion for a resolved module graph
    ///
    /// Reads a JSON graph manifest reported by the bundler and lists which
    /// modules end up in the bundle and why the others were left out.
    Plan(PlanArgs),

    /// Validate configuration
    ///
    /// Loads sift.toml (or the "sift" field of package.json), applies the
    /// selected profile and checks the result.
    Check(CheckArgs),

    /// Print the options handed to the bundling engine as JSON
    Print(PrintArgs),

    /// Write a sift.toml with the project's default configuration
    Init(InitArgs),
}

/// Arguments for the eval command
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Module ids to evaluate
    ///
    /// Examples:
    ///   sift eval /project/node_modules/react-scan/dist/native.js
    ///   sift eval --external lodash /project/src/index.js
    #[arg(required = true, value_name = "ID", value_parser = parse_module_id)]
    pub ids: Vec<String>,

    /// Treat the modules as external
    #[arg(long)]
    pub external: bool,

    /// Use the built-in policy instead of the configured one
    ///
    /// Skips loading configuration entirely.
    #[arg(long)]
    pub default_policy: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Graph manifest (JSON)
    #[arg(value_name = "GRAPH")]
    pub graph: PathBuf,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Worker threads for the policy pass
    ///
    /// Defaults to `settings.parallel_jobs`, then to the number of CPUs.
    #[arg(short, long, value_name = "N", value_parser = parse_jobs)]
    pub jobs: Option<usize>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also check that input modules exist on disk
    #[arg(long)]
    pub fs: bool,
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Omit the plugin list
    ///
    /// For hosts that bring their own plugin pipeline and only need the
    /// remaining options.
    #[arg(long)]
    pub without_plugins: bool,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(short, long)]
    pub force: bool,
}
