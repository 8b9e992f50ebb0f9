//! Sift CLI entry point: argument parsing, logging setup and command dispatch.

use clap::Parser;
use miette::Result;
use sift_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let global = args.global_options();
    let settings = commands::utils::load_settings(&global);

    logger::init_logger(args.verbose, args.quiet, args.no_color, &settings);
    ui::init_colors(args.no_color);
    ui::set_quiet(args.quiet);

    let result = match args.command {
        cli::Command::Eval(eval_args) => commands::eval_execute(eval_args, &global).await,
        cli::Command::Plan(plan_args) => commands::plan_execute(plan_args, &global).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args, &global).await,
        cli::Command::Print(print_args) => commands::print_execute(print_args, &global).await,
        cli::Command::Init(init_args) => commands::init_execute(init_args, &global).await,
    };

    result.map_err(error::cli_error_to_miette)
}
