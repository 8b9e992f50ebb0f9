//! Eval command implementation.
//!
//! Answers the bundler's per-module question for ids given on the command line.

use crate::cli::{EvalArgs, GlobalOptions};
use crate::commands::utils;
use crate::error::Result;
use serde::Serialize;
use sift_config::module_side_effect_policy;

#[derive(Debug, Serialize)]
struct Verdict<'a> {
    id: &'a str,
    external: bool,
    side_effects: bool,
}

impl Verdict<'_> {
    fn label(&self) -> &'static str {
        if self.side_effects { "retain" } else { "drop" }
    }
}

/// Execute the eval command.
///
/// With `--default-policy` the built-in policy is used and no configuration is
/// read. Otherwise the configured tree-shaking options decide, including
/// `treeshake = false`, which retains everything.
pub async fn execute(args: EvalArgs, global: &GlobalOptions) -> Result<()> {
    let decide: Box<dyn Fn(&str, bool) -> bool> = if args.default_policy {
        Box::new(module_side_effect_policy)
    } else {
        let config = utils::load_config(global)?;
        let treeshake = config.bundle.treeshake.normalize()?;
        Box::new(move |id: &str, external: bool| {
            treeshake.module_has_side_effects(id, external)
        })
    };

    let verdicts: Vec<Verdict<'_>> = args
        .ids
        .iter()
        .map(|id| Verdict {
            id: id.as_str(),
            external: args.external,
            side_effects: decide(id.as_str(), args.external),
        })
        .collect();

    for verdict in &verdicts {
        tracing::debug!(
            module = verdict.id,
            external = verdict.external,
            side_effects = verdict.side_effects,
            "evaluated module"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
    } else {
        for verdict in &verdicts {
            println!("{}\t{}", verdict.label(), verdict.id);
        }
    }

    Ok(())
}
