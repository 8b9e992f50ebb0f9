//! Plan command implementation.
//!
//! Reads a module graph manifest and prints which modules the bundle keeps.

use crate::cli::{GlobalOptions, PlanArgs};
use crate::commands::utils;
use crate::error::{Result, ResultExt};
use crate::ui;
use sift_graph::{GraphManifest, InclusionPlan, ModuleGraph, Planner};

/// Execute the plan command.
///
/// # Process
///
/// 1. Load configuration and build the planner from its tree-shaking options
/// 2. Read the graph manifest
/// 3. Plan and print included modules, then excluded modules with reasons
pub async fn execute(args: PlanArgs, global: &GlobalOptions) -> Result<()> {
    let config = utils::load_config(global)?;
    let jobs = args.jobs.or(config.settings.parallel_jobs);
    let planner = Planner::from_bundle(&config.bundle)?.with_jobs(jobs);

    let cwd = utils::get_cwd()?;
    let graph_path = utils::resolve_path(&args.graph, &cwd);
    let content = tokio::fs::read_to_string(&graph_path)
        .await
        .with_path(&graph_path)?;

    let manifest = GraphManifest::from_json(&content)?;
    let graph = ModuleGraph::from_manifest(manifest)?;
    tracing::info!(
        path = %graph_path.display(),
        modules = graph.len(),
        "loaded module graph"
    );

    let plan = planner.plan(&graph)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(&plan));
    }

    ui::success(&format!(
        "{} of {} modules included",
        plan.included.len(),
        graph.len()
    ));
    Ok(())
}

/// Plain-text rendering: one module per line, grouped by outcome.
pub fn render_plan(plan: &InclusionPlan) -> String {
    let mut out = String::new();

    out.push_str("included:\n");
    for id in &plan.included {
        out.push_str("  + ");
        out.push_str(id.as_str());
        out.push('\n');
    }

    if !plan.excluded.is_empty() {
        out.push_str("excluded:\n");
        for excluded in &plan.excluded {
            out.push_str(&format!(
                "  - {} ({})\n",
                excluded.id,
                excluded.reason.as_str()
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_graph::{ExcludedModule, ExclusionReason, ModuleId};

    #[test]
    fn test_render_plan() {
        let plan = InclusionPlan {
            included: vec![ModuleId::new("/p/main.js")],
            excluded: vec![
                ExcludedModule {
                    id: ModuleId::new("/p/node_modules/react-scan/dist/native.js"),
                    reason: ExclusionReason::SideEffectFree,
                },
                ExcludedModule {
                    id: ModuleId::new("/p/orphan.js"),
                    reason: ExclusionReason::Unreachable,
                },
            ],
        };

        assert_eq!(
            render_plan(&plan),
            "included:\n  + /p/main.js\nexcluded:\n  - /p/node_modules/react-scan/dist/native.js (side-effect-free)\n  - /p/orphan.js (unreachable)\n"
        );
    }

    #[test]
    fn test_render_plan_without_exclusions() {
        let plan = InclusionPlan {
            included: vec![ModuleId::new("a.js")],
            excluded: Vec::new(),
        };
        assert_eq!(render_plan(&plan), "included:\n  + a.js\n");
    }
}
