//! Module inclusion planning.
//!
//! Starting from the entries, an import edge pulls its target into the bundle
//! when the importer uses one of the target's bindings or when the target has
//! side effects. Everything else is left out, with the reason recorded.

use std::collections::VecDeque;

use serde::Serialize;
use sift_config::{BundleOptions, NormalizedTreeshakeOptions};

use crate::ModuleId;
use crate::error::Result;
use crate::graph::ModuleGraph;
use crate::side_effects::{
    DeterminedSideEffects, initial_side_effects_parallel, propagate_side_effects,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionReason {
    /// No included module imports it
    Unreachable,
    /// Imported, but only for side effects it does not have
    SideEffectFree,
}

impl ExclusionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ExclusionReason::Unreachable => "unreachable",
            ExclusionReason::SideEffectFree => "side-effect-free",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedModule {
    pub id: ModuleId,
    pub reason: ExclusionReason,
}

/// Result of planning: included modules in discovery order, excluded modules
/// in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InclusionPlan {
    pub included: Vec<ModuleId>,
    pub excluded: Vec<ExcludedModule>,
}

impl InclusionPlan {
    pub fn is_included(&self, id: &str) -> bool {
        self.included.iter().any(|included| included.as_str() == id)
    }

    pub fn exclusion_reason(&self, id: &str) -> Option<ExclusionReason> {
        self.excluded
            .iter()
            .find(|excluded| excluded.id.as_str() == id)
            .map(|excluded| excluded.reason)
    }
}

/// Plans module inclusion for one normalized tree-shaking configuration.
///
/// # Example
///
/// ```
/// use sift_config::TreeshakeOptions;
/// use sift_graph::{GraphManifest, ModuleGraph, ModuleRecord, Planner};
///
/// let shim = "/p/node_modules/react-scan/dist/native.js";
/// let graph = ModuleGraph::from_manifest(GraphManifest {
///     entries: vec!["/p/app/main.js".into()],
///     modules: vec![
///         ModuleRecord::new("/p/app/main.js").import(shim, &[]),
///         ModuleRecord::new(shim).side_effects(true),
///     ],
/// })
/// .unwrap();
///
/// let planner = Planner::new(TreeshakeOptions::app_defaults().normalize().unwrap());
/// let plan = planner.plan(&graph).unwrap();
/// assert!(!plan.is_included(shim));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    treeshake: NormalizedTreeshakeOptions,
    jobs: Option<usize>,
}

impl Planner {
    pub fn new(treeshake: NormalizedTreeshakeOptions) -> Self {
        Self {
            treeshake,
            jobs: None,
        }
    }

    /// Planner for the bundle's tree-shaking settings.
    pub fn from_bundle(bundle: &BundleOptions) -> Result<Self> {
        Ok(Self::new(bundle.treeshake.normalize()?))
    }

    /// Worker threads for the policy pass; `None` uses the global rayon pool.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn treeshake(&self) -> &NormalizedTreeshakeOptions {
        &self.treeshake
    }

    /// Final side-effect verdict for every module, in module-table order.
    pub fn side_effects(&self, graph: &ModuleGraph) -> Result<Vec<DeterminedSideEffects>> {
        let initial = match self.jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()?
                .install(|| initial_side_effects_parallel(graph, &self.treeshake)),
            None => initial_side_effects_parallel(graph, &self.treeshake),
        };
        Ok(propagate_side_effects(graph, &initial))
    }

    pub fn plan(&self, graph: &ModuleGraph) -> Result<InclusionPlan> {
        let side_effects = self.side_effects(graph)?;

        let mut included = vec![false; graph.len()];
        let mut referenced = vec![false; graph.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        for &entry in graph.entries() {
            if !included[entry.index()] {
                included[entry.index()] = true;
                order.push(entry);
                queue.push_back(entry);
            }
        }

        while let Some(idx) = queue.pop_front() {
            for import in &graph.module(idx).imports {
                let target = import.target;
                referenced[target.index()] = true;
                if included[target.index()] {
                    continue;
                }
                if import.uses_bindings() || side_effects[target.index()].has_side_effects() {
                    included[target.index()] = true;
                    order.push(target);
                    queue.push_back(target);
                }
            }
        }

        let excluded: Vec<ExcludedModule> = graph
            .iter()
            .filter(|(idx, _)| !included[idx.index()])
            .map(|(idx, module)| ExcludedModule {
                id: module.id.clone(),
                reason: if referenced[idx.index()] {
                    ExclusionReason::SideEffectFree
                } else {
                    ExclusionReason::Unreachable
                },
            })
            .collect();

        tracing::debug!(
            included = order.len(),
            excluded = excluded.len(),
            "planned module inclusion"
        );

        Ok(InclusionPlan {
            included: order
                .into_iter()
                .map(|idx| graph.module(idx).id.clone())
                .collect(),
            excluded,
        })
    }
}
