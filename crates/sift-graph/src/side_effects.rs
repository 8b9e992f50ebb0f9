//! Per-module side-effect determination.
//!
//! Every module starts from one of three verdicts: tree-shaking is off, the
//! configured policy declared it side-effect free, or the engine's own
//! analysis. Analyzed verdicts are then propagated along import edges: a
//! module whose own statements are pure still has side effects when anything
//! it imports does.

use rayon::prelude::*;
use serde::Serialize;
use sift_config::NormalizedTreeshakeOptions;

use crate::graph::{Module, ModuleGraph, ModuleIdx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DeterminedSideEffects {
    /// Derived from the engine's analysis, possibly raised by propagation
    Analyzed(bool),
    /// Fixed by the module side-effect policy; never propagated
    UserDefined(bool),
    /// Tree-shaking is disabled, the module is always retained
    NoTreeshake,
}

impl DeterminedSideEffects {
    pub fn has_side_effects(self) -> bool {
        match self {
            Self::Analyzed(v) | Self::UserDefined(v) => v,
            Self::NoTreeshake => true,
        }
    }
}

fn initial_for(module: &Module, treeshake: &NormalizedTreeshakeOptions) -> DeterminedSideEffects {
    if !treeshake.enabled {
        return DeterminedSideEffects::NoTreeshake;
    }
    if !treeshake.module_has_side_effects(module.id.as_str(), module.is_external) {
        return DeterminedSideEffects::UserDefined(false);
    }
    DeterminedSideEffects::Analyzed(module.has_side_effects.unwrap_or(true))
}

/// Policy verdicts in module-table order, evaluated on the current thread.
pub fn initial_side_effects(
    graph: &ModuleGraph,
    treeshake: &NormalizedTreeshakeOptions,
) -> Vec<DeterminedSideEffects> {
    graph
        .iter()
        .map(|(_, module)| initial_for(module, treeshake))
        .collect()
}

/// Same as [`initial_side_effects`], spread over the current rayon pool.
pub fn initial_side_effects_parallel(
    graph: &ModuleGraph,
    treeshake: &NormalizedTreeshakeOptions,
) -> Vec<DeterminedSideEffects> {
    (0..graph.len())
        .into_par_iter()
        .map(|idx| initial_for(graph.module(ModuleIdx::new(idx)), treeshake))
        .collect()
}

/// Raise `Analyzed(false)` to `Analyzed(true)` for every module that
/// transitively imports a module with side effects.
///
/// Works backwards from the modules that already have side effects, so cycles
/// need no special handling and every module is visited at most once.
pub fn propagate_side_effects(
    graph: &ModuleGraph,
    initial: &[DeterminedSideEffects],
) -> Vec<DeterminedSideEffects> {
    let mut importers: Vec<Vec<ModuleIdx>> = vec![Vec::new(); graph.len()];
    for (idx, module) in graph.iter() {
        for import in &module.imports {
            importers[import.target.index()].push(idx);
        }
    }

    let mut determined = initial.to_vec();
    let mut stack: Vec<ModuleIdx> = determined
        .iter()
        .enumerate()
        .filter(|(_, side_effects)| side_effects.has_side_effects())
        .map(|(idx, _)| ModuleIdx::new(idx))
        .collect();

    while let Some(idx) = stack.pop() {
        for &importer in &importers[idx.index()] {
            let slot = &mut determined[importer.index()];
            if *slot == DeterminedSideEffects::Analyzed(false) {
                *slot = DeterminedSideEffects::Analyzed(true);
                tracing::trace!(
                    module = %graph.module(importer).id,
                    via = %graph.module(idx).id,
                    "side effects propagated"
                );
                stack.push(importer);
            }
        }
    }

    determined
}
