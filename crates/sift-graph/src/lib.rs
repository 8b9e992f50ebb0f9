//! # sift-graph
//!
//! Module inclusion planning on top of the side-effect policy.
//!
//! The bundling engine reports the resolved module graph as a
//! [`GraphManifest`]. [`Planner`] combines it with the normalized tree-shaking
//! options from `sift-config` and works out which modules end up in the
//! bundle and why the rest were dropped.
//!
//! ```text
//! GraphManifest ──► ModuleGraph ──► policy pass (rayon) ──► propagation ──► InclusionPlan
//! ```

pub mod error;
pub mod graph;
pub mod manifest;
pub mod module_id;
pub mod plan;
pub mod side_effects;

pub use error::{GraphError, Result};
pub use graph::{Import, Module, ModuleGraph, ModuleIdx};
pub use manifest::{GraphManifest, ImportRecord, ModuleRecord};
pub use module_id::ModuleId;
pub use plan::{ExcludedModule, ExclusionReason, InclusionPlan, Planner};
pub use side_effects::{
    DeterminedSideEffects, initial_side_effects, initial_side_effects_parallel,
    propagate_side_effects,
};
