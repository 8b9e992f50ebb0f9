//! Validated, index-addressed module graph.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::ModuleId;
use crate::error::{GraphError, Result};
use crate::manifest::GraphManifest;

/// Position of a module in the graph's module table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleIdx(usize);

impl ModuleIdx {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A module node. Imports are resolved to indices at construction time.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub is_external: bool,
    /// Engine's statement-level analysis; `None` when it was not reported
    pub has_side_effects: Option<bool>,
    pub imports: Vec<Import>,
}

#[derive(Debug, Clone)]
pub struct Import {
    pub target: ModuleIdx,
    pub bindings: Vec<String>,
}

impl Import {
    /// Whether the importer references anything the target exports.
    pub fn uses_bindings(&self) -> bool {
        !self.bindings.is_empty()
    }
}

/// Module table in manifest order plus the entry list.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    modules: IndexMap<ModuleId, Module, FxBuildHasher>,
    entries: Vec<ModuleIdx>,
}

impl ModuleGraph {
    /// Build the graph, rejecting duplicate ids, dangling imports and unknown entries.
    pub fn from_manifest(manifest: GraphManifest) -> Result<Self> {
        let mut modules: IndexMap<ModuleId, Module, FxBuildHasher> =
            IndexMap::with_capacity_and_hasher(manifest.modules.len(), FxBuildHasher);

        for record in &manifest.modules {
            if modules.contains_key(&record.id) {
                return Err(GraphError::DuplicateModule(record.id.clone()));
            }
            modules.insert(
                record.id.clone(),
                Module {
                    id: record.id.clone(),
                    is_external: record.external,
                    has_side_effects: record.has_side_effects,
                    imports: Vec::with_capacity(record.imports.len()),
                },
            );
        }

        for (idx, record) in manifest.modules.into_iter().enumerate() {
            let mut imports = Vec::with_capacity(record.imports.len());
            for import in record.imports {
                let target = modules.get_index_of(&import.target).ok_or_else(|| {
                    GraphError::UnknownImport {
                        importer: record.id.clone(),
                        target: import.target.clone(),
                    }
                })?;
                imports.push(Import {
                    target: ModuleIdx(target),
                    bindings: import.bindings,
                });
            }
            if let Some((_, module)) = modules.get_index_mut(idx) {
                module.imports = imports;
            }
        }

        let entries = manifest
            .entries
            .into_iter()
            .map(|entry| {
                modules
                    .get_index_of(&entry)
                    .map(ModuleIdx)
                    .ok_or(GraphError::UnknownEntry(entry))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            modules = modules.len(),
            entries = entries.len(),
            "built module graph"
        );

        Ok(Self { modules, entries })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn entries(&self) -> &[ModuleIdx] {
        &self.entries
    }

    /// Module at `idx`. Indices handed out by this graph are always valid.
    pub fn module(&self, idx: ModuleIdx) -> &Module {
        &self.modules[idx.0]
    }

    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn index_of(&self, id: &str) -> Option<ModuleIdx> {
        self.modules.get_index_of(id).map(ModuleIdx)
    }

    /// Modules with their indices, in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleIdx, &Module)> {
        self.modules
            .values()
            .enumerate()
            .map(|(idx, module)| (ModuleIdx(idx), module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ModuleRecord;

    fn manifest(entries: &[&str], modules: Vec<ModuleRecord>) -> GraphManifest {
        GraphManifest {
            entries: entries.iter().map(|e| ModuleId::new(e)).collect(),
            modules,
        }
    }

    #[test]
    fn resolves_imports_to_indices() {
        let graph = ModuleGraph::from_manifest(manifest(
            &["a.js"],
            vec![
                ModuleRecord::new("a.js").import("b.js", &["x"]),
                ModuleRecord::new("b.js"),
            ],
        ))
        .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.entries(), &[ModuleIdx(0)]);
        let a = graph.get("a.js").unwrap();
        assert_eq!(a.imports[0].target, graph.index_of("b.js").unwrap());
        assert!(a.imports[0].uses_bindings());
        assert_eq!(graph.module(ModuleIdx(1)).id.as_str(), "b.js");
    }

    #[test]
    fn duplicate_module_is_rejected() {
        let err = ModuleGraph::from_manifest(manifest(
            &[],
            vec![ModuleRecord::new("a.js"), ModuleRecord::new("a.js")],
        ))
        .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateModule(id) if id.as_str() == "a.js"));
    }

    #[test]
    fn dangling_import_is_rejected() {
        let err = ModuleGraph::from_manifest(manifest(
            &["a.js"],
            vec![ModuleRecord::new("a.js").import("missing.js", &[])],
        ))
        .unwrap_err();
        match err {
            GraphError::UnknownImport { importer, target } => {
                assert_eq!(importer.as_str(), "a.js");
                assert_eq!(target.as_str(), "missing.js");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_entry_is_rejected() {
        let err = ModuleGraph::from_manifest(manifest(&["main.js"], vec![ModuleRecord::new("a.js")]))
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownEntry(_)));
    }
}
