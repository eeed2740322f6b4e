//! Entity → in-scope classes reverse index.
//!
//! Inverting class membership once lets the counter visit every edge a single
//! time instead of intersecting the edge list with every class pair.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::config::EntityKind;
use crate::error::Result;
use crate::graph::class_registry::EntityClassRegistry;
use crate::graph::network_index::NetworkIndex;

/// Position of a class in the sorted in-scope class list.
pub type ClassId = usize;

/// Maps each network entity to the sorted ids of the in-scope classes it belongs to.
pub struct ClassReverseIndex {
    /// ClassId → class key, sorted
    classes: Vec<String>,
    /// class key → ClassId
    class_ids: HashMap<String, ClassId>,
    /// NodeIndex → sorted class ids
    by_entity: Vec<Vec<ClassId>>,
}

impl ClassReverseIndex {
    /// Invert membership of the in-scope classes over the network's entities.
    ///
    /// Members absent from the network cannot take part in any edge and are
    /// left out. With `kind` set, members of other kinds are left out too.
    pub fn build(
        registry: &EntityClassRegistry,
        network: &NetworkIndex,
        scope_filter: Option<&[String]>,
        kind: Option<EntityKind>,
    ) -> Result<Self> {
        let classes: Vec<String> = registry
            .iter_classes(scope_filter)
            .map(String::from)
            .collect();
        let mut by_entity: Vec<Vec<ClassId>> = vec![Vec::new(); network.entity_count()];

        for (class_id, key) in classes.iter().enumerate() {
            for member in registry.members(key, kind)? {
                if let Some(idx) = network.node_index(member) {
                    by_entity[idx.index()].push(class_id);
                }
            }
        }

        let classified = by_entity.iter().filter(|c| !c.is_empty()).count();
        log::info!(
            "Reverse index: {} in-scope classes, {} of {} network entities classified.",
            classes.len(),
            classified,
            by_entity.len(),
        );

        let class_ids = classes
            .iter()
            .enumerate()
            .map(|(id, key)| (key.clone(), id))
            .collect();

        Ok(Self {
            classes,
            class_ids,
            by_entity,
        })
    }

    /// In-scope classes of an entity; empty if it is unclassified.
    pub fn classes_of(&self, entity: NodeIndex) -> &[ClassId] {
        self.by_entity
            .get(entity.index())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn class_key(&self, id: ClassId) -> &str {
        &self.classes[id]
    }

    pub fn class_keys(&self) -> &[String] {
        &self.classes
    }

    pub fn class_id(&self, key: &str) -> Option<ClassId> {
        self.class_ids.get(key).copied()
    }
}
