//! Class annotations by entity: one row per class membership.

use crate::config::{AnnotationRecord, EntityKind};
use crate::error::Result;
use crate::graph::class_registry::EntityClassRegistry;

/// Every member of every class, with the class's metadata. Rows follow
/// sorted class keys, then sorted entity ids; no kind filter applies.
pub fn build_annotation_table(registry: &EntityClassRegistry) -> Result<Vec<AnnotationRecord>> {
    let mut records = Vec::new();

    for key in registry.iter_classes(None) {
        let meta = registry.metadata(key)?;
        let mut members: Vec<&str> = registry.members(key, None)?.into_iter().collect();
        members.sort_unstable();

        records.extend(members.into_iter().map(|id| AnnotationRecord {
            entity_id: id.to_string(),
            is_complex: registry.predicate().kind_of(id) == EntityKind::Complex,
            cls: key.to_string(),
            parent: meta.parent.unwrap_or("").to_string(),
            resource_label: meta.resource.to_string(),
            class_label: meta.label.to_string(),
            class_type: meta.scope.to_string(),
        }));
    }

    log::debug!("Annotation table has {} rows.", records.len());
    Ok(records)
}
