//! Coverage of every class by the network, split by entity kind.

use crate::config::{CoverageRecord, EntityKind};
use crate::error::Result;
use crate::graph::class_registry::EntityClassRegistry;
use crate::graph::network_index::NetworkIndex;

/// One record per class and entity kind, for every class of the registry.
pub fn build_coverage_table(
    registry: &EntityClassRegistry,
    network: &NetworkIndex,
) -> Result<Vec<CoverageRecord>> {
    let mut records = Vec::with_capacity(registry.len() * EntityKind::ALL.len());

    for key in registry.iter_classes(None) {
        let meta = registry.metadata(key)?;
        for kind in EntityKind::ALL {
            let members = registry.members(key, Some(kind))?;
            let in_network = members.iter().filter(|id| network.has_entity(id)).count();
            records.push(CoverageRecord {
                typ: meta.scope.to_string(),
                cls: key.to_string(),
                cls_label: meta.label.to_string(),
                resource: meta.resource.to_string(),
                entity_type: kind,
                total: members.len(),
                in_network,
            });
        }
    }

    Ok(records)
}
