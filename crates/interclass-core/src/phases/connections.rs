//! Per-mode connection tables: one count per class pair.
//!
//! Symmetric modes enumerate unordered pairs, directed modes every ordered pair.
//! Sizes are whole class sizes, independent of the entity kind filter.

use crate::config::{ConnectionMode, ConnectionRecord};
use crate::error::Result;
use crate::graph::class_registry::EntityClassRegistry;
use crate::graph::reverse_index::{ClassId, ClassReverseIndex};
use crate::phases::counting::ConnectionCounts;

pub fn build_connection_table(
    registry: &EntityClassRegistry,
    index: &ClassReverseIndex,
    counts: &ConnectionCounts,
    mode: ConnectionMode,
) -> Result<Vec<ConnectionRecord>> {
    let n = index.class_count();
    let mut labels = Vec::with_capacity(n);
    let mut sizes = Vec::with_capacity(n);
    for key in index.class_keys() {
        labels.push(registry.metadata(key)?.label);
        sizes.push(registry.members(key, None)?.len());
    }

    let pairs: Vec<(ClassId, ClassId)> = if mode.is_symmetric() {
        (0..n).flat_map(|i| (i..n).map(move |j| (i, j))).collect()
    } else {
        (0..n).flat_map(|i| (0..n).map(move |j| (i, j))).collect()
    };

    Ok(pairs
        .into_iter()
        .map(|(i, j)| ConnectionRecord {
            cat0: index.class_key(i).to_string(),
            cat1: index.class_key(j).to_string(),
            label0: labels[i].to_string(),
            label1: labels[j].to_string(),
            size0: sizes[i],
            size1: sizes[j],
            conn: counts.count(mode, i, j),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ClassDefinition, Effect, EntityKind, EntityKindPredicate, Interaction,
        DEFAULT_COMPLEX_PATTERN,
    };
    use crate::graph::network_index::NetworkIndex;
    use crate::phases::counting::InterClassConnectionCounter;

    #[test]
    fn enumeration_depends_on_mode() {
        let predicate = EntityKindPredicate::new(DEFAULT_COMPLEX_PATTERN).unwrap();
        let registry = EntityClassRegistry::new(
            vec![
                ClassDefinition::new("a", ["P1"]),
                ClassDefinition::new("b", ["P2"]),
                ClassDefinition::new("c", ["P3"]),
            ],
            predicate.clone(),
        )
        .unwrap();
        let network = NetworkIndex::new(
            &[Interaction::directed("P2", "P1", Effect::Stimulation)],
            &predicate,
        );
        let index = ClassReverseIndex::build(&registry, &network, None, None).unwrap();
        let (counts, _) = InterClassConnectionCounter::new(&index, &network).run();

        let all = build_connection_table(&registry, &index, &counts, ConnectionMode::All).unwrap();
        assert_eq!(all.len(), 6);
        let ab = all.iter().find(|r| r.cat0 == "a" && r.cat1 == "b").unwrap();
        assert_eq!(ab.conn, 1);

        let stim =
            build_connection_table(&registry, &index, &counts, ConnectionMode::Stimulatory).unwrap();
        assert_eq!(stim.len(), 9);
        let ba = stim.iter().find(|r| r.cat0 == "b" && r.cat1 == "a").unwrap();
        assert_eq!(ba.conn, 1);
        let ab = stim.iter().find(|r| r.cat0 == "a" && r.cat1 == "b").unwrap();
        assert_eq!(ab.conn, 0);
    }

    #[test]
    fn sizes_ignore_the_kind_filter() {
        let predicate = EntityKindPredicate::new(DEFAULT_COMPLEX_PATTERN).unwrap();
        let registry = EntityClassRegistry::new(
            vec![ClassDefinition::new("a", ["P1", "COMPLEX:P1_P2"])],
            predicate.clone(),
        )
        .unwrap();
        let network = NetworkIndex::new(
            &[Interaction::directed("P1", "COMPLEX:P1_P2", Effect::Stimulation)],
            &predicate,
        );
        let index =
            ClassReverseIndex::build(&registry, &network, None, Some(EntityKind::Protein)).unwrap();
        let (counts, _) = InterClassConnectionCounter::new(&index, &network).run();

        let rows =
            build_connection_table(&registry, &index, &counts, ConnectionMode::Directed).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].size0, rows[0].size1), (2, 2));
        // the complex endpoint is filtered out of the counts
        assert_eq!(rows[0].conn, 0);
    }
}
