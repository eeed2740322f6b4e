//! Member overlaps between every ordered pair of in-scope classes.

use std::collections::HashSet;

use crate::config::OverlapRecord;
use crate::error::Result;
use crate::graph::class_registry::EntityClassRegistry;

pub fn build_overlap_table(
    registry: &EntityClassRegistry,
    classes: &[String],
) -> Result<Vec<OverlapRecord>> {
    let members: Vec<HashSet<&str>> = classes
        .iter()
        .map(|key| registry.members(key, None))
        .collect::<Result<_>>()?;

    let mut records = Vec::with_capacity(classes.len() * classes.len());
    for (i, cat0) in classes.iter().enumerate() {
        for (j, cat1) in classes.iter().enumerate() {
            let overlap = members[i].intersection(&members[j]).count();
            records.push(OverlapRecord {
                cat0: cat0.clone(),
                cat1: cat1.clone(),
                size0: members[i].len(),
                size1: members[j].len(),
                total: members[i].len() + members[j].len() - overlap,
                overlap,
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClassDefinition, EntityKindPredicate, DEFAULT_COMPLEX_PATTERN};

    #[test]
    fn union_and_intersection() {
        let predicate = EntityKindPredicate::new(DEFAULT_COMPLEX_PATTERN).unwrap();
        let registry = EntityClassRegistry::new(
            vec![
                ClassDefinition::new("a", ["P1", "P2"]),
                ClassDefinition::new("b", ["P2", "P3", "P4"]),
            ],
            predicate,
        )
        .unwrap();
        let classes = vec!["a".to_string(), "b".to_string()];
        let records = build_overlap_table(&registry, &classes).unwrap();

        assert_eq!(records.len(), 4);
        let ab = &records[1];
        assert_eq!((ab.cat0.as_str(), ab.cat1.as_str()), ("a", "b"));
        assert_eq!(ab.overlap, 1);
        assert_eq!(ab.total, 4);
        assert_eq!(records[0].overlap, 2);
    }

    #[test]
    fn unknown_class_fails() {
        let predicate = EntityKindPredicate::new(DEFAULT_COMPLEX_PATTERN).unwrap();
        let registry = EntityClassRegistry::new(vec![], predicate).unwrap();
        assert!(build_overlap_table(&registry, &["x".to_string()]).is_err());
    }
}
