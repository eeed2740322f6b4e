//! Read-only registry of entity classes, their members and hierarchy.

use std::collections::{BTreeMap, HashSet};

use crate::config::{ClassDefinition, EntityKind, EntityKindPredicate, DEFAULT_SCOPE};
use crate::error::{Result, StatsError};

/// Metadata of one class, borrowed from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassMetadata<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub parent: Option<&'a str>,
    pub resource: &'a str,
    pub aspect: &'a str,
    pub scope: &'a str,
}

struct ClassEntry {
    definition: ClassDefinition,
    /// member → kind, decided once at construction
    members: BTreeMap<String, EntityKind>,
}

/// Classes keyed by name. Built once per run, never mutated afterwards.
pub struct EntityClassRegistry {
    classes: BTreeMap<String, ClassEntry>,
    predicate: EntityKindPredicate,
}

impl EntityClassRegistry {
    /// Build the registry, rejecting duplicate keys and dangling parents.
    pub fn new(definitions: Vec<ClassDefinition>, predicate: EntityKindPredicate) -> Result<Self> {
        let mut classes = BTreeMap::new();

        for definition in definitions {
            if classes.contains_key(&definition.key) {
                return Err(StatsError::DuplicateClass(definition.key));
            }
            let members = definition
                .members
                .iter()
                .map(|id| (id.clone(), predicate.kind_of(id)))
                .collect();
            classes.insert(
                definition.key.clone(),
                ClassEntry {
                    definition,
                    members,
                },
            );
        }

        for entry in classes.values() {
            if let Some(parent) = &entry.definition.parent {
                if !classes.contains_key(parent) {
                    return Err(StatsError::UnknownParent {
                        class: entry.definition.key.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        Ok(Self { classes, predicate })
    }

    fn entry(&self, key: &str) -> Result<&ClassEntry> {
        self.classes
            .get(key)
            .ok_or_else(|| StatsError::ClassNotFound(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn predicate(&self) -> &EntityKindPredicate {
        &self.predicate
    }

    /// Members of a class, optionally restricted to one entity kind.
    pub fn members(&self, key: &str, kind: Option<EntityKind>) -> Result<HashSet<&str>> {
        let entry = self.entry(key)?;
        Ok(entry
            .members
            .iter()
            .filter(|(_, k)| kind.is_none() || kind == Some(**k))
            .map(|(id, _)| id.as_str())
            .collect())
    }

    pub fn parent(&self, key: &str) -> Result<Option<&str>> {
        Ok(self.entry(key)?.definition.parent.as_deref())
    }

    pub fn metadata(&self, key: &str) -> Result<ClassMetadata<'_>> {
        let def = &self.entry(key)?.definition;
        Ok(ClassMetadata {
            key: &def.key,
            label: def.label.as_deref().unwrap_or(&def.key),
            parent: def.parent.as_deref(),
            resource: def.resource.as_deref().unwrap_or(""),
            aspect: def.aspect.as_deref().unwrap_or(""),
            scope: def.scope.as_deref().unwrap_or(DEFAULT_SCOPE),
        })
    }

    /// Class keys in sorted order, restricted to the given scopes if any.
    pub fn iter_classes<'a>(
        &'a self,
        scope_filter: Option<&'a [String]>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.classes.iter().filter_map(move |(key, entry)| {
            let scope = entry.definition.scope.as_deref().unwrap_or(DEFAULT_SCOPE);
            match scope_filter {
                Some(scopes) if !scopes.iter().any(|s| s == scope) => None,
                _ => Some(key.as_str()),
            }
        })
    }

    /// Union of the members of every class: the reference entity set.
    pub fn all_entities(&self, kind: Option<EntityKind>) -> HashSet<&str> {
        self.classes
            .values()
            .flat_map(|entry| entry.members.iter())
            .filter(|(_, k)| kind.is_none() || kind == Some(**k))
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
