//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use interclass_core::config::{
    ClassDefinition, Effect, EntityKindPredicate, Interaction, StatsConfig,
    DEFAULT_COMPLEX_PATTERN,
};
use interclass_core::graph::class_registry::EntityClassRegistry;
use interclass_core::graph::network_index::NetworkIndex;
use interclass_core::graph::reverse_index::ClassReverseIndex;
use interclass_core::phases::counting::{
    ConnectionCounts, DegreeCounts, InterClassConnectionCounter,
};

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// Configuration pointing at the files of a fixture directory.
pub fn fixture_config(name: &str) -> StatsConfig {
    let dir = fixture_path(name);
    StatsConfig {
        classes_path: dir.join("classes.json").to_string_lossy().to_string(),
        network_path: dir.join("network.tsv").to_string_lossy().to_string(),
        ..Default::default()
    }
}

pub fn predicate() -> EntityKindPredicate {
    EntityKindPredicate::new(DEFAULT_COMPLEX_PATTERN).unwrap()
}

/// Load the registry and network of a fixture directory.
pub fn load_fixture(name: &str) -> (EntityClassRegistry, NetworkIndex) {
    let config = fixture_config(name);
    let classes = interclass_core::input::load_classes(&config.classes_path).unwrap();
    let edges = interclass_core::input::load_network(&config.network_path).unwrap();
    let registry = EntityClassRegistry::new(classes, predicate()).unwrap();
    let network = NetworkIndex::new(&edges, registry.predicate());
    (registry, network)
}

// ---------------------------------------------------------------------------
// Counting runners
// ---------------------------------------------------------------------------

pub struct Counted {
    pub registry: EntityClassRegistry,
    pub network: NetworkIndex,
    pub index: ClassReverseIndex,
    pub connections: ConnectionCounts,
    pub degrees: DegreeCounts,
}

impl Counted {
    pub fn id(&self, key: &str) -> usize {
        self.index
            .class_id(key)
            .unwrap_or_else(|| panic!("class {key} not in scope"))
    }
}

/// Build everything up to the counter from inline classes and edges.
pub fn count(classes: Vec<ClassDefinition>, edges: &[Interaction]) -> Counted {
    let registry = EntityClassRegistry::new(classes, predicate()).unwrap();
    let network = NetworkIndex::new(edges, registry.predicate());
    let index = ClassReverseIndex::build(&registry, &network, None, None).unwrap();
    let (connections, degrees) = InterClassConnectionCounter::new(&index, &network).run();
    Counted {
        registry,
        network,
        index,
        connections,
        degrees,
    }
}

// ---------------------------------------------------------------------------
// Synthetic inputs
// ---------------------------------------------------------------------------

/// Deterministic pseudo-random sequence (64-bit LCG).
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % n
    }
}

/// Overlapping classes over entities P0..P{entities}.
pub fn synthetic_classes(classes: usize, entities: u64, seed: u64) -> Vec<ClassDefinition> {
    let mut rng = Lcg::new(seed);
    (0..classes)
        .map(|c| {
            let members: Vec<String> = (0..entities / 3)
                .map(|_| format!("P{}", rng.below(entities)))
                .collect();
            ClassDefinition::new(&format!("class_{c:02}"), members)
        })
        .collect()
}

/// Mixed directed/undirected, signed edges; some endpoints are unclassified.
pub fn synthetic_edges(count: usize, entities: u64, seed: u64) -> Vec<Interaction> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let a = format!("P{}", rng.below(entities + 5));
            let b = format!("P{}", rng.below(entities + 5));
            match rng.below(4) {
                0 => Interaction::undirected(&a, &b),
                1 => Interaction::directed(&a, &b, Effect::Stimulation),
                2 => Interaction::directed(&a, &b, Effect::Inhibition),
                _ => Interaction::directed(&a, &b, Effect::Neutral),
            }
        })
        .collect()
}
