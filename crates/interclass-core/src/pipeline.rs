//! Sequential phase orchestrator with timing.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use chrono::Utc;

use crate::config::{ConnectionMode, StatsConfig, StatsReport};
use crate::error::Result;
use crate::graph::class_registry::EntityClassRegistry;
use crate::graph::network_index::NetworkIndex;
use crate::graph::reverse_index::ClassReverseIndex;
use crate::input;
use crate::phases;
use crate::phases::counting::InterClassConnectionCounter;
use crate::phases::table::StatsTableBuilder;

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("index", "Indexing class membership"),
    ("connections", "Counting inter-class connections"),
    ("pairwise", "Building pairwise statistics"),
    ("coverage", "Measuring class coverage"),
    ("overlaps", "Measuring class overlaps"),
    ("annotations", "Listing class annotations by entity"),
    ("modes", "Tabulating connection modes"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

struct PhaseTimer {
    callback: Option<ProgressCallback>,
    timings: HashMap<String, f64>,
}

impl PhaseTimer {
    fn run<T>(&mut self, name: &str, phase: impl FnOnce() -> Result<T>) -> Result<T> {
        let label = PHASE_LABELS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, l)| *l)
            .unwrap_or(name);
        if let Some(ref mut cb) = self.callback {
            cb(name, label);
        }
        log::info!("{label}.");

        let start = Instant::now();
        let out = phase()?;
        self.timings
            .insert(name.to_string(), start.elapsed().as_secs_f64());
        Ok(out)
    }
}

/// Run every phase over already-built inputs and return the report.
pub fn run_pipeline(
    config: &StatsConfig,
    registry: &EntityClassRegistry,
    network: &NetworkIndex,
    progress_callback: Option<ProgressCallback>,
) -> Result<StatsReport> {
    let total_start = Instant::now();
    let mut timer = PhaseTimer {
        callback: progress_callback,
        timings: HashMap::new(),
    };
    let kind = config.entity_filter();
    let scopes = config.class_scopes.as_deref();

    let index = timer.run("index", || {
        ClassReverseIndex::build(registry, network, scopes, kind)
    })?;

    let (connections, degrees) = timer.run("connections", || {
        Ok(InterClassConnectionCounter::new(&index, network)
            .with_progress_interval(config.progress_interval)
            .run())
    })?;

    let pairwise = timer.run("pairwise", || {
        StatsTableBuilder::new(registry, network, &index, &connections, &degrees, kind).build()
    })?;

    let coverage = timer.run("coverage", || {
        phases::coverage::build_coverage_table(registry, network)
    })?;

    let overlaps = timer.run("overlaps", || {
        phases::overlaps::build_overlap_table(registry, index.class_keys())
    })?;

    let annotations = timer.run("annotations", || {
        phases::annotations::build_annotation_table(registry)
    })?;

    let connection_tables = timer.run("modes", || {
        ConnectionMode::ALL
            .iter()
            .map(|&mode| {
                phases::connections::build_connection_table(
                    registry,
                    &index,
                    &connections,
                    mode,
                )
                .map(|rows| (mode.as_str().to_string(), rows))
            })
            .collect::<Result<BTreeMap<_, _>>>()
    })?;

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

    let mut metadata = HashMap::new();
    metadata.insert(
        "network_name".to_string(),
        serde_json::Value::String(config.network_name.clone()),
    );
    metadata.insert(
        "generated_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "interclass_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    metadata.insert(
        "only_proteins".to_string(),
        serde_json::Value::Bool(config.only_proteins),
    );
    metadata.insert(
        "class_scopes".to_string(),
        serde_json::to_value(&config.class_scopes).unwrap_or_default(),
    );
    metadata.insert(
        "analysis_duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(&timer.timings).unwrap_or_default(),
    );

    let mut stats = HashMap::new();
    stats.insert("classes".to_string(), serde_json::json!(registry.len()));
    stats.insert(
        "in_scope_classes".to_string(),
        serde_json::json!(index.class_count()),
    );
    stats.insert(
        "entities".to_string(),
        serde_json::json!(network.entity_count()),
    );
    stats.insert(
        "interactions".to_string(),
        serde_json::json!(network.count_total()),
    );
    stats.insert(
        "class_pairs".to_string(),
        serde_json::json!(pairwise.len()),
    );

    Ok(StatsReport {
        version: "1.0".to_string(),
        metadata,
        stats,
        pairwise,
        coverage,
        overlaps,
        annotations,
        connections: connection_tables,
    })
}

/// Load both inputs named by the configuration and run the pipeline.
pub fn run_from_config(
    config: &StatsConfig,
    progress_callback: Option<ProgressCallback>,
) -> Result<StatsReport> {
    let predicate = config.kind_predicate()?;
    let registry = EntityClassRegistry::new(input::load_classes(&config.classes_path)?, predicate)?;
    let interactions = input::load_network(&config.network_path)?;
    let network = NetworkIndex::new(&interactions, registry.predicate());
    drop(interactions);

    run_pipeline(config, &registry, &network, progress_callback)
}
