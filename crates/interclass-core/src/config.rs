//! Core data types and configuration for inter-class statistics runs.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identifiers matching this pattern are protein complexes.
pub const DEFAULT_COMPLEX_PATTERN: &str = "^COMPLEX:";

/// Scope reported for classes which do not declare one.
pub const DEFAULT_SCOPE: &str = "sub";

/// Kind of a network entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Protein,
    Complex,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Protein, EntityKind::Complex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Complex => "complex",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides the kind of an entity from the form of its identifier.
#[derive(Debug, Clone)]
pub struct EntityKindPredicate {
    complex: Regex,
}

impl EntityKindPredicate {
    pub fn new(complex_pattern: &str) -> Result<Self> {
        Ok(Self {
            complex: Regex::new(complex_pattern)?,
        })
    }

    pub fn kind_of(&self, id: &str) -> EntityKind {
        if self.complex.is_match(id) {
            EntityKind::Complex
        } else {
            EntityKind::Protein
        }
    }
}

/// Sign of an interaction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "i8", try_from = "i8")]
pub enum Effect {
    Stimulation,
    Inhibition,
    #[default]
    Neutral,
}

impl Effect {
    pub fn sign(&self) -> i8 {
        match self {
            Self::Stimulation => 1,
            Self::Inhibition => -1,
            Self::Neutral => 0,
        }
    }

    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Self::Stimulation),
            -1 => Some(Self::Inhibition),
            0 => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl From<Effect> for i8 {
    fn from(effect: Effect) -> i8 {
        effect.sign()
    }
}

impl TryFrom<i8> for Effect {
    type Error = String;

    fn try_from(sign: i8) -> std::result::Result<Self, Self::Error> {
        Effect::from_sign(sign).ok_or_else(|| format!("effect must be 1, -1 or 0, got {sign}"))
    }
}

/// One interaction record of the input network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Interaction {
    pub source: String,
    pub target: String,
    pub directed: bool,
    #[serde(default)]
    pub effect: Effect,
}

impl Interaction {
    pub fn directed(source: &str, target: &str, effect: Effect) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            directed: true,
            effect,
        }
    }

    pub fn undirected(a: &str, b: &str) -> Self {
        Self {
            source: a.to_string(),
            target: b.to_string(),
            directed: false,
            effect: Effect::Neutral,
        }
    }
}

/// A named class of entities as delivered by the annotation pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub members: BTreeSet<String>,
}

impl ClassDefinition {
    pub fn new<I, S>(key: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.to_string(),
            members: members.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }
}

/// Top-level layout of the class membership JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassesFile {
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
}

/// Which edges a connection count is made of.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    All,
    Undirected,
    Directed,
    Stimulatory,
    Inhibitory,
}

impl ConnectionMode {
    pub const ALL: [ConnectionMode; 5] = [
        ConnectionMode::All,
        ConnectionMode::Undirected,
        ConnectionMode::Directed,
        ConnectionMode::Stimulatory,
        ConnectionMode::Inhibitory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Undirected => "undirected",
            Self::Directed => "directed",
            Self::Stimulatory => "stimulatory",
            Self::Inhibitory => "inhibitory",
        }
    }

    /// Symmetric modes give the same count for (A, B) and (B, A).
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::All | Self::Undirected)
    }
}

impl std::fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of an edge a class member sits on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Out,
    In,
}

/// Configuration for a statistics run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub classes_path: String,
    #[serde(default)]
    pub network_path: String,
    #[serde(default = "default_network_name")]
    pub network_name: String,
    #[serde(default = "default_tables_dir")]
    pub tables_dir: String,
    /// Restrict the run to classes of these scopes; `None` keeps every class.
    pub class_scopes: Option<Vec<String>>,
    #[serde(default = "default_only_proteins")]
    pub only_proteins: bool,
    #[serde(default = "default_complex_pattern")]
    pub complex_pattern: String,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    #[serde(default = "default_timestamp_dirs")]
    pub timestamp_dirs: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

fn default_network_name() -> String {
    "omnipath".to_string()
}
fn default_tables_dir() -> String {
    "tables".to_string()
}
fn default_only_proteins() -> bool {
    true
}
fn default_complex_pattern() -> String {
    DEFAULT_COMPLEX_PATTERN.to_string()
}
fn default_progress_interval() -> usize {
    100_000
}
fn default_timestamp_dirs() -> bool {
    true
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            classes_path: String::new(),
            network_path: String::new(),
            network_name: default_network_name(),
            tables_dir: default_tables_dir(),
            class_scopes: None,
            only_proteins: default_only_proteins(),
            complex_pattern: default_complex_pattern(),
            progress_interval: default_progress_interval(),
            timestamp_dirs: default_timestamp_dirs(),
            verbose: false,
            quiet: false,
        }
    }
}

impl StatsConfig {
    /// Read a configuration from a JSON file; absent keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Kind filter applied to class members and network entities.
    pub fn entity_filter(&self) -> Option<EntityKind> {
        if self.only_proteins {
            Some(EntityKind::Protein)
        } else {
            None
        }
    }

    pub fn kind_predicate(&self) -> Result<EntityKindPredicate> {
        EntityKindPredicate::new(&self.complex_pattern)
    }
}

/// One row of the pairwise class statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseStatsRecord {
    pub name_cls0: String,
    pub name_cls1: String,
    pub cls_label0: String,
    pub cls_label1: String,
    pub src_label0: String,
    pub src_label1: String,
    pub aspect0: String,
    pub aspect1: String,
    pub typ_cls0: String,
    pub typ_cls1: String,
    pub total: usize,
    pub network: usize,
    pub parent0: String,
    pub parent1: String,
    // sizes
    pub size_cls0: usize,
    pub size_cls1: usize,
    pub overlap_cls01: usize,
    pub in_network_cls0: usize,
    pub in_network_cls1: usize,
    pub size_parent0: usize,
    pub size_parent1: usize,
    // connections
    pub con_all: usize,
    pub con_0to1: usize,
    pub con_0to1_stim: usize,
    pub con_0to1_inh: usize,
    pub con_1to0: usize,
    pub con_1to0_stim: usize,
    pub con_1to0_inh: usize,
    // degree sums
    pub deg_total0: usize,
    pub deg_total1: usize,
    pub deg_undir0: usize,
    pub deg_undir1: usize,
    pub deg_in0: usize,
    pub deg_in1: usize,
    pub deg_out0: usize,
    pub deg_out1: usize,
    pub deg_in0_stim: usize,
    pub deg_in1_stim: usize,
    pub deg_out0_stim: usize,
    pub deg_out1_stim: usize,
    pub deg_in0_inh: usize,
    pub deg_in1_inh: usize,
    pub deg_out0_inh: usize,
    pub deg_out1_inh: usize,
    // network baselines
    pub con_network: usize,
    pub con_network_undir: usize,
    pub con_network_dir: usize,
    pub con_network_stim: usize,
    pub con_network_inh: usize,
}

/// Coverage of one class by the network, per entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRecord {
    pub typ: String,
    pub cls: String,
    pub cls_label: String,
    pub resource: String,
    pub entity_type: EntityKind,
    pub total: usize,
    pub in_network: usize,
}

/// Member overlap of an ordered class pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapRecord {
    pub cat0: String,
    pub cat1: String,
    pub size0: usize,
    pub size1: usize,
    pub total: usize,
    pub overlap: usize,
}

/// Connection count of a class pair in a single connection mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub cat0: String,
    pub cat1: String,
    pub label0: String,
    pub label1: String,
    pub size0: usize,
    pub size1: usize,
    pub conn: usize,
}

/// One (class, member) membership with the class's annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub entity_id: String,
    pub is_complex: bool,
    pub cls: String,
    pub parent: String,
    pub resource_label: String,
    pub class_label: String,
    pub class_type: String,
}

/// Result of a statistics run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub pairwise: Vec<PairwiseStatsRecord>,
    #[serde(default)]
    pub coverage: Vec<CoverageRecord>,
    #[serde(default)]
    pub overlaps: Vec<OverlapRecord>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
    /// Connection tables keyed by mode name.
    #[serde(default)]
    pub connections: BTreeMap<String, Vec<ConnectionRecord>>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for StatsReport {
    fn default() -> Self {
        Self {
            version: default_version(),
            metadata: HashMap::new(),
            stats: HashMap::new(),
            pairwise: Vec::new(),
            coverage: Vec::new(),
            overlaps: Vec::new(),
            annotations: Vec::new(),
            connections: BTreeMap::new(),
        }
    }
}
