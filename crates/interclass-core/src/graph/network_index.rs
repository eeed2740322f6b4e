//! In-memory interaction network backed by petgraph::DiGraph.
//!
//! Undirected interactions are stored once, as an edge flagged `directed: false`;
//! the counter treats them symmetrically.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::config::{Effect, EntityKind, EntityKindPredicate, Interaction};

/// Node data stored in the graph.
#[derive(Debug, Clone)]
pub struct EntityNode {
    pub id: String,
    pub kind: EntityKind,
}

/// Edge data stored in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeData {
    pub directed: bool,
    pub effect: Effect,
}

/// One edge as seen by the streaming sweep.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub directed: bool,
    pub effect: Effect,
}

/// Network-wide edge totals, used as baseline denominators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkTotals {
    pub directed: usize,
    pub undirected: usize,
    pub stimulatory: usize,
    pub inhibitory: usize,
}

/// Typed, signed network of entity interactions.
pub struct NetworkIndex {
    graph: DiGraph<EntityNode, EdgeData>,
    /// O(1) entity ID → NodeIndex lookup.
    id_index: HashMap<String, NodeIndex>,
    totals: NetworkTotals,
}

impl NetworkIndex {
    /// Build the network. Exact duplicate interactions are stored once; an
    /// undirected interaction duplicates its reverse.
    pub fn new(interactions: &[Interaction], predicate: &EntityKindPredicate) -> Self {
        let mut net = Self {
            graph: DiGraph::new(),
            id_index: HashMap::new(),
            totals: NetworkTotals::default(),
        };
        let mut seen: HashSet<(NodeIndex, NodeIndex, bool, Effect)> = HashSet::new();
        let mut duplicates = 0usize;

        for interaction in interactions {
            let a = net.ensure_node(&interaction.source, predicate);
            let b = net.ensure_node(&interaction.target, predicate);
            let (a, b, effect) = if interaction.directed {
                (a, b, interaction.effect)
            } else {
                (a.min(b), a.max(b), Effect::Neutral)
            };

            if !seen.insert((a, b, interaction.directed, effect)) {
                duplicates += 1;
                continue;
            }

            net.graph.add_edge(
                a,
                b,
                EdgeData {
                    directed: interaction.directed,
                    effect,
                },
            );

            if interaction.directed {
                net.totals.directed += 1;
                match effect {
                    Effect::Stimulation => net.totals.stimulatory += 1,
                    Effect::Inhibition => net.totals.inhibitory += 1,
                    Effect::Neutral => {}
                }
            } else {
                net.totals.undirected += 1;
            }
        }

        if duplicates > 0 {
            log::warn!("Ignored {duplicates} duplicate interaction records.");
        }
        log::info!(
            "Network: {} entities, {} directed and {} undirected interactions.",
            net.graph.node_count(),
            net.totals.directed,
            net.totals.undirected,
        );

        net
    }

    /// Get or create a node by entity ID.
    fn ensure_node(&mut self, id: &str, predicate: &EntityKindPredicate) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(id) {
            idx
        } else {
            let idx = self.graph.add_node(EntityNode {
                id: id.to_string(),
                kind: predicate.kind_of(id),
            });
            self.id_index.insert(id.to_string(), idx);
            idx
        }
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_index.get(id).copied()
    }

    pub fn has_entity(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn all_entities(&self) -> HashSet<&str> {
        self.entities(None)
    }

    /// Entities of the network, optionally restricted to one kind.
    pub fn entities(&self, kind: Option<EntityKind>) -> HashSet<&str> {
        self.graph
            .node_weights()
            .filter(|n| kind.is_none() || kind == Some(n.kind))
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Stream every stored edge.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView> + '_ {
        self.graph.edge_references().map(|e| EdgeView {
            source: e.source(),
            target: e.target(),
            directed: e.weight().directed,
            effect: e.weight().effect,
        })
    }

    pub fn totals(&self) -> NetworkTotals {
        self.totals
    }

    pub fn count_total(&self) -> usize {
        self.totals.directed + self.totals.undirected
    }

    pub fn count_directed(&self) -> usize {
        self.totals.directed
    }

    pub fn count_undirected(&self) -> usize {
        self.totals.undirected
    }

    pub fn count_stimulatory(&self) -> usize {
        self.totals.stimulatory
    }

    pub fn count_inhibitory(&self) -> usize {
        self.totals.inhibitory
    }
}
