//! Inter-class connection and degree counting in one sweep over the edges.
//!
//! Every count is a number of distinct entity pairs, never of raw edges, so
//! repeated interactions between the same two entities contribute once.

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::config::{ConnectionMode, Direction, Effect};
use crate::graph::network_index::NetworkIndex;
use crate::graph::reverse_index::{ClassId, ClassReverseIndex};

type EntityPair = (NodeIndex, NodeIndex);
type ClassPair = (ClassId, ClassId);

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Distinct-pair connection counts keyed by ordered class pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionCounts {
    undirected: HashMap<ClassPair, usize>,
    directed: HashMap<ClassPair, usize>,
    stimulatory: HashMap<ClassPair, usize>,
    inhibitory: HashMap<ClassPair, usize>,
}

impl ConnectionCounts {
    /// Connections from class `a` to class `b` in the given mode; unseen pairs are zero.
    pub fn count(&self, mode: ConnectionMode, a: ClassId, b: ClassId) -> usize {
        let table = match mode {
            ConnectionMode::All => return self.all(a, b),
            ConnectionMode::Undirected => &self.undirected,
            ConnectionMode::Directed => &self.directed,
            ConnectionMode::Stimulatory => &self.stimulatory,
            ConnectionMode::Inhibitory => &self.inhibitory,
        };
        table.get(&(a, b)).copied().unwrap_or(0)
    }

    /// Undirected connections plus directed ones either way. Directed
    /// self-pairs are added only once.
    pub fn all(&self, a: ClassId, b: ClassId) -> usize {
        let undirected = self.count(ConnectionMode::Undirected, a, b);
        let forward = self.count(ConnectionMode::Directed, a, b);
        if a == b {
            undirected + forward
        } else {
            undirected + forward + self.count(ConnectionMode::Directed, b, a)
        }
    }
}

/// Per-class sums of distinct (member, neighbour) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeCounts {
    undirected: Vec<usize>,
    directed_out: Vec<usize>,
    directed_in: Vec<usize>,
    stimulatory_out: Vec<usize>,
    stimulatory_in: Vec<usize>,
    inhibitory_out: Vec<usize>,
    inhibitory_in: Vec<usize>,
}

impl DegreeCounts {
    /// Degree of `class` for one mode and direction. Undirected degrees have
    /// no direction; `All` gives the total degree.
    pub fn degree(&self, mode: ConnectionMode, direction: Direction, class: ClassId) -> usize {
        let values = match (mode, direction) {
            (ConnectionMode::All, _) => return self.total(class),
            (ConnectionMode::Undirected, _) => &self.undirected,
            (ConnectionMode::Directed, Direction::Out) => &self.directed_out,
            (ConnectionMode::Directed, Direction::In) => &self.directed_in,
            (ConnectionMode::Stimulatory, Direction::Out) => &self.stimulatory_out,
            (ConnectionMode::Stimulatory, Direction::In) => &self.stimulatory_in,
            (ConnectionMode::Inhibitory, Direction::Out) => &self.inhibitory_out,
            (ConnectionMode::Inhibitory, Direction::In) => &self.inhibitory_in,
        };
        values.get(class).copied().unwrap_or(0)
    }

    /// Undirected plus directed out plus directed in.
    pub fn total(&self, class: ClassId) -> usize {
        self.degree(ConnectionMode::Undirected, Direction::Out, class)
            + self.degree(ConnectionMode::Directed, Direction::Out, class)
            + self.degree(ConnectionMode::Directed, Direction::In, class)
    }
}

// ---------------------------------------------------------------------------
// Accumulators
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PairSets {
    undirected: HashMap<ClassPair, HashSet<EntityPair>>,
    directed: HashMap<ClassPair, HashSet<EntityPair>>,
    stimulatory: HashMap<ClassPair, HashSet<EntityPair>>,
    inhibitory: HashMap<ClassPair, HashSet<EntityPair>>,
}

impl PairSets {
    fn into_counts(self) -> ConnectionCounts {
        fn collapse(sets: HashMap<ClassPair, HashSet<EntityPair>>) -> HashMap<ClassPair, usize> {
            sets.into_iter().map(|(k, v)| (k, v.len())).collect()
        }
        ConnectionCounts {
            undirected: collapse(self.undirected),
            directed: collapse(self.directed),
            stimulatory: collapse(self.stimulatory),
            inhibitory: collapse(self.inhibitory),
        }
    }
}

struct DegreeSets {
    undirected: Vec<HashSet<EntityPair>>,
    directed_out: Vec<HashSet<EntityPair>>,
    directed_in: Vec<HashSet<EntityPair>>,
    stimulatory_out: Vec<HashSet<EntityPair>>,
    stimulatory_in: Vec<HashSet<EntityPair>>,
    inhibitory_out: Vec<HashSet<EntityPair>>,
    inhibitory_in: Vec<HashSet<EntityPair>>,
}

impl DegreeSets {
    fn new(class_count: usize) -> Self {
        let empty = || vec![HashSet::new(); class_count];
        Self {
            undirected: empty(),
            directed_out: empty(),
            directed_in: empty(),
            stimulatory_out: empty(),
            stimulatory_in: empty(),
            inhibitory_out: empty(),
            inhibitory_in: empty(),
        }
    }

    fn into_counts(self) -> DegreeCounts {
        fn collapse(sets: Vec<HashSet<EntityPair>>) -> Vec<usize> {
            sets.into_iter().map(|s| s.len()).collect()
        }
        DegreeCounts {
            undirected: collapse(self.undirected),
            directed_out: collapse(self.directed_out),
            directed_in: collapse(self.directed_in),
            stimulatory_out: collapse(self.stimulatory_out),
            stimulatory_in: collapse(self.stimulatory_in),
            inhibitory_out: collapse(self.inhibitory_out),
            inhibitory_in: collapse(self.inhibitory_in),
        }
    }
}

// ---------------------------------------------------------------------------
// Counter
// ---------------------------------------------------------------------------

/// Counts connections between in-scope classes with a single pass over the network.
pub struct InterClassConnectionCounter<'a> {
    index: &'a ClassReverseIndex,
    network: &'a NetworkIndex,
    progress_interval: usize,
}

impl<'a> InterClassConnectionCounter<'a> {
    pub fn new(index: &'a ClassReverseIndex, network: &'a NetworkIndex) -> Self {
        Self {
            index,
            network,
            progress_interval: 0,
        }
    }

    /// Log progress every `interval` edges; zero disables it.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Sweep the edges once. The pair sets are dropped before returning,
    /// only their sizes survive.
    pub fn run(&self) -> (ConnectionCounts, DegreeCounts) {
        let mut pairs = PairSets::default();
        let mut degrees = DegreeSets::new(self.index.class_count());
        let total = self.network.count_total();
        let mut counted = 0usize;

        for (i, edge) in self.network.edges().enumerate() {
            if self.progress_interval > 0 && i > 0 && i % self.progress_interval == 0 {
                log::debug!("Counting inter-class connections: {i}/{total} edges.");
            }

            let (a, b) = (edge.source, edge.target);
            let classes_a = self.index.classes_of(a);
            let classes_b = self.index.classes_of(b);
            if classes_a.is_empty() || classes_b.is_empty() {
                continue;
            }
            counted += 1;

            if edge.directed {
                let signed = match edge.effect {
                    Effect::Stimulation => Some((
                        &mut pairs.stimulatory,
                        &mut degrees.stimulatory_out,
                        &mut degrees.stimulatory_in,
                    )),
                    Effect::Inhibition => Some((
                        &mut pairs.inhibitory,
                        &mut degrees.inhibitory_out,
                        &mut degrees.inhibitory_in,
                    )),
                    Effect::Neutral => None,
                };
                add_directed(
                    &mut pairs.directed,
                    &mut degrees.directed_out,
                    &mut degrees.directed_in,
                    classes_a,
                    classes_b,
                    (a, b),
                );
                if let Some((sets, out, inc)) = signed {
                    add_directed(sets, out, inc, classes_a, classes_b, (a, b));
                }
            } else {
                let canonical = if a <= b { (a, b) } else { (b, a) };
                for &ca in classes_a {
                    for &cb in classes_b {
                        pairs.undirected.entry((ca, cb)).or_default().insert(canonical);
                        if ca != cb {
                            pairs.undirected.entry((cb, ca)).or_default().insert(canonical);
                        }
                    }
                    degrees.undirected[ca].insert((a, b));
                }
                for &cb in classes_b {
                    degrees.undirected[cb].insert((b, a));
                }
            }
        }

        log::info!(
            "Counted {counted} of {total} edges between {} in-scope classes.",
            self.index.class_count(),
        );

        (pairs.into_counts(), degrees.into_counts())
    }
}

fn add_directed(
    sets: &mut HashMap<ClassPair, HashSet<EntityPair>>,
    out: &mut [HashSet<EntityPair>],
    inc: &mut [HashSet<EntityPair>],
    classes_a: &[ClassId],
    classes_b: &[ClassId],
    (a, b): EntityPair,
) {
    for &ca in classes_a {
        for &cb in classes_b {
            sets.entry((ca, cb)).or_default().insert((a, b));
        }
        out[ca].insert((a, b));
    }
    for &cb in classes_b {
        inc[cb].insert((b, a));
    }
}
