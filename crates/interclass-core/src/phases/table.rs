//! Pairwise class statistics table: one record per unordered class pair.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::config::{ConnectionMode, Direction, EntityKind, PairwiseStatsRecord};
use crate::error::Result;
use crate::graph::class_registry::EntityClassRegistry;
use crate::graph::network_index::{NetworkIndex, NetworkTotals};
use crate::graph::reverse_index::{ClassId, ClassReverseIndex};
use crate::phases::counting::{ConnectionCounts, DegreeCounts};

/// Everything the table needs to know about one class, looked up once.
struct ClassSnapshot<'a> {
    key: &'a str,
    label: &'a str,
    resource: &'a str,
    aspect: &'a str,
    scope: &'a str,
    parent: &'a str,
    members: HashSet<&'a str>,
    in_network: usize,
    parent_size: usize,
}

/// Assembles the pairwise statistics table from the counter's results.
pub struct StatsTableBuilder<'a> {
    registry: &'a EntityClassRegistry,
    network: &'a NetworkIndex,
    index: &'a ClassReverseIndex,
    connections: &'a ConnectionCounts,
    degrees: &'a DegreeCounts,
    kind: Option<EntityKind>,
}

impl<'a> StatsTableBuilder<'a> {
    pub fn new(
        registry: &'a EntityClassRegistry,
        network: &'a NetworkIndex,
        index: &'a ClassReverseIndex,
        connections: &'a ConnectionCounts,
        degrees: &'a DegreeCounts,
        kind: Option<EntityKind>,
    ) -> Self {
        Self {
            registry,
            network,
            index,
            connections,
            degrees,
            kind,
        }
    }

    fn snapshot(&self, key: &'a str) -> Result<ClassSnapshot<'a>> {
        let meta = self.registry.metadata(key)?;
        let members = self.registry.members(key, self.kind)?;
        let in_network = members
            .iter()
            .filter(|id| self.network.has_entity(id))
            .count();
        let parent_size = match meta.parent {
            Some(parent) => self.registry.members(parent, self.kind)?.len(),
            None => 0,
        };
        Ok(ClassSnapshot {
            key: meta.key,
            label: meta.label,
            resource: meta.resource,
            aspect: meta.aspect,
            scope: meta.scope,
            parent: meta.parent.unwrap_or(""),
            members,
            in_network,
            parent_size,
        })
    }

    /// Build all C·(C+1)/2 records, ordered by (class0, class1) in sorted key order.
    pub fn build(&self) -> Result<Vec<PairwiseStatsRecord>> {
        let snapshots: Vec<ClassSnapshot<'a>> = self
            .index
            .class_keys()
            .iter()
            .map(|key| self.snapshot(key))
            .collect::<Result<_>>()?;

        let total = self.registry.all_entities(self.kind).len();
        let network = self.network.entities(self.kind).len();
        let totals = self.network.totals();

        let n = snapshots.len();
        let pairs: Vec<(ClassId, ClassId)> = (0..n)
            .flat_map(|i| (i..n).map(move |j| (i, j)))
            .collect();

        log::info!("Building the pairwise table for {} class pairs.", pairs.len());

        Ok(pairs
            .par_iter()
            .map(|&(i, j)| self.record(&snapshots, i, j, total, network, totals))
            .collect())
    }

    fn record(
        &self,
        snapshots: &[ClassSnapshot<'_>],
        i: ClassId,
        j: ClassId,
        total: usize,
        network: usize,
        totals: NetworkTotals,
    ) -> PairwiseStatsRecord {
        let (c0, c1) = (&snapshots[i], &snapshots[j]);
        let conn = |mode, a, b| self.connections.count(mode, a, b);
        let deg = |mode, direction, class| self.degrees.degree(mode, direction, class);

        let (small, large) = if c0.members.len() <= c1.members.len() {
            (&c0.members, &c1.members)
        } else {
            (&c1.members, &c0.members)
        };
        let overlap = small.iter().filter(|id| large.contains(*id)).count();

        use ConnectionMode::{Directed, Inhibitory, Stimulatory, Undirected};
        use Direction::{In, Out};

        PairwiseStatsRecord {
            name_cls0: c0.key.to_string(),
            name_cls1: c1.key.to_string(),
            cls_label0: c0.label.to_string(),
            cls_label1: c1.label.to_string(),
            src_label0: c0.resource.to_string(),
            src_label1: c1.resource.to_string(),
            aspect0: c0.aspect.to_string(),
            aspect1: c1.aspect.to_string(),
            typ_cls0: c0.scope.to_string(),
            typ_cls1: c1.scope.to_string(),
            total,
            network,
            parent0: c0.parent.to_string(),
            parent1: c1.parent.to_string(),
            size_cls0: c0.members.len(),
            size_cls1: c1.members.len(),
            overlap_cls01: overlap,
            in_network_cls0: c0.in_network,
            in_network_cls1: c1.in_network,
            size_parent0: c0.parent_size,
            size_parent1: c1.parent_size,
            con_all: self.connections.all(i, j),
            con_0to1: conn(Directed, i, j),
            con_0to1_stim: conn(Stimulatory, i, j),
            con_0to1_inh: conn(Inhibitory, i, j),
            con_1to0: conn(Directed, j, i),
            con_1to0_stim: conn(Stimulatory, j, i),
            con_1to0_inh: conn(Inhibitory, j, i),
            deg_total0: self.degrees.total(i),
            deg_total1: self.degrees.total(j),
            deg_undir0: deg(Undirected, Out, i),
            deg_undir1: deg(Undirected, Out, j),
            deg_in0: deg(Directed, In, i),
            deg_in1: deg(Directed, In, j),
            deg_out0: deg(Directed, Out, i),
            deg_out1: deg(Directed, Out, j),
            deg_in0_stim: deg(Stimulatory, In, i),
            deg_in1_stim: deg(Stimulatory, In, j),
            deg_out0_stim: deg(Stimulatory, Out, i),
            deg_out1_stim: deg(Stimulatory, Out, j),
            deg_in0_inh: deg(Inhibitory, In, i),
            deg_in1_inh: deg(Inhibitory, In, j),
            deg_out0_inh: deg(Inhibitory, Out, i),
            deg_out1_inh: deg(Inhibitory, Out, j),
            con_network: totals.directed + totals.undirected,
            con_network_undir: totals.undirected,
            con_network_dir: totals.directed,
            con_network_stim: totals.stimulatory,
            con_network_inh: totals.inhibitory,
        }
    }
}
