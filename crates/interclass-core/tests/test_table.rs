//! Pairwise table builder integration tests.

mod common;

use common::*;
use pretty_assertions::assert_eq;

use interclass_core::config::{ClassDefinition, Effect, Interaction, PairwiseStatsRecord};
use interclass_core::phases::table::StatsTableBuilder;

fn build(c: &Counted) -> Vec<PairwiseStatsRecord> {
    StatsTableBuilder::new(
        &c.registry,
        &c.network,
        &c.index,
        &c.connections,
        &c.degrees,
        None,
    )
    .build()
    .unwrap()
}

#[test]
fn row_count_is_triangular() {
    for classes in [0, 1, 2, 5, 12] {
        let c = count(
            synthetic_classes(classes, 30, 1),
            &synthetic_edges(80, 30, 2),
        );
        let rows = build(&c);
        assert_eq!(rows.len(), classes * (classes + 1) / 2);
    }
}

#[test]
fn table_is_reproducible() {
    let c = count(synthetic_classes(10, 50, 9), &synthetic_edges(300, 50, 4));
    assert_eq!(build(&c), build(&c));
}

#[test]
fn symmetric_columns_agree_with_counts() {
    let c = count(synthetic_classes(6, 40, 21), &synthetic_edges(250, 40, 22));
    for r in build(&c) {
        let (i, j) = (c.id(&r.name_cls0), c.id(&r.name_cls1));
        assert_eq!(r.con_all, c.connections.all(i, j));
        if i == j {
            assert_eq!(r.con_0to1, r.con_1to0);
            assert_eq!(r.deg_total0, r.deg_total1);
        }
        assert_eq!(r.deg_total0, r.deg_undir0 + r.deg_in0 + r.deg_out0);
    }
}

#[test]
fn empty_inputs_give_empty_table() {
    let c = count(Vec::new(), &[]);
    assert!(build(&c).is_empty());

    let c = count(
        vec![ClassDefinition::new("solo", ["p1"])],
        &[Interaction::directed("p1", "p1", Effect::Stimulation)],
    );
    let rows = build(&c);
    assert_eq!(rows.len(), 1);
    // a directed self-loop inside one class counts once
    assert_eq!(rows[0].con_all, 1);
    assert_eq!(rows[0].con_0to1_stim, 1);
}
