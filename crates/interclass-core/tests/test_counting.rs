//! Inter-class connection counter integration tests.

mod common;

use common::*;
use pretty_assertions::assert_eq;

use interclass_core::config::{ClassDefinition, ConnectionMode, Direction, Effect, Interaction};

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn overlapping_classes_scenario() {
    let c = count(
        vec![
            ClassDefinition::new("A", ["p1", "p2"]),
            ClassDefinition::new("B", ["p2", "p3"]),
        ],
        &[
            Interaction::directed("p1", "p2", Effect::Stimulation),
            Interaction::undirected("p2", "p3"),
        ],
    );
    let (a, b) = (c.id("A"), c.id("B"));
    assert_eq!(c.connections.count(ConnectionMode::Directed, a, b), 1);
    assert_eq!(c.connections.count(ConnectionMode::Undirected, a, b), 1);
    assert_eq!(c.connections.count(ConnectionMode::Stimulatory, a, b), 1);
    assert_eq!(c.connections.count(ConnectionMode::Inhibitory, a, b), 0);
}

#[test]
fn empty_class_is_all_zero() {
    let c = count(
        vec![
            ClassDefinition::new("empty", Vec::<String>::new()),
            ClassDefinition::new("full", ["p1", "p2", "p3"]),
        ],
        &[
            Interaction::directed("p1", "p2", Effect::Stimulation),
            Interaction::directed("p2", "p3", Effect::Inhibition),
            Interaction::undirected("p3", "p1"),
        ],
    );
    let empty = c.id("empty");
    for other in 0..c.index.class_count() {
        for mode in ConnectionMode::ALL {
            assert_eq!(c.connections.count(mode, empty, other), 0);
            assert_eq!(c.connections.count(mode, other, empty), 0);
        }
    }
    for mode in ConnectionMode::ALL {
        assert_eq!(c.degrees.degree(mode, Direction::Out, empty), 0);
        assert_eq!(c.degrees.degree(mode, Direction::In, empty), 0);
    }
    assert!(c.connections.all(c.id("full"), c.id("full")) > 0);
}

#[test]
fn unclassified_entities_are_dropped() {
    let c = count(
        vec![ClassDefinition::new("A", ["p1"])],
        &[
            Interaction::directed("p1", "x1", Effect::Stimulation),
            Interaction::undirected("x1", "x2"),
        ],
    );
    let a = c.id("A");
    assert_eq!(c.connections.all(a, a), 0);
    assert_eq!(c.degrees.total(a), 0);
}

#[test]
fn no_edges_no_counts() {
    let c = count(vec![ClassDefinition::new("A", ["p1", "p2"])], &[]);
    let a = c.id("A");
    assert_eq!(c.connections.all(a, a), 0);
    assert_eq!(c.degrees.total(a), 0);
}

// ===========================================================================
// Properties on synthetic networks
// ===========================================================================

fn synthetic() -> Counted {
    count(synthetic_classes(8, 60, 7), &synthetic_edges(400, 60, 11))
}

#[test]
fn undirected_counts_are_symmetric() {
    let c = synthetic();
    let n = c.index.class_count();
    for x in 0..n {
        for y in 0..n {
            assert_eq!(
                c.connections.count(ConnectionMode::Undirected, x, y),
                c.connections.count(ConnectionMode::Undirected, y, x),
            );
            assert_eq!(c.connections.all(x, y), c.connections.all(y, x));
        }
    }
}

#[test]
fn directed_counts_bounded_by_edges() {
    let c = synthetic();
    let edges = synthetic_edges(400, 60, 11);
    let keys = c.index.class_keys().to_vec();
    for (x, kx) in keys.iter().enumerate() {
        let mx = c.registry.members(kx, None).unwrap();
        for (y, ky) in keys.iter().enumerate() {
            let my = c.registry.members(ky, None).unwrap();
            let bound = edges
                .iter()
                .filter(|e| {
                    e.directed
                        && mx.contains(e.source.as_str())
                        && my.contains(e.target.as_str())
                })
                .count();
            assert!(c.connections.count(ConnectionMode::Directed, x, y) <= bound);
            assert!(
                c.connections.count(ConnectionMode::Stimulatory, x, y)
                    + c.connections.count(ConnectionMode::Inhibitory, x, y)
                    <= c.connections.count(ConnectionMode::Directed, x, y)
            );
        }
    }
}

#[test]
fn all_count_is_conserved() {
    let c = synthetic();
    let n = c.index.class_count();
    for x in 0..n {
        for y in 0..n {
            let und = c.connections.count(ConnectionMode::Undirected, x, y);
            let xy = c.connections.count(ConnectionMode::Directed, x, y);
            let yx = c.connections.count(ConnectionMode::Directed, y, x);
            let expected = if x == y { und + xy } else { und + xy + yx };
            assert_eq!(c.connections.all(x, y), expected);
            assert_eq!(c.connections.count(ConnectionMode::All, x, y), expected);
        }
    }
}

#[test]
fn counting_is_idempotent() {
    let first = synthetic();
    let second = synthetic();
    assert_eq!(first.connections, second.connections);
    assert_eq!(first.degrees, second.degrees);
}

#[test]
fn duplicate_edges_change_nothing() {
    let classes = synthetic_classes(6, 40, 3);
    let edges = synthetic_edges(200, 40, 5);
    let mut doubled = edges.clone();
    doubled.extend(edges.iter().take(50).cloned());
    // undirected edges are also duplicated by their reverse
    doubled.extend(
        edges
            .iter()
            .filter(|e| !e.directed)
            .map(|e| Interaction::undirected(&e.target, &e.source)),
    );

    let base = count(classes.clone(), &edges);
    let dup = count(classes, &doubled);
    assert_eq!(base.connections, dup.connections);
    assert_eq!(base.degrees, dup.degrees);
    assert_eq!(base.network.count_total(), dup.network.count_total());
}

#[test]
fn self_pair_counts_each_unordered_pair_once() {
    let c = count(
        vec![ClassDefinition::new("X", ["p1", "p2", "p3"])],
        &[
            Interaction::undirected("p1", "p2"),
            Interaction::undirected("p2", "p1"),
            Interaction::undirected("p2", "p3"),
            Interaction::undirected("p3", "p3"),
        ],
    );
    let x = c.id("X");
    assert_eq!(c.connections.count(ConnectionMode::Undirected, x, x), 3);
    assert_eq!(c.connections.all(x, x), 3);
}

#[test]
fn degrees_count_member_neighbour_pairs() {
    let c = count(
        vec![
            ClassDefinition::new("A", ["p1", "p2"]),
            ClassDefinition::new("B", ["p3"]),
        ],
        &[
            Interaction::directed("p1", "p3", Effect::Stimulation),
            Interaction::directed("p2", "p3", Effect::Inhibition),
            Interaction::directed("p3", "p1", Effect::Neutral),
            Interaction::undirected("p1", "p2"),
        ],
    );
    let (a, b) = (c.id("A"), c.id("B"));
    let d = &c.degrees;
    assert_eq!(d.degree(ConnectionMode::Directed, Direction::Out, a), 2);
    assert_eq!(d.degree(ConnectionMode::Directed, Direction::In, a), 1);
    assert_eq!(d.degree(ConnectionMode::Directed, Direction::In, b), 2);
    assert_eq!(d.degree(ConnectionMode::Directed, Direction::Out, b), 1);
    assert_eq!(d.degree(ConnectionMode::Stimulatory, Direction::Out, a), 1);
    assert_eq!(d.degree(ConnectionMode::Inhibitory, Direction::Out, a), 1);
    assert_eq!(d.degree(ConnectionMode::Inhibitory, Direction::In, b), 1);
    assert_eq!(d.degree(ConnectionMode::Undirected, Direction::Out, a), 2);
    assert_eq!(d.degree(ConnectionMode::Undirected, Direction::Out, b), 0);
    assert_eq!(d.total(a), 5);
    assert_eq!(d.degree(ConnectionMode::All, Direction::In, b), 3);
}
