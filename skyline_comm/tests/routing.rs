// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing determinism and thickness assignment over a small city.

use skyline_comm::{CommunicationGraph, RawCommunication, ThicknessConfig};
use skyline_tree::{ContainerKind, ContainmentTree, EntityId, EntitySpec, LeafKind};

struct City {
    tree: ContainmentTree,
    a: EntityId,
    b: EntityId,
    a1: EntityId,
    a2: EntityId,
    b1: EntityId,
    c: EntityId,
}

/// `Foundation { A { A1, A2 }, B { B1 }, C }`
fn city() -> City {
    let mut tree = ContainmentTree::new(ContainerKind::Foundation, "app");
    let root = tree.root();
    let a = tree
        .insert(root, EntitySpec::container(ContainerKind::Package, "A"))
        .unwrap();
    let a1 = tree
        .insert(a, EntitySpec::leaf(LeafKind::Class, "A1"))
        .unwrap();
    let a2 = tree
        .insert(a, EntitySpec::leaf(LeafKind::Class, "A2"))
        .unwrap();
    let b = tree
        .insert(root, EntitySpec::container(ContainerKind::Package, "B"))
        .unwrap();
    let b1 = tree
        .insert(b, EntitySpec::leaf(LeafKind::Class, "B1"))
        .unwrap();
    let c = tree
        .insert(root, EntitySpec::leaf(LeafKind::Class, "C"))
        .unwrap();
    City {
        tree,
        a,
        b,
        a1,
        a2,
        b1,
        c,
    }
}

#[test]
fn routing_is_deterministic() {
    let mut city = city();
    city.tree.open(city.a).unwrap();
    let raw = [
        RawCommunication::new(city.a1, city.b1, 10),
        RawCommunication::new(city.a2, city.b1, 0),
        RawCommunication::new(city.c, city.a1, 2),
        RawCommunication::new(city.b1, city.c, 6),
    ];
    let graph = CommunicationGraph::from_raw(&city.tree, &raw).unwrap();
    let first = graph.route(&city.tree);
    let second = graph.route(&city.tree);
    assert_eq!(first.edges(), second.edges());
    assert_eq!(first.hidden(), second.hidden());
}

#[test]
fn thickness_follows_request_categories() {
    let mut city = city();
    city.tree.open(city.a).unwrap();
    city.tree.open(city.b).unwrap();
    let raw = [
        RawCommunication::new(city.a1, city.b1, 0),
        RawCommunication::new(city.a2, city.b1, 10),
        RawCommunication::new(city.c, city.b1, 2),
        RawCommunication::new(city.c, city.c, 99),
    ];
    let graph = CommunicationGraph::from_raw(&city.tree, &raw).unwrap();
    let mut routing = graph.route(&city.tree);
    let config = ThicknessConfig::default();
    let categories = routing.classify(&config).unwrap();
    assert_eq!(categories.bounds(), [0.0, 2.0, 4.0, 10.0]);

    let thickness: Vec<f64> = routing.edges().iter().map(|e| e.thickness).collect();
    let expected = [
        config.thickness(0),
        config.thickness(3),
        config.thickness(1),
        config.thickness(0),
    ];
    assert_eq!(thickness.len(), expected.len());
    for (got, want) in thickness.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{got} != {want}");
    }
    assert!(routing.edges()[3].self_loop);
}

#[test]
fn closing_reroutes_to_the_container() {
    let mut city = city();
    city.tree.open(city.a).unwrap();
    city.tree.open(city.b).unwrap();
    let raw = [
        RawCommunication::new(city.a1, city.b1, 3),
        RawCommunication::new(city.a2, city.b1, 4),
    ];
    let graph = CommunicationGraph::from_raw(&city.tree, &raw).unwrap();
    assert_eq!(graph.route(&city.tree).edges().len(), 2);

    city.tree.close(city.a).unwrap();
    let routing = graph.route(&city.tree);
    assert_eq!(routing.edges().len(), 1);
    let edge = &routing.edges()[0];
    assert_eq!((edge.source, edge.target), (city.a, city.b1));
    assert_eq!(edge.request_count, 7);
    assert!(!edge.bidirectional);
}
