// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `CityView` over `Foundation { A { A1, A2 }, B { B1 } }` with `A1 -> B1 (10)`, `A2 -> B1 (2)`.

use skyline::comm::{EdgeKey, RawCommunication};
use skyline::highlight::{FocalTarget, RemoteTarget};
use skyline::tree::{ContainerKind, ContainmentTree, EntityId, EntitySpec, LayoutBox, LeafKind};
use skyline::{CityView, ViewConfig, ViewError};

struct Ids {
    a: EntityId,
    a1: EntityId,
    a2: EntityId,
    b: EntityId,
    b1: EntityId,
}

fn city() -> (CityView, Ids) {
    let mut tree = ContainmentTree::new(ContainerKind::Foundation, "app");
    let root = tree.root();
    let a = tree
        .insert(root, EntitySpec::container(ContainerKind::Package, "A").with_model_id("A"))
        .unwrap();
    let b = tree
        .insert(root, EntitySpec::container(ContainerKind::Package, "B").with_model_id("B"))
        .unwrap();
    let class = |tree: &mut ContainmentTree, parent, name: &str| {
        tree.insert(parent, EntitySpec::leaf(LeafKind::Class, name).with_model_id(name))
            .unwrap()
    };
    let a1 = class(&mut tree, a, "A1");
    let a2 = class(&mut tree, a, "A2");
    let b1 = class(&mut tree, b, "B1");
    let communications = [
        RawCommunication::new(a1, b1, 10),
        RawCommunication::new(a2, b1, 2),
    ];
    let view = CityView::new(tree, &communications, ViewConfig::default()).unwrap();
    (view, Ids { a, a1, a2, b, b1 })
}

#[test]
fn closed_packages_carry_the_merged_edge() {
    let (view, ids) = city();
    let edges = view.routing().edges();
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].source, edges[0].target), (ids.a, ids.b));
    assert_eq!(edges[0].request_count, 12);
}

#[test]
fn opening_packages_reroutes_and_reclassifies() {
    let (mut view, ids) = city();
    assert_eq!(view.open(ids.a), Ok(true));
    assert_eq!(view.open(ids.a), Ok(false));
    view.open(ids.b).unwrap();

    let routing = view.routing();
    assert_eq!(routing.edges().len(), 2);
    let thick = routing
        .edges()
        .iter()
        .find(|edge| edge.source == ids.a1)
        .unwrap();
    let thin = routing
        .edges()
        .iter()
        .find(|edge| edge.source == ids.a2)
        .unwrap();
    assert!(thick.thickness > thin.thickness);
    assert_eq!(thick.target, ids.b1);
}

#[test]
fn closing_b_with_b1_highlighted_clears_the_highlight() {
    let (mut view, ids) = city();
    view.open_all(view.tree().root()).unwrap();
    assert_eq!(view.highlight(FocalTarget::Entity(ids.b1)), Ok(true));
    let map = view.highlight_map();
    assert!(map.entity(ids.b1).is_highlighted());
    assert!(!map.entity(ids.a1).is_transparent());
    assert!(!map.entity(ids.a2).is_transparent());

    view.close(ids.b).unwrap();
    assert!(!view.highlight_context().is_active());
    assert!(view.highlight_map().is_empty());
}

#[test]
fn highlighting_a_leaf_dims_the_unrelated_sibling() {
    let (mut view, ids) = city();
    view.open_all(view.tree().root()).unwrap();
    view.highlight(FocalTarget::Entity(ids.a1)).unwrap();
    let map = view.highlight_map();
    assert!(map.entity(ids.a2).is_transparent());
    assert!(!map.entity(ids.b1).is_transparent());

    // Toggling the same target clears it again.
    assert_eq!(view.highlight(FocalTarget::Entity(ids.a1)), Ok(false));
    assert!(view.highlight_map().is_empty());
}

#[test]
fn leaves_are_not_disclosable() {
    let (mut view, ids) = city();
    assert!(matches!(view.open(ids.a1), Err(ViewError::Tree(_))));
    view.open(ids.a).unwrap();
    assert!(matches!(
        view.highlight(FocalTarget::Entity(ids.b1)),
        Err(ViewError::Highlight(_))
    ));
}

#[test]
fn remote_highlights_merge_with_the_local_one() {
    let (mut view, ids) = city();
    view.open_all(view.tree().root()).unwrap();
    view.highlight(FocalTarget::Entity(ids.a1)).unwrap();
    assert_eq!(
        view.remote_target(),
        Some(RemoteTarget::Entity {
            model_id: "A1".into()
        })
    );

    let remote = RemoteTarget::Edge(EdgeKey::new("B1", "A2"));
    assert_eq!(view.highlight_remote("peer", &remote), Ok(true));
    let map = view.highlight_map();
    assert!(map.entity(ids.a1).is_highlighted());
    // Dimmed by the local highlight only.
    assert!(!map.entity(ids.a2).is_transparent());

    let unknown = RemoteTarget::Entity {
        model_id: "Z".into(),
    };
    assert!(matches!(
        view.highlight_remote("peer", &unknown),
        Err(ViewError::UnresolvedRemote(_))
    ));
    assert!(view.clear_remote("peer"));
    assert!(view.highlight_map().entity(ids.a2).is_transparent());
}

#[test]
fn new_communications_keep_edge_highlights() {
    let (mut view, ids) = city();
    view.open_all(view.tree().root()).unwrap();
    let edge = view.graph().find(ids.a2, ids.b1).unwrap();
    view.highlight(FocalTarget::Edge(edge)).unwrap();

    view.set_communications(&[
        RawCommunication::new(ids.a1, ids.a2, 1),
        RawCommunication::new(ids.b1, ids.a2, 4),
    ])
    .unwrap();
    let moved = view.graph().find(ids.a2, ids.b1).unwrap();
    assert_eq!(
        view.highlight_context().target(),
        Some(&FocalTarget::Edge(moved))
    );
}

#[test]
fn default_disclosure_and_restore() {
    let (mut view, ids) = city();
    // Two top-level packages: nothing to open by default.
    assert!(!view.apply_default_disclosure());
    assert_eq!(view.restore_disclosure(["B", "missing"]), 1);
    assert!(view.tree().is_open(ids.b));
    assert_eq!(view.tree().open_model_ids().collect::<Vec<_>>(), ["B"]);
    assert_eq!(view.reveal(ids.a1), Ok(true));
    assert!(view.tree().is_visible(ids.a1));
}

#[test]
fn pipes_follow_routed_edges() {
    let (view, ids) = city();
    let pipes = view.pipes(|id| {
        let x = if id == ids.a { 0.0 } else { 4.0 };
        Some(LayoutBox::new(x, 0.0, 0.0, 2.0, 1.0, 2.0))
    });
    assert_eq!(pipes.len(), 1);
    assert_eq!(pipes[0].start.x, 1.0);
    assert_eq!(pipes[0].end.x, 5.0);
}
