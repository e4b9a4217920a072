// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing leaf edges onto the currently visible entities.

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use skyline_tree::{ContainmentTree, EntityId};

use crate::graph::{CommunicationGraph, LeafEdgeId, edge_index, unordered};

/// Id of a [`RoutedEdge`] within one [`Routing`].
///
/// Only meaningful for the routing that issued it; every disclosure change produces a new
/// routing with fresh ids.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RoutedEdgeId(pub(crate) u32);

impl RoutedEdgeId {
    /// Position in [`Routing::edges`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One rendered edge: every leaf edge whose endpoints are drawn as the same pair of entities.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutedEdge {
    /// Id within the routing.
    pub id: RoutedEdgeId,
    /// Attachment point of the source side (orientation of the first member).
    pub source: EntityId,
    /// Attachment point of the target side.
    pub target: EntityId,
    /// Summed request count of all members.
    pub request_count: u64,
    /// `true` if traffic flows in both directions between the attachment points.
    pub bidirectional: bool,
    /// `true` for a visible leaf calling itself.
    pub self_loop: bool,
    /// Leaf edges drawn as this edge, in order of first appearance.
    pub members: SmallVec<[LeafEdgeId; 2]>,
    /// Rendered thickness, assigned by [`Routing::classify`].
    pub thickness: f64,
}

/// A leaf edge whose endpoint could not be drawn as any visible entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoutingAnomaly {
    /// The skipped edge.
    pub edge: LeafEdgeId,
    /// The endpoint without a visible representative.
    pub endpoint: EntityId,
}

/// Result of routing a [`CommunicationGraph`] against one visibility state.
#[derive(Clone, Debug, Default)]
pub struct Routing {
    pub(crate) edges: Vec<RoutedEdge>,
    by_member: HashMap<LeafEdgeId, RoutedEdgeId>,
    hidden: Vec<LeafEdgeId>,
    anomalies: Vec<RoutingAnomaly>,
    tree_revision: u64,
}

impl Routing {
    /// Rendered edges in order of first appearance.
    #[must_use]
    pub fn edges(&self) -> &[RoutedEdge] {
        &self.edges
    }

    /// Access a rendered edge.
    #[must_use]
    pub fn get(&self, id: RoutedEdgeId) -> Option<&RoutedEdge> {
        self.edges.get(id.index())
    }

    /// The rendered edge a leaf edge is drawn as, if it is drawn at all.
    #[must_use]
    pub fn containing(&self, edge: LeafEdgeId) -> Option<RoutedEdgeId> {
        self.by_member.get(&edge).copied()
    }

    /// Leaf edges that are internal to a closed container (or a hidden self-loop).
    #[must_use]
    pub fn hidden(&self) -> &[LeafEdgeId] {
        &self.hidden
    }

    /// Leaf edges skipped because an endpoint had no visible representative.
    #[must_use]
    pub fn anomalies(&self) -> &[RoutingAnomaly] {
        &self.anomalies
    }

    /// Revision of the tree this routing was computed for.
    #[must_use]
    pub fn tree_revision(&self) -> u64 {
        self.tree_revision
    }

    /// Returns `true` if `tree` changed since this routing was computed.
    #[must_use]
    pub fn is_stale(&self, tree: &ContainmentTree) -> bool {
        tree.revision() != self.tree_revision
    }
}

impl CommunicationGraph {
    /// Routes every leaf edge to the entities its endpoints are currently drawn as.
    ///
    /// - A leaf calling itself stays a separate, flagged edge while the leaf is visible and is
    ///   hidden otherwise.
    /// - Distinct leaves drawn as the same entity are internal to a closed container; the edge
    ///   is hidden.
    /// - Edges that end up between the same unordered pair of entities are merged.
    ///
    /// Output order follows the order of the leaf edges, so routing the same graph against
    /// the same visibility always yields the same result.
    #[must_use]
    pub fn route(&self, tree: &ContainmentTree) -> Routing {
        let mut routing = Routing {
            tree_revision: tree.revision(),
            ..Routing::default()
        };
        let mut by_pair: HashMap<(EntityId, EntityId), RoutedEdgeId> = HashMap::new();

        for edge in self.edges() {
            let source = tree.attachment_point(edge.source);
            let target = tree.attachment_point(edge.target);
            let (source, target) = match (source, target) {
                (Some(source), Some(target)) => (source, target),
                (None, _) | (_, None) => {
                    let endpoint = if source.is_none() {
                        edge.source
                    } else {
                        edge.target
                    };
                    log::warn!("no visible representative for {endpoint}; skipping edge");
                    routing.anomalies.push(RoutingAnomaly {
                        edge: edge.id,
                        endpoint,
                    });
                    continue;
                }
            };

            if edge.is_self_loop() {
                if source != edge.source {
                    routing.hidden.push(edge.id);
                } else {
                    routing.push_new(edge.id, source, target, edge.request_count, false, true);
                }
                continue;
            }
            if source == target {
                routing.hidden.push(edge.id);
                continue;
            }

            let pair = unordered(source, target);
            if let Some(id) = by_pair.get(&pair) {
                let routed = &mut routing.edges[id.index()];
                routed.request_count = routed.request_count.saturating_add(edge.request_count);
                if routed.source != source || edge.bidirectional {
                    routed.bidirectional = true;
                }
                routed.members.push(edge.id);
                routing.by_member.insert(edge.id, *id);
            } else {
                let id = routing.push_new(
                    edge.id,
                    source,
                    target,
                    edge.request_count,
                    edge.bidirectional,
                    false,
                );
                by_pair.insert(pair, id);
            }
        }
        routing
    }
}

impl Routing {
    fn push_new(
        &mut self,
        member: LeafEdgeId,
        source: EntityId,
        target: EntityId,
        request_count: u64,
        bidirectional: bool,
        self_loop: bool,
    ) -> RoutedEdgeId {
        let id = RoutedEdgeId(edge_index(self.edges.len()));
        let mut members = SmallVec::new();
        members.push(member);
        self.edges.push(RoutedEdge {
            id,
            source,
            target,
            request_count,
            bidirectional,
            self_loop,
            members,
            thickness: 0.0,
        });
        self.by_member.insert(member, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawCommunication;
    use skyline_tree::{ContainerKind, EntitySpec, LeafKind};

    struct Fixture {
        tree: ContainmentTree,
        a: EntityId,
        a1: EntityId,
        a2: EntityId,
        b: EntityId,
        b1: EntityId,
    }

    fn fixture() -> Fixture {
        let mut tree = ContainmentTree::new(ContainerKind::Foundation, "app");
        let root = tree.root();
        let a = tree
            .insert(root, EntitySpec::container(ContainerKind::Package, "A"))
            .unwrap();
        let a1 = tree.insert(a, EntitySpec::leaf(LeafKind::Class, "A1")).unwrap();
        let a2 = tree.insert(a, EntitySpec::leaf(LeafKind::Class, "A2")).unwrap();
        let b = tree
            .insert(root, EntitySpec::container(ContainerKind::Package, "B"))
            .unwrap();
        let b1 = tree.insert(b, EntitySpec::leaf(LeafKind::Class, "B1")).unwrap();
        Fixture {
            tree,
            a,
            a1,
            a2,
            b,
            b1,
        }
    }

    #[test]
    fn closed_containers_merge_edges() {
        let f = fixture();
        let raw = [
            RawCommunication::new(f.a1, f.b1, 10),
            RawCommunication::new(f.b1, f.a2, 2),
        ];
        let graph = CommunicationGraph::from_raw(&f.tree, &raw).unwrap();
        let routing = graph.route(&f.tree);
        assert_eq!(routing.edges().len(), 1);
        let edge = &routing.edges()[0];
        assert_eq!((edge.source, edge.target), (f.a, f.b));
        assert_eq!(edge.request_count, 12);
        assert!(edge.bidirectional, "traffic flows both ways between A and B");
        assert_eq!(edge.members.len(), 2);
    }

    #[test]
    fn open_containers_keep_edges_apart() {
        let mut f = fixture();
        f.tree.open(f.a).unwrap();
        f.tree.open(f.b).unwrap();
        let raw = [
            RawCommunication::new(f.a1, f.b1, 10),
            RawCommunication::new(f.a2, f.b1, 2),
        ];
        let graph = CommunicationGraph::from_raw(&f.tree, &raw).unwrap();
        let routing = graph.route(&f.tree);
        let pairs: Vec<_> = routing
            .edges()
            .iter()
            .map(|e| (e.source, e.target, e.request_count))
            .collect();
        assert_eq!(pairs, [(f.a1, f.b1, 10), (f.a2, f.b1, 2)]);
        assert!(!routing.is_stale(&f.tree));
    }

    #[test]
    fn internal_edges_and_self_loops() {
        let mut f = fixture();
        let raw = [
            RawCommunication::new(f.a1, f.a2, 5),
            RawCommunication::new(f.a1, f.a1, 1),
        ];
        let graph = CommunicationGraph::from_raw(&f.tree, &raw).unwrap();
        let closed = graph.route(&f.tree);
        assert!(closed.edges().is_empty());
        assert_eq!(closed.hidden().len(), 2);

        f.tree.open(f.a).unwrap();
        assert!(closed.is_stale(&f.tree));
        let open = graph.route(&f.tree);
        assert_eq!(open.edges().len(), 2);
        assert!(!open.edges()[0].self_loop);
        assert!(open.edges()[1].self_loop);
        assert_eq!(open.edges()[1].source, f.a1);
        let self_loop_member = graph.edges()[1].id;
        assert_eq!(open.containing(self_loop_member), Some(open.edges()[1].id));
    }
}
