// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The nested graph handed to a [`LayoutSolver`](crate::LayoutSolver).

use hashbrown::HashMap;
use kurbo::{Insets, Size};
use skyline_comm::CommunicationId;
use skyline_tree::EntityId;
use smallvec::SmallVec;

/// Primary layout direction of a graph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Edges point from left to right.
    #[default]
    Right,
    /// Edges point from top to bottom.
    Down,
}

/// How edges are drawn by the solver.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeRouting {
    /// One straight segment between the two ports.
    #[default]
    Polyline,
    /// Axis-aligned segments bending halfway between the ports.
    Orthogonal,
}

/// Options applied to the whole graph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GraphOptions {
    /// Primary direction.
    pub direction: Direction,
    /// Edge drawing style.
    pub edge_routing: EdgeRouting,
    /// Gap between siblings, in solver units.
    pub spacing: f64,
    /// Gap between the root border and its content, in solver units, on top of the root
    /// node's own padding.
    pub border_spacing: f64,
}

/// One node of the layout graph, standing for one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    /// Entity drawn by this node.
    pub entity: EntityId,
    /// Enclosing node; `None` for the root.
    pub parent: Option<EntityId>,
    /// Nested nodes, in insertion order.
    pub children: SmallVec<[EntityId; 4]>,
    /// Label the size was derived from.
    pub label: String,
    /// Exact size of a box, or the minimum size of a compound node.
    pub size: Size,
    /// Space between the border of a compound node and its children.
    pub padding: Insets,
    /// Whether the node lays out children.
    pub compound: bool,
    /// Whether the solver should reorder children to reduce crossings: children with more
    /// outgoing than incoming edges are placed first.
    pub crossing_minimization: bool,
}

impl GraphNode {
    /// A box of fixed size.
    #[must_use]
    pub fn leaf(entity: EntityId, label: impl Into<String>, size: Size) -> Self {
        Self {
            entity,
            parent: None,
            children: SmallVec::new(),
            label: label.into(),
            size,
            padding: Insets::ZERO,
            compound: false,
            crossing_minimization: false,
        }
    }

    /// A node nesting other nodes, at least `min_size` large.
    #[must_use]
    pub fn compound(
        entity: EntityId,
        label: impl Into<String>,
        min_size: Size,
        padding: Insets,
    ) -> Self {
        Self {
            padding,
            compound: true,
            ..Self::leaf(entity, label, min_size)
        }
    }
}

/// Side of a node a port sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PortSide {
    /// Right side; outgoing edges.
    East,
    /// Left side; incoming edges.
    West,
}

/// Identifier of a [`Port`] within one [`LayoutGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub(crate) u32);

impl PortId {
    /// Index into [`LayoutGraph::ports`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where edges attach to a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Port {
    /// This port.
    pub id: PortId,
    /// Owning entity.
    pub entity: EntityId,
    /// Side of the owning node.
    pub side: PortSide,
    /// Edge length of the (square) port, in solver units.
    pub size: f64,
}

/// Identifier of a [`GraphEdge`] within one [`LayoutGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutEdgeId(pub(crate) u32);

impl LayoutEdgeId {
    /// Index into [`LayoutGraph::edges`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A directed edge between two ports.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    /// This edge.
    pub id: LayoutEdgeId,
    /// Source entity.
    pub source: EntityId,
    /// Target entity.
    pub target: EntityId,
    /// East port of the source.
    pub source_port: PortId,
    /// West port of the target.
    pub target_port: PortId,
    /// Drawn thickness, in solver units.
    pub thickness: f64,
    /// Communications drawn along this edge.
    pub communications: SmallVec<[CommunicationId; 2]>,
}

/// A nested graph of boxes, ports and edges.
///
/// Nodes are stored parents first, so a reverse walk over [`nodes`](Self::nodes) visits every
/// child before its parent.
#[derive(Clone, Debug)]
pub struct LayoutGraph {
    options: GraphOptions,
    nodes: Vec<GraphNode>,
    node_index: HashMap<EntityId, usize>,
    ports: Vec<Port>,
    port_index: HashMap<(EntityId, PortSide), PortId>,
    edges: Vec<GraphEdge>,
    edge_index: HashMap<(EntityId, EntityId), LayoutEdgeId>,
}

impl LayoutGraph {
    /// Creates a graph whose root node is `root`.
    #[must_use]
    pub fn new(root: GraphNode, options: GraphOptions) -> Self {
        let mut node_index = HashMap::new();
        node_index.insert(root.entity, 0);
        Self {
            options,
            nodes: vec![GraphNode {
                parent: None,
                ..root
            }],
            node_index,
            ports: Vec::new(),
            port_index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
        }
    }

    /// Graph-wide options.
    #[must_use]
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &GraphNode {
        &self.nodes[0]
    }

    /// All nodes, parents before children.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// The node drawing `entity`.
    #[must_use]
    pub fn node(&self, entity: EntityId) -> Option<&GraphNode> {
        self.node_index.get(&entity).map(|&index| &self.nodes[index])
    }

    /// Returns `true` if `entity` has a node.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.node_index.contains_key(&entity)
    }

    /// All ports.
    #[must_use]
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// The port with the given id.
    #[must_use]
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.index())
    }

    /// All edges.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// The edge from `source` to `target`, if any.
    #[must_use]
    pub fn edge_between(&self, source: EntityId, target: EntityId) -> Option<&GraphEdge> {
        self.edge_index
            .get(&(source, target))
            .map(|id| &self.edges[id.index()])
    }

    /// Adds `node` under `parent`.
    ///
    /// Returns `false` and leaves the graph unchanged when `parent` has no node or the entity
    /// already has one.
    pub fn add_node(&mut self, parent: EntityId, mut node: GraphNode) -> bool {
        let Some(&parent_index) = self.node_index.get(&parent) else {
            return false;
        };
        if self.node_index.contains_key(&node.entity) {
            return false;
        }
        node.parent = Some(parent);
        self.nodes[parent_index].children.push(node.entity);
        self.node_index.insert(node.entity, self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// The port on `side` of `entity`, created on first use.
    pub fn port_for(&mut self, entity: EntityId, side: PortSide, size: f64) -> PortId {
        if let Some(&id) = self.port_index.get(&(entity, side)) {
            return id;
        }
        let id = PortId(index_u32(self.ports.len()));
        self.ports.push(Port {
            id,
            entity,
            side,
            size,
        });
        self.port_index.insert((entity, side), id);
        id
    }

    /// Connects `source` to `target` for `communication`.
    ///
    /// An existing edge between the same ordered pair is reused: its thickness becomes the
    /// larger of both and the communication joins its list. Returns `None` when either end
    /// has no node.
    pub fn connect(
        &mut self,
        source: EntityId,
        target: EntityId,
        thickness: f64,
        communication: CommunicationId,
        port_size: f64,
    ) -> Option<LayoutEdgeId> {
        if !self.contains(source) || !self.contains(target) {
            return None;
        }
        if let Some(&id) = self.edge_index.get(&(source, target)) {
            let edge = &mut self.edges[id.index()];
            edge.thickness = edge.thickness.max(thickness);
            if !edge.communications.contains(&communication) {
                edge.communications.push(communication);
            }
            return Some(id);
        }
        let source_port = self.port_for(source, PortSide::East, port_size);
        let target_port = self.port_for(target, PortSide::West, port_size);
        let id = LayoutEdgeId(index_u32(self.edges.len()));
        let mut communications = SmallVec::new();
        communications.push(communication);
        self.edges.push(GraphEdge {
            id,
            source,
            target,
            source_port,
            target_port,
            thickness,
            communications,
        });
        self.edge_index.insert((source, target), id);
        Some(id)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "graphs are built from a tree indexed by u32"
)]
const fn index_u32(index: usize) -> u32 {
    index as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyline_tree::{ContainerKind, ContainmentTree, EntitySpec};

    fn options() -> GraphOptions {
        GraphOptions {
            direction: Direction::Right,
            edge_routing: EdgeRouting::Polyline,
            spacing: 1.0,
            border_spacing: 1.0,
        }
    }

    #[test]
    fn edges_between_the_same_pair_are_reused() {
        let mut tree = ContainmentTree::new(ContainerKind::Landscape, "l");
        let root = tree.root();
        let a = tree
            .insert(root, EntitySpec::container(ContainerKind::System, "a"))
            .unwrap();
        let b = tree
            .insert(root, EntitySpec::container(ContainerKind::System, "b"))
            .unwrap();
        let mut graph = LayoutGraph::new(
            GraphNode::compound(root, "", Size::ZERO, Insets::ZERO),
            options(),
        );
        assert!(graph.add_node(root, GraphNode::leaf(a, "a", Size::new(1.0, 1.0))));
        assert!(graph.add_node(root, GraphNode::leaf(b, "b", Size::new(1.0, 1.0))));
        assert!(!graph.add_node(root, GraphNode::leaf(b, "b", Size::new(1.0, 1.0))));

        let first = graph.connect(a, b, 2.0, CommunicationId(0), 0.1).unwrap();
        let again = graph.connect(a, b, 5.0, CommunicationId(1), 0.1).unwrap();
        let back = graph.connect(b, a, 1.0, CommunicationId(2), 0.1).unwrap();
        assert_eq!(first, again);
        assert_ne!(first, back);

        let edge = graph.edge_between(a, b).unwrap();
        assert_eq!(edge.thickness, 5.0);
        assert_eq!(edge.communications.as_slice(), &[CommunicationId(0), CommunicationId(1)]);
        // East and west ports of both systems.
        assert_eq!(graph.ports().len(), 4);
        assert_eq!(graph.root().children.as_slice(), &[a, b]);
    }
}
