// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage 1: turn a landscape into a [`LayoutGraph`].

use kurbo::{Insets, Size};
use skyline_comm::{Categories, CommunicationId, RawCommunication};
use skyline_tree::{ContainerKind, ContainmentTree, EntityId, EntityKind, LeafKind};

use crate::config::{LayoutConfig, SizingConfig};
use crate::graph::{GraphNode, GraphOptions, LayoutGraph};
use crate::landscape::Projection;

/// Builds the layout graph of the rendered part of a landscape.
///
/// Systems, node groups with at least two nodes, nodes and applications become nodes;
/// every communication becomes (or joins) an edge between the rendered entities standing in
/// for its endpoints. Communications that collapse onto one entity are dropped, and those
/// with an endpoint that is not drawn at all are logged and skipped.
#[must_use]
pub fn build_layout_graph(
    tree: &ContainmentTree,
    communications: &[RawCommunication],
    config: &LayoutConfig,
) -> LayoutGraph {
    let sizing = &config.sizing;
    let spacing = sizing.spacing * sizing.scale;
    let root = tree.root();
    let name = tree.get(root).map_or("", |entity| entity.name());
    let mut graph = LayoutGraph::new(
        GraphNode::compound(root, name, Size::ZERO, Insets::ZERO),
        GraphOptions {
            direction: config.direction,
            edge_routing: config.edge_routing,
            spacing,
            border_spacing: spacing,
        },
    );
    let projection = Projection::new(tree);
    for &system in tree.children(root) {
        if projection.has_kind(system, ContainerKind::System) {
            add_system(&mut graph, projection, sizing, system);
        } else {
            log::debug!("{system} is not a system; left out of the landscape layout");
        }
    }
    connect(&mut graph, projection, communications, config);
    graph
}

fn add_system(
    graph: &mut LayoutGraph,
    projection: Projection<'_>,
    sizing: &SizingConfig,
    system: EntityId,
) {
    let tree = projection.tree();
    let Some(entity) = tree.get(system) else {
        return;
    };
    let scale = sizing.scale;
    let pad = sizing.padding * scale;
    let name = entity.name();
    let size = Size::new(
        (sizing.system_factor * sizing.default_width)
            .max(SizingConfig::label_width(name, sizing.label_height_system) + 6.0 * sizing.padding)
            * scale,
        sizing.system_factor * sizing.default_height * scale,
    );
    if !entity.is_open() {
        graph.add_node(
            tree.root(),
            GraphNode {
                padding: Insets::uniform(pad),
                ..GraphNode::leaf(system, name, size)
            },
        );
        return;
    }
    // The top padding leaves room for the label.
    let padding = Insets::new(pad, 8.0 * pad, pad, pad);
    graph.add_node(tree.root(), GraphNode::compound(system, name, size, padding));

    for &group in tree.children(system) {
        if !projection.has_kind(group, ContainerKind::NodeGroup) {
            continue;
        }
        let nodes = tree.children(group);
        let container = if nodes.len() >= 2 {
            let group_name = tree.get(group).map_or("", |entity| entity.name());
            let mut node =
                GraphNode::compound(group, group_name, Size::ZERO, Insets::uniform(pad));
            node.crossing_minimization = true;
            graph.add_node(system, node);
            group
        } else {
            system
        };
        for &node in nodes {
            if projection.is_rendered(node) {
                add_node(graph, projection, sizing, container, node);
            }
        }
    }
}

fn add_node(
    graph: &mut LayoutGraph,
    projection: Projection<'_>,
    sizing: &SizingConfig,
    container: EntityId,
    node: EntityId,
) {
    let tree = projection.tree();
    let scale = sizing.scale;
    let pad = sizing.padding * scale;
    let label = projection.node_label(node);
    let size = Size::new(
        sizing
            .default_width
            .max(SizingConfig::label_width(label, sizing.label_height_node) + 2.0 * sizing.padding)
            * scale,
        sizing.default_height * scale,
    );
    graph.add_node(
        container,
        GraphNode::compound(node, label, size, Insets::new(pad, pad, pad, 6.0 * pad)),
    );

    for &app in tree.children(node) {
        let Some(entity) = tree.get(app) else {
            continue;
        };
        if entity.kind() != EntityKind::Leaf(LeafKind::Application) {
            continue;
        }
        let label_width = SizingConfig::label_width(entity.name(), sizing.label_height_application);
        let width = sizing.default_width.max(
            label_width
                + sizing.application_icon_gap
                + sizing.application_icon
                + 3.0 * sizing.padding,
        );
        graph.add_node(
            node,
            GraphNode::leaf(
                app,
                entity.name(),
                Size::new(width * scale, sizing.default_height * scale),
            ),
        );
    }
}

fn connect(
    graph: &mut LayoutGraph,
    projection: Projection<'_>,
    communications: &[RawCommunication],
    config: &LayoutConfig,
) {
    let scale = config.sizing.scale;
    let port_size = config.sizing.port_size * scale;
    let categories = Categories::from_requests(
        communications
            .iter()
            .filter(|comm| comm.source != comm.target)
            .map(|comm| comm.request_count),
    );
    for (id, comm) in (0_u32..).map(CommunicationId).zip(communications) {
        let (Some(source), Some(target)) = (
            projection.representative(comm.source),
            projection.representative(comm.target),
        ) else {
            log::warn!("{id}: endpoint is not drawn in the landscape, skipping");
            continue;
        };
        if source == target {
            continue;
        }
        let category = categories.map_or(0, |c| c.category(comm.request_count));
        let thickness = config.thickness.thickness(category) * scale;
        if graph
            .connect(source, target, thickness, id, port_size)
            .is_none()
        {
            log::warn!("{id}: {source} -> {target} has no layout node, skipping");
        }
    }
}
