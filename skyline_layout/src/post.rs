// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage 3: map solver output back to model space.

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use skyline_comm::CommunicationId;
use skyline_tree::{EntityId, LayoutBox};

use crate::config::SizingConfig;
use crate::error::LayoutError;
use crate::graph::LayoutGraph;
use crate::solver::SolvedLayout;

/// A committed landscape layout in model units.
///
/// Landscapes are flat: boxes lie in the `x`/`y` plane (see [`LayoutBox::face`]) with `y`
/// growing upwards, and `z` grows with the nesting depth so that nested boxes stack towards
/// the viewer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandscapeLayout {
    /// Token of the request that produced this layout.
    pub token: u64,
    /// One box per drawn entity, including the root.
    pub boxes: HashMap<EntityId, LayoutBox>,
    /// Route of each drawn communication.
    pub polylines: HashMap<CommunicationId, Vec<Point>>,
}

impl LandscapeLayout {
    /// Box of an entity.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&LayoutBox> {
        self.boxes.get(&entity)
    }

    /// Route of a communication.
    #[must_use]
    pub fn polyline(&self, communication: CommunicationId) -> Option<&[Point]> {
        self.polylines.get(&communication).map(Vec::as_slice)
    }
}

/// Converts parent-relative solver output into absolute model-space boxes.
///
/// Fails without producing anything if the solver skipped a node or an edge.
pub(crate) fn remap(
    graph: &LayoutGraph,
    solved: &SolvedLayout,
    sizing: &SizingConfig,
    token: u64,
) -> Result<LandscapeLayout, LayoutError> {
    let scale = sizing.scale;
    let mut absolute: HashMap<EntityId, (Point, usize)> =
        HashMap::with_capacity(graph.nodes().len());
    let mut layout = LandscapeLayout {
        token,
        boxes: HashMap::with_capacity(graph.nodes().len()),
        polylines: HashMap::new(),
    };

    for node in graph.nodes() {
        let placed = solved
            .nodes
            .get(&node.entity)
            .ok_or(LayoutError::MissingNode(node.entity))?;
        let (origin, depth) = node
            .parent
            .and_then(|parent| absolute.get(&parent).copied())
            .map_or((Point::ZERO, 0), |(origin, depth)| (origin, depth + 1));
        let top_left = origin + placed.position.to_vec2();
        absolute.insert(node.entity, (top_left, depth));

        let width = placed.size.width / scale;
        let height = placed.size.height / scale;
        layout.boxes.insert(
            node.entity,
            LayoutBox::new(
                top_left.x / scale,
                -(top_left.y / scale) - height,
                depth as f64 * sizing.level_lift,
                width,
                height,
                sizing.box_depth,
            ),
        );
    }

    for edge in graph.edges() {
        let points = solved
            .edges
            .get(&edge.id)
            .ok_or(LayoutError::MissingEdge(edge.id))?;
        let points: Vec<Point> = points.iter().map(|p| to_model(*p, scale)).collect();
        for communication in &edge.communications {
            layout.polylines.insert(*communication, points.clone());
        }
    }
    Ok(layout)
}

fn to_model(point: Point, scale: f64) -> Point {
    let flipped = Vec2::new(point.x, -point.y) / scale;
    flipped.to_point()
}
