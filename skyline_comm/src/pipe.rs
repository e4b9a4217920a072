// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pipe endpoints and curve heights for routed edges.

use alloc::vec::Vec;

use skyline_tree::{EntityId, LayoutBox, Point3};

use crate::routing::{RoutedEdgeId, Routing};

/// Settings for [`layout_pipes`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PipeConfig {
    /// Multiplier applied to every curve height.
    pub curviness: f64,
    /// Curve height when it does not depend on distance.
    pub base_curve_height: f64,
    /// Use half the ground distance between the endpoints as curve height.
    pub curve_height_depends_on_distance: bool,
    /// Vertical offset of the end point above the target box's base.
    pub end_lift: f64,
    /// Multiplier applied to classified thickness.
    pub thickness_scale: f64,
}

impl PipeConfig {
    /// Reference settings.
    pub const DEFAULT: Self = Self {
        curviness: 1.0,
        base_curve_height: 20.0,
        curve_height_depends_on_distance: false,
        end_lift: 0.05,
        thickness_scale: 1.0,
    };

    /// Curve height for a pipe between two points.
    #[must_use]
    pub fn curve_height(&self, start: Point3, end: Point3) -> f64 {
        let height = if self.curve_height_depends_on_distance {
            start.ground().distance(end.ground()) * 0.5
        } else {
            self.base_curve_height
        };
        height * self.curviness
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Geometry of one rendered pipe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PipeLayout {
    /// The routed edge drawn by this pipe.
    pub edge: RoutedEdgeId,
    /// Base center of the source box.
    pub start: Point3,
    /// Base center of the target box, lifted by [`PipeConfig::end_lift`].
    pub end: Point3,
    /// Rendered thickness.
    pub thickness: f64,
    /// Height of the arc above the endpoints.
    pub curve_height: f64,
    /// Draw arrows in both directions.
    pub bidirectional: bool,
}

/// Places a pipe for every routed edge whose endpoints both have a box.
///
/// Edges without boxes (for example because the renderer culled an entity) are skipped.
pub fn layout_pipes<F>(routing: &Routing, mut boxes: F, config: &PipeConfig) -> Vec<PipeLayout>
where
    F: FnMut(EntityId) -> Option<LayoutBox>,
{
    let mut pipes = Vec::with_capacity(routing.edges().len());
    for edge in routing.edges() {
        let (Some(source), Some(target)) = (boxes(edge.source), boxes(edge.target)) else {
            continue;
        };
        let start = source.base_center();
        let mut end = target.base_center();
        end.y += config.end_lift;
        pipes.push(PipeLayout {
            edge: edge.id,
            start,
            end,
            thickness: edge.thickness * config.thickness_scale,
            curve_height: config.curve_height(start, end),
            bidirectional: edge.bidirectional,
        });
    }
    pipes
}
