// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizing constants and pipeline settings.

use core::time::Duration;

use skyline_comm::ThicknessConfig;

use crate::graph::{Direction, EdgeRouting};

/// Box sizes of the landscape, in model units.
///
/// Every length is multiplied by [`scale`](Self::scale) before it reaches the solver, and
/// solver output is divided by it again.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SizingConfig {
    /// Solver units per model unit.
    pub scale: f64,
    /// Width of a node or application box.
    pub default_width: f64,
    /// Height of a node or application box.
    pub default_height: f64,
    /// Systems are this many default boxes wide and high.
    pub system_factor: f64,
    /// Padding unit inside containers.
    pub padding: f64,
    /// Label height of systems; a label is as wide as its characters times its height.
    pub label_height_system: f64,
    /// Label height of nodes.
    pub label_height_node: f64,
    /// Label height of applications.
    pub label_height_application: f64,
    /// Icon drawn next to application labels.
    pub application_icon: f64,
    /// Gap between the icon and the label.
    pub application_icon_gap: f64,
    /// Spacing between siblings and around the root content, before scaling.
    pub spacing: f64,
    /// Size of an edge port.
    pub port_size: f64,
    /// Vertical extent of every box.
    pub box_depth: f64,
    /// Height added per nesting level.
    pub level_lift: f64,
}

impl SizingConfig {
    /// The reference landscape constants.
    pub const DEFAULT: Self = Self {
        scale: 180.0,
        default_width: 1.5,
        default_height: 0.75,
        system_factor: 2.5,
        padding: 0.1,
        label_height_system: 0.4,
        label_height_node: 0.2,
        label_height_application: 0.21,
        application_icon: 0.16,
        application_icon_gap: 0.15,
        spacing: 0.2,
        port_size: 0.000_001,
        box_depth: 0.05,
        level_lift: 0.05,
    };

    /// Length of a label in model units.
    #[must_use]
    pub fn label_width(label: &str, height: f64) -> f64 {
        label.chars().count() as f64 * height
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Settings of a [`LayoutPipeline`](crate::LayoutPipeline).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LayoutConfig {
    /// Box sizes.
    pub sizing: SizingConfig,
    /// Edge thickness per request-count category.
    pub thickness: ThicknessConfig,
    /// Primary direction of the landscape graph.
    pub direction: Direction,
    /// How the solver draws edges.
    pub edge_routing: EdgeRouting,
    /// Upper bound for one solver call; `None` waits indefinitely.
    pub solver_timeout: Option<Duration>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sizing: SizingConfig::DEFAULT,
            thickness: ThicknessConfig::DEFAULT,
            direction: Direction::Right,
            edge_routing: EdgeRouting::Polyline,
            solver_timeout: Some(Duration::from_secs(30)),
        }
    }
}
