// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A flexbox solver on top of Taffy.

use core::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use skyline_tree::EntityId;
use taffy::geometry::{Rect as TaffyRect, Size as TaffySize};
use taffy::prelude::TaffyMaxContent;
use taffy::style::{
    AlignContent, AlignItems, Dimension, Display, FlexDirection, FlexWrap, JustifyContent,
    LengthPercentage, Style,
};
use taffy::{NodeId as TaffyNode, TaffyError, TaffyTree};

use crate::error::SolverError;
use crate::graph::{Direction, EdgeRouting, GraphNode, GraphOptions, LayoutGraph};
use crate::solver::{LayoutSolver, SolvedLayout, SolvedNode};

/// Lays out compound nodes as wrapping flex lines and routes edges between the ports of
/// their endpoints.
///
/// With [`Direction::Right`] compound nodes are rows and edges leave the east side of the
/// source for the west side of the target; with [`Direction::Down`] they are columns and
/// edges run from the bottom of the source to the top of the target. The root gets
/// [`border_spacing`](GraphOptions::border_spacing) on top of its padding, and children of
/// nodes asking for crossing minimization are ordered sources first.
///
/// Solving runs on Tokio's blocking pool, so [`LayoutSolver::solve`] must be awaited inside
/// a Tokio runtime. [`solve_blocking`](Self::solve_blocking) is the synchronous core.
#[derive(Copy, Clone, Debug, Default)]
pub struct TaffySolver;

impl TaffySolver {
    /// Solves `graph` on the current thread.
    pub fn solve_blocking(graph: &LayoutGraph) -> Result<SolvedLayout, SolverError> {
        let mut taffy: TaffyTree<()> = TaffyTree::new();
        let mut ids: HashMap<EntityId, TaffyNode> = HashMap::with_capacity(graph.nodes().len());

        // Children are stored after their parents.
        for node in graph.nodes().iter().rev() {
            let children = ordered_children(graph, node)
                .iter()
                .map(|child| {
                    ids.get(child).copied().ok_or_else(|| {
                        SolverError::Failed(format!("{child} is nested but has no node"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let style = style_for(node, graph.options());
            let id = if node.compound {
                taffy.new_with_children(style, &children)
            } else {
                taffy.new_leaf(style)
            }
            .map_err(failed)?;
            ids.insert(node.entity, id);
        }

        let root = graph.root().entity;
        let root_id = ids
            .get(&root)
            .copied()
            .ok_or_else(|| SolverError::Failed(format!("root {root} has no node")))?;
        taffy
            .compute_layout(root_id, TaffySize::MAX_CONTENT)
            .map_err(failed)?;

        let mut solved = SolvedLayout::default();
        let mut absolute: HashMap<EntityId, Rect> = HashMap::with_capacity(ids.len());
        for node in graph.nodes() {
            let layout = taffy.layout(ids[&node.entity]).map_err(failed)?;
            let position = Point::new(
                f64::from(layout.location.x),
                f64::from(layout.location.y),
            );
            let size = Size::new(f64::from(layout.size.width), f64::from(layout.size.height));
            let origin = node
                .parent
                .and_then(|parent| absolute.get(&parent))
                .map_or(Point::ZERO, |rect| rect.origin());
            absolute.insert(
                node.entity,
                Rect::from_origin_size(origin + position.to_vec2(), size),
            );
            solved.nodes.insert(node.entity, SolvedNode { position, size });
        }

        let options = graph.options();
        for edge in graph.edges() {
            let (Some(source), Some(target)) =
                (absolute.get(&edge.source), absolute.get(&edge.target))
            else {
                continue;
            };
            solved.edges.insert(edge.id, route(source, target, options));
        }
        Ok(solved)
    }
}

fn route(source: &Rect, target: &Rect, options: &GraphOptions) -> Vec<Point> {
    let (start, end) = match options.direction {
        Direction::Right => (
            Point::new(source.x1, source.center().y),
            Point::new(target.x0, target.center().y),
        ),
        Direction::Down => (
            Point::new(source.center().x, source.y1),
            Point::new(target.center().x, target.y0),
        ),
    };
    match (options.edge_routing, options.direction) {
        (EdgeRouting::Polyline, _) => vec![start, end],
        (EdgeRouting::Orthogonal, Direction::Right) => {
            let mid = 0.5 * (start.x + end.x);
            vec![start, Point::new(mid, start.y), Point::new(mid, end.y), end]
        }
        (EdgeRouting::Orthogonal, Direction::Down) => {
            let mid = 0.5 * (start.y + end.y);
            vec![start, Point::new(start.x, mid), Point::new(end.x, mid), end]
        }
    }
}

/// Children of `node` in layout order.
///
/// Under crossing minimization each child is scored by the edges leaving its subtree minus
/// those entering it, and higher scores go first. Ties keep insertion order.
fn ordered_children(graph: &LayoutGraph, node: &GraphNode) -> Vec<EntityId> {
    let mut children = node.children.to_vec();
    if !node.crossing_minimization || children.len() < 2 {
        return children;
    }
    let mut flow: HashMap<EntityId, i64> = HashMap::with_capacity(children.len());
    for edge in graph.edges() {
        let from = child_containing(graph, node.entity, edge.source);
        let to = child_containing(graph, node.entity, edge.target);
        if from == to {
            continue;
        }
        if let Some(from) = from {
            *flow.entry(from).or_default() += 1;
        }
        if let Some(to) = to {
            *flow.entry(to).or_default() -= 1;
        }
    }
    children.sort_by_key(|child| Reverse(flow.get(child).copied().unwrap_or(0)));
    children
}

/// The child of `ancestor` whose subtree holds `entity`.
fn child_containing(
    graph: &LayoutGraph,
    ancestor: EntityId,
    entity: EntityId,
) -> Option<EntityId> {
    let mut current = entity;
    loop {
        let parent = graph.node(current)?.parent?;
        if parent == ancestor {
            return Some(current);
        }
        current = parent;
    }
}

#[async_trait]
impl LayoutSolver for TaffySolver {
    async fn solve(&self, graph: Arc<LayoutGraph>) -> Result<SolvedLayout, SolverError> {
        tokio::task::spawn_blocking(move || Self::solve_blocking(&graph))
            .await
            .map_err(|err| SolverError::Worker(err.to_string()))?
    }
}

fn failed(err: TaffyError) -> SolverError {
    SolverError::Failed(err.to_string())
}

#[allow(clippy::cast_possible_truncation, reason = "Taffy lays out in f32")]
fn length(value: f64) -> f32 {
    value as f32
}

fn style_for(node: &GraphNode, options: &GraphOptions) -> Style {
    let mut style = Style::DEFAULT;
    style.flex_shrink = 0.0;
    if !node.compound {
        style.size.width = Dimension::length(length(node.size.width));
        style.size.height = Dimension::length(length(node.size.height));
        return style;
    }
    style.display = Display::Flex;
    style.flex_direction = match options.direction {
        Direction::Right => FlexDirection::Row,
        Direction::Down => FlexDirection::Column,
    };
    style.flex_wrap = FlexWrap::Wrap;
    style.align_items = Some(AlignItems::Center);
    style.align_content = Some(AlignContent::Center);
    style.justify_content = Some(JustifyContent::Center);
    style.min_size.width = Dimension::length(length(node.size.width));
    style.min_size.height = Dimension::length(length(node.size.height));
    let border = if node.parent.is_none() {
        options.border_spacing
    } else {
        0.0
    };
    style.padding = TaffyRect {
        left: LengthPercentage::length(length(node.padding.x0 + border)),
        top: LengthPercentage::length(length(node.padding.y0 + border)),
        right: LengthPercentage::length(length(node.padding.x1 + border)),
        bottom: LengthPercentage::length(length(node.padding.y1 + border)),
    };
    let gap = LengthPercentage::length(length(options.spacing));
    style.gap = TaffySize {
        width: gap,
        height: gap,
    };
    style
}
