// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The highlight propagation pass.

use alloc::vec;

use hashbrown::HashSet;
use skyline_comm::{LeafEdge, LeafEdgeId, RoutedEdgeId};
use skyline_tree::EntityId;

use crate::error::HighlightError;
use crate::state::{HighlightMap, HighlightState};
use crate::target::{FocalTarget, HighlightInput};

/// How leaf edges relate to the focus.
enum Focus {
    /// Keep edges touching a contained leaf; pull their other end in.
    Entity,
    /// Keep edges between contained leaves, except foreign self-loops.
    Edge(RoutedEdgeId),
    /// Keep the trace's edges.
    Trace(HashSet<LeafEdgeId>),
}

/// Computes the highlight state for one focal target.
///
/// The focus is highlighted; edges and leaves unrelated to it are dimmed, and so are the
/// containers on the way up from a dimmed leaf until a container that holds something
/// related is reached. Only rendered entities (those whose parent is open) are dimmed.
pub(crate) fn propagate(
    target: &FocalTarget,
    input: HighlightInput<'_>,
) -> Result<HighlightMap, HighlightError> {
    let HighlightInput {
        tree,
        graph,
        routing,
    } = input;
    let mut map = HighlightMap::new();
    let mut contained: HashSet<EntityId> = HashSet::new();

    let focus = match target {
        FocalTarget::Entity(id) => {
            let entity = tree.get(*id).ok_or(HighlightError::UnknownTarget)?;
            if !entity.is_visible() {
                return Err(HighlightError::NotVisible);
            }
            map.mark_entity(*id, HighlightState::HIGHLIGHTED);
            contained.extend(tree.leaves_under(*id));
            Focus::Entity
        }
        FocalTarget::Edge(edge) => {
            graph.get(*edge).ok_or(HighlightError::UnknownTarget)?;
            let routed_id = routing
                .containing(*edge)
                .ok_or(HighlightError::NotVisible)?;
            let routed = routing
                .get(routed_id)
                .ok_or(HighlightError::UnknownTarget)?;
            map.mark_edge(routed_id, HighlightState::HIGHLIGHTED);
            for member in &routed.members {
                if let Some(leaf_edge) = graph.get(*member) {
                    contained.insert(leaf_edge.source);
                    contained.insert(leaf_edge.target);
                }
            }
            Focus::Edge(routed_id)
        }
        FocalTarget::Trace(path) => {
            let mut edges = HashSet::with_capacity(path.edges.len());
            for id in &path.edges {
                let edge = graph.get(*id).ok_or(HighlightError::UnknownTarget)?;
                contained.insert(edge.source);
                contained.insert(edge.target);
                edges.insert(*id);
            }
            if let Some(step) = path.step.and_then(|step| routing.containing(step)) {
                map.mark_edge(step, HighlightState::HIGHLIGHTED);
            }
            Focus::Trace(edges)
        }
    };

    let mut involved = contained.clone();
    let mut kept = vec![false; graph.len()];
    for edge in graph.edges() {
        kept[edge.id.index()] = keeps(&focus, edge, &contained, &mut involved, |id| {
            routing.containing(id)
        });
    }
    for routed in routing.edges() {
        if !routed.members.iter().any(|m| kept[m.index()]) {
            map.mark_edge(routed.id, HighlightState::TRANSPARENT);
        }
    }

    let root = tree.root();
    let mut settled: HashSet<EntityId> = HashSet::new();
    for leaf in &involved {
        for ancestor in tree.ancestors(*leaf) {
            if ancestor == root || !settled.insert(ancestor) {
                break;
            }
        }
    }

    for leaf in tree.leaves() {
        if involved.contains(&leaf) {
            continue;
        }
        let Some(parent) = tree.parent(leaf) else {
            continue;
        };
        if tree.is_open(parent) {
            map.mark_entity(leaf, HighlightState::TRANSPARENT);
        }
        let mut current = parent;
        while current != root && settled.insert(current) {
            let Some(next) = tree.parent(current) else {
                break;
            };
            if tree.is_open(next) {
                map.mark_entity(current, HighlightState::TRANSPARENT);
            }
            current = next;
        }
    }

    map.settle();
    Ok(map)
}

fn keeps(
    focus: &Focus,
    edge: &LeafEdge,
    contained: &HashSet<EntityId>,
    involved: &mut HashSet<EntityId>,
    containing: impl Fn(LeafEdgeId) -> Option<RoutedEdgeId>,
) -> bool {
    match focus {
        Focus::Entity => {
            if contained.contains(&edge.source) {
                involved.insert(edge.target);
                true
            } else if contained.contains(&edge.target) {
                involved.insert(edge.source);
                true
            } else {
                false
            }
        }
        Focus::Edge(focal) => {
            let between = contained.contains(&edge.source) && contained.contains(&edge.target);
            let foreign_loop = edge.is_self_loop() && containing(edge.id) != Some(*focal);
            between && !foreign_loop
        }
        Focus::Trace(edges) => edges.contains(&edge.id),
    }
}
