// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element highlight state.

use hashbrown::HashMap;
use skyline_comm::RoutedEdgeId;
use skyline_tree::EntityId;

bitflags::bitflags! {
    /// Highlight bits of one entity or routed edge.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HighlightState: u8 {
        /// The element is the focus of a highlight.
        const HIGHLIGHTED = 0b0000_0001;
        /// The element is dimmed because it is unrelated to the focus.
        const TRANSPARENT = 0b0000_0010;
    }
}

impl Default for HighlightState {
    fn default() -> Self {
        Self::empty()
    }
}

impl HighlightState {
    /// Shorthand for `contains(HIGHLIGHTED)`.
    #[must_use]
    pub const fn is_highlighted(self) -> bool {
        self.contains(Self::HIGHLIGHTED)
    }

    /// Shorthand for `contains(TRANSPARENT)`.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.contains(Self::TRANSPARENT)
    }
}

/// Highlight state of every entity and routed edge that is not in the default state.
///
/// Elements without an entry are neither highlighted nor transparent. Edge entries refer to
/// the [`Routing`](skyline_comm::Routing) the map was computed against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightMap {
    entities: HashMap<EntityId, HighlightState>,
    edges: HashMap<RoutedEdgeId, HighlightState>,
}

impl HighlightMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> HighlightState {
        self.entities.get(&id).copied().unwrap_or_default()
    }

    /// State of a routed edge.
    #[must_use]
    pub fn edge(&self, id: RoutedEdgeId) -> HighlightState {
        self.edges.get(&id).copied().unwrap_or_default()
    }

    /// Returns `true` if no element deviates from the default state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.edges.is_empty()
    }

    /// Entities with a non-default state, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, HighlightState)> + '_ {
        self.entities.iter().map(|(id, state)| (*id, *state))
    }

    /// Routed edges with a non-default state, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (RoutedEdgeId, HighlightState)> + '_ {
        self.edges.iter().map(|(id, state)| (*id, *state))
    }

    /// Resets every element to the default state.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.edges.clear();
    }

    pub(crate) fn mark_entity(&mut self, id: EntityId, state: HighlightState) {
        *self.entities.entry(id).or_default() |= state;
    }

    pub(crate) fn mark_edge(&mut self, id: RoutedEdgeId, state: HighlightState) {
        *self.edges.entry(id).or_default() |= state;
    }

    /// Highlighted elements are never dimmed.
    pub(crate) fn settle(&mut self) {
        for state in self.entities.values_mut().chain(self.edges.values_mut()) {
            if state.is_highlighted() {
                state.remove(HighlightState::TRANSPARENT);
            }
        }
        self.entities.retain(|_, state| !state.is_empty());
        self.edges.retain(|_, state| !state.is_empty());
    }
}
