// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlight contexts and their composition.

use alloc::vec::Vec;

use crate::error::HighlightError;
use crate::propagate::propagate;
use crate::state::{HighlightMap, HighlightState};
use crate::target::{FocalTarget, HighlightInput};

/// How [`HighlightContext::highlight`] treats a target that is already highlighted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HighlightMode {
    /// Selecting the current target again clears the highlight.
    #[default]
    Toggle,
    /// Always (re)compute the highlight for the target.
    Replace,
}

/// One independent highlight: a focal target and the state it produces.
///
/// A view keeps one primary context; further contexts (for example one per remote peer)
/// can be kept side by side and merged with [`compose`].
///
/// ```rust
/// use skyline_comm::{CommunicationGraph, RawCommunication};
/// use skyline_highlight::{FocalTarget, HighlightContext, HighlightInput, HighlightMode};
/// use skyline_tree::{ContainerKind, ContainmentTree, EntitySpec, LeafKind};
///
/// let mut tree = ContainmentTree::new(ContainerKind::Foundation, "app");
/// let root = tree.root();
/// let a = tree.insert(root, EntitySpec::leaf(LeafKind::Class, "A")).unwrap();
/// let b = tree.insert(root, EntitySpec::leaf(LeafKind::Class, "B")).unwrap();
/// let c = tree.insert(root, EntitySpec::leaf(LeafKind::Class, "C")).unwrap();
/// let graph = CommunicationGraph::from_raw(&tree, &[RawCommunication::new(a, b, 1)]).unwrap();
/// let routing = graph.route(&tree);
/// let input = HighlightInput { tree: &tree, graph: &graph, routing: &routing };
///
/// let mut context = HighlightContext::new();
/// context.highlight(FocalTarget::Entity(a), input, HighlightMode::Toggle).unwrap();
/// assert!(context.map().entity(a).is_highlighted());
/// assert!(!context.map().entity(b).is_transparent());
/// assert!(context.map().entity(c).is_transparent());
///
/// // Selecting the same target again clears everything.
/// context.highlight(FocalTarget::Entity(a), input, HighlightMode::Toggle).unwrap();
/// assert!(context.map().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct HighlightContext {
    target: Option<FocalTarget>,
    map: HighlightMap,
    revision: u64,
}

impl HighlightContext {
    /// Creates a context without a target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current focal target.
    #[must_use]
    pub fn target(&self) -> Option<&FocalTarget> {
        self.target.as_ref()
    }

    /// Returns `true` if the context has a target.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// The state computed for the current target.
    #[must_use]
    pub fn map(&self) -> &HighlightMap {
        &self.map
    }

    /// Counter bumped whenever the target or the computed state changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Highlights `target`, replacing the previous highlight.
    ///
    /// Returns `Ok(true)` if the target is now highlighted and `Ok(false)` if the call
    /// toggled the highlight off. On error the context is left unchanged.
    pub fn highlight(
        &mut self,
        target: FocalTarget,
        input: HighlightInput<'_>,
        mode: HighlightMode,
    ) -> Result<bool, HighlightError> {
        if mode == HighlightMode::Toggle && self.is_current(&target, input) {
            self.clear();
            return Ok(false);
        }
        let map = propagate(&target, input)?;
        self.target = Some(target);
        self.map = map;
        self.bump();
        Ok(true)
    }

    /// Recomputes the state for the current target after visibility or routing changed.
    ///
    /// Clears the context if the target is no longer drawn. Returns `true` if a target is
    /// still highlighted.
    pub fn update(&mut self, input: HighlightInput<'_>) -> bool {
        let Some(target) = &self.target else {
            return false;
        };
        match propagate(target, input) {
            Ok(map) => {
                if map != self.map {
                    self.map = map;
                    self.bump();
                }
                true
            }
            Err(err) => {
                log::debug!("dropping highlight: {err}");
                self.clear();
                false
            }
        }
    }

    /// Removes the target and resets every element.
    pub fn clear(&mut self) {
        if self.target.is_none() && self.map.is_empty() {
            return;
        }
        self.target = None;
        self.map.clear();
        self.bump();
    }

    /// Returns `true` if `target` is what this context highlights right now.
    ///
    /// Two leaf edges drawn as the same routed edge count as the same target.
    fn is_current(&self, target: &FocalTarget, input: HighlightInput<'_>) -> bool {
        match (&self.target, target) {
            (Some(FocalTarget::Edge(current)), FocalTarget::Edge(candidate)) => {
                let routed = input.routing.containing(*current);
                current == candidate
                    || (routed.is_some() && routed == input.routing.containing(*candidate))
            }
            (Some(current), candidate) => current == candidate,
            (None, _) => false,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Merges several contexts computed against the same routing.
///
/// An element is highlighted if any context highlights it. It is transparent only if every
/// context with a target dims it and none highlights it. Contexts without a target are
/// ignored.
pub fn compose<'a, I>(contexts: I) -> HighlightMap
where
    I: IntoIterator<Item = &'a HighlightContext>,
{
    let mut active = contexts.into_iter().filter(|c| c.is_active());
    let Some(first) = active.next() else {
        return HighlightMap::new();
    };
    let rest: Vec<&HighlightContext> = active.collect();
    let mut merged = HighlightMap::new();

    for context in core::iter::once(first).chain(rest.iter().copied()) {
        for (id, state) in context.map().entities() {
            if state.is_highlighted() {
                merged.mark_entity(id, HighlightState::HIGHLIGHTED);
            }
        }
        for (id, state) in context.map().edges() {
            if state.is_highlighted() {
                merged.mark_edge(id, HighlightState::HIGHLIGHTED);
            }
        }
    }
    for (id, state) in first.map().entities() {
        if state.is_transparent() && rest.iter().all(|c| c.map().entity(id).is_transparent()) {
            merged.mark_entity(id, HighlightState::TRANSPARENT);
        }
    }
    for (id, state) in first.map().edges() {
        if state.is_transparent() && rest.iter().all(|c| c.map().edge(id).is_transparent()) {
            merged.mark_edge(id, HighlightState::TRANSPARENT);
        }
    }
    merged.settle();
    merged
}
