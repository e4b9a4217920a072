// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What can be highlighted, and how remote peers name it.

use alloc::string::String;
use alloc::vec::Vec;

use skyline_comm::{CommunicationGraph, EdgeKey, LeafEdgeId, Routing};
use skyline_tree::{ContainmentTree, EntityId};

/// Everything highlighting reads: the tree, its communications, and their current routing.
#[derive(Copy, Clone, Debug)]
pub struct HighlightInput<'a> {
    /// Containment tree with current disclosure state.
    pub tree: &'a ContainmentTree,
    /// Leaf-level communications.
    pub graph: &'a CommunicationGraph,
    /// Routing of `graph` against the current disclosure state of `tree`.
    pub routing: &'a Routing,
}

/// A sequence of leaf edges, e.g. the calls of one recorded trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TracePath {
    /// Leaf edges taking part in the trace.
    pub edges: Vec<LeafEdgeId>,
    /// The edge of the currently selected step, drawn highlighted.
    pub step: Option<LeafEdgeId>,
}

/// The focus of one highlight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocalTarget {
    /// A visible leaf or container.
    Entity(EntityId),
    /// The routed edge drawing this leaf edge.
    Edge(LeafEdgeId),
    /// Every edge of a trace.
    Trace(TracePath),
}

/// A highlight target named the way remote peers address it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RemoteTarget {
    /// An entity, by model id.
    Entity {
        /// Model id of the entity.
        model_id: String,
    },
    /// A leaf edge, by the model ids of its endpoints.
    Edge(EdgeKey),
}

impl RemoteTarget {
    /// Resolves a remote name against local state.
    ///
    /// Returns `None` if the model ids are unknown here.
    #[must_use]
    pub fn resolve(&self, input: HighlightInput<'_>) -> Option<FocalTarget> {
        match self {
            Self::Entity { model_id } => input.tree.by_model_id(model_id).map(FocalTarget::Entity),
            Self::Edge(key) => input
                .graph
                .find_by_key(input.tree, key)
                .map(FocalTarget::Edge),
        }
    }

    /// Names a local target for remote peers.
    ///
    /// Returns `None` for traces and for entities without model ids.
    #[must_use]
    pub fn of(target: &FocalTarget, input: HighlightInput<'_>) -> Option<Self> {
        match target {
            FocalTarget::Entity(id) => {
                let model_id = input.tree.get(*id)?.model_id()?;
                Some(Self::Entity {
                    model_id: model_id.into(),
                })
            }
            FocalTarget::Edge(edge) => input.graph.key_of(input.tree, *edge).map(Self::Edge),
            FocalTarget::Trace(_) => None,
        }
    }
}
