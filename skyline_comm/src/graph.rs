// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf-level communication edges.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;
use skyline_tree::{ContainmentTree, EntityId};

use crate::error::CommError;

/// Index of a raw communication in the snapshot list it was loaded from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CommunicationId(pub u32);

impl CommunicationId {
    /// Position in the raw list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CommunicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comm#{}", self.0)
    }
}

/// A directed call relation between two leaves, as delivered by the snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawCommunication {
    /// Calling leaf.
    pub source: EntityId,
    /// Called leaf.
    pub target: EntityId,
    /// Number of observed requests.
    pub request_count: u64,
}

impl RawCommunication {
    /// Creates a raw communication.
    #[must_use]
    pub const fn new(source: EntityId, target: EntityId, request_count: u64) -> Self {
        Self {
            source,
            target,
            request_count,
        }
    }
}

/// Stable id of a [`LeafEdge`] within one [`CommunicationGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LeafEdgeId(pub(crate) u32);

impl LeafEdgeId {
    /// Position in [`CommunicationGraph::edges`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// All raw communications between one unordered pair of leaves.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafEdge {
    /// Aggregation id.
    pub id: LeafEdgeId,
    /// Source leaf of the first raw communication seen for this pair.
    pub source: EntityId,
    /// Target leaf of the first raw communication seen for this pair.
    pub target: EntityId,
    /// Summed request count.
    pub request_count: u64,
    /// `true` once a communication in the opposite direction was folded in.
    pub bidirectional: bool,
    /// Backing raw communications.
    pub raw: SmallVec<[CommunicationId; 2]>,
}

impl LeafEdge {
    /// Returns `true` if source and target are the same leaf.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns `true` if `leaf` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, leaf: EntityId) -> bool {
        self.source == leaf || self.target == leaf
    }
}

pub(crate) fn unordered(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Leaf-level communication edges of one snapshot.
///
/// Built once per snapshot from the raw list; independent of disclosure state. Routing the
/// edges onto what is currently visible is done by [`route`](Self::route).
#[derive(Clone, Debug, Default)]
pub struct CommunicationGraph {
    edges: Vec<LeafEdge>,
    index: HashMap<(EntityId, EntityId), LeafEdgeId>,
}

impl CommunicationGraph {
    /// Folds raw communications into one edge per unordered pair of leaves.
    ///
    /// Edges are numbered in order of first appearance. Both endpoints of every raw
    /// communication must be leaves of `tree`.
    pub fn from_raw(tree: &ContainmentTree, raw: &[RawCommunication]) -> Result<Self, CommError> {
        let mut graph = Self::default();
        for (position, comm) in raw.iter().enumerate() {
            let communication = CommunicationId(edge_index(position));
            for entity in [comm.source, comm.target] {
                if !tree.contains(entity) {
                    return Err(CommError::UnknownEndpoint {
                        communication,
                        entity,
                    });
                }
                if !tree.is_leaf(entity) {
                    return Err(CommError::NotALeaf {
                        communication,
                        entity,
                    });
                }
            }
            graph.fold(communication, comm);
        }
        Ok(graph)
    }

    fn fold(&mut self, communication: CommunicationId, comm: &RawCommunication) {
        let key = unordered(comm.source, comm.target);
        if let Some(id) = self.index.get(&key) {
            let edge = &mut self.edges[id.index()];
            edge.request_count = edge.request_count.saturating_add(comm.request_count);
            if edge.source != comm.source {
                edge.bidirectional = true;
            }
            edge.raw.push(communication);
            return;
        }
        let id = LeafEdgeId(edge_index(self.edges.len()));
        let mut raw = SmallVec::new();
        raw.push(communication);
        self.edges.push(LeafEdge {
            id,
            source: comm.source,
            target: comm.target,
            request_count: comm.request_count,
            bidirectional: false,
            raw,
        });
        self.index.insert(key, id);
    }

    /// All edges in order of first appearance.
    #[must_use]
    pub fn edges(&self) -> &[LeafEdge] {
        &self.edges
    }

    /// Access an edge.
    #[must_use]
    pub fn get(&self, id: LeafEdgeId) -> Option<&LeafEdge> {
        self.edges.get(id.index())
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if there are no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The edge between two leaves, in either direction.
    #[must_use]
    pub fn find(&self, a: EntityId, b: EntityId) -> Option<LeafEdgeId> {
        self.index.get(&unordered(a, b)).copied()
    }

    /// The edge addressed by an [`EdgeKey`], resolving model ids through `tree`.
    #[must_use]
    pub fn find_by_key(&self, tree: &ContainmentTree, key: &EdgeKey) -> Option<LeafEdgeId> {
        let a = tree.by_model_id(key.first())?;
        let b = tree.by_model_id(key.second())?;
        self.find(a, b)
    }

    /// The [`EdgeKey`] of an edge, if both endpoints carry model ids.
    #[must_use]
    pub fn key_of(&self, tree: &ContainmentTree, id: LeafEdgeId) -> Option<EdgeKey> {
        let edge = self.get(id)?;
        let a = tree.get(edge.source)?.model_id()?;
        let b = tree.get(edge.target)?.model_id()?;
        Some(EdgeKey::new(a, b))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "edge counts are bounded by the snapshot size"
)]
pub(crate) const fn edge_index(position: usize) -> u32 {
    position as u32
}

/// Direction-independent identifier of a leaf edge across sessions.
///
/// Made of the two leaves' model ids in lexicographic order; its text form joins them with
/// `###`, which is how remote peers address a communication.
///
/// ```rust
/// use skyline_comm::EdgeKey;
///
/// let key = EdgeKey::new("shop.Cart", "shop.Api");
/// assert_eq!(key, EdgeKey::new("shop.Api", "shop.Cart"));
/// assert_eq!(key.to_string(), "shop.Api###shop.Cart");
/// assert_eq!(EdgeKey::parse("shop.Api###shop.Cart"), Some(key));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    first: String,
    second: String,
}

impl EdgeKey {
    /// Separator used by the text form.
    pub const SEPARATOR: &'static str = "###";

    /// Builds a key from two model ids in any order.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Parses the `a###b` text form.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (a, b) = text.split_once(Self::SEPARATOR)?;
        if a.is_empty() || b.is_empty() {
            return None;
        }
        Some(Self::new(a, b))
    }

    /// The lexicographically smaller model id.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexicographically larger model id.
    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.first, Self::SEPARATOR, self.second)
    }
}
