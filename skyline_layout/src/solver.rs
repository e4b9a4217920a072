// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary to the layout engine.

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use kurbo::{Point, Size};
use skyline_tree::EntityId;

use crate::error::SolverError;
use crate::graph::{LayoutEdgeId, LayoutGraph};

/// Position and size the solver chose for one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolvedNode {
    /// Top-left corner, relative to the top-left corner of the parent node.
    pub position: Point,
    /// Final size.
    pub size: Size,
}

/// Output of a solver, keyed like the graph it was computed for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolvedLayout {
    /// Every node of the graph.
    pub nodes: HashMap<EntityId, SolvedNode>,
    /// Bend points of every edge, relative to the root's top-left corner.
    pub edges: HashMap<LayoutEdgeId, Vec<Point>>,
}

/// A layout engine.
///
/// Implementations may take arbitrarily long; the pipeline bounds the call with its
/// configured timeout and drops results that were superseded in the meantime. Solver
/// coordinates grow rightwards and downwards.
#[async_trait]
pub trait LayoutSolver: Send + Sync {
    /// Computes positions for every node and routes for every edge of `graph`.
    async fn solve(&self, graph: Arc<LayoutGraph>) -> Result<SolvedLayout, SolverError>;
}

#[async_trait]
impl<S: LayoutSolver + ?Sized> LayoutSolver for Arc<S> {
    async fn solve(&self, graph: Arc<LayoutGraph>) -> Result<SolvedLayout, SolverError> {
        (**self).solve(graph).await
    }
}
