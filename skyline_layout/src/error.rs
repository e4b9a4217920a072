// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use skyline_tree::EntityId;

use crate::graph::LayoutEdgeId;

/// Failure of a [`LayoutSolver`](crate::LayoutSolver).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// The solver rejected the graph.
    #[error("layout solver failed: {0}")]
    Failed(String),
    /// The solver did not answer in time.
    #[error("layout solver timed out after {0:?}")]
    TimedOut(Duration),
    /// The worker running the solver panicked or was cancelled.
    #[error("layout worker failed: {0}")]
    Worker(String),
}

/// Failure of one layout run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The solver failed; the previously committed layout stays in place.
    #[error(transparent)]
    SolverFailure(#[from] SolverError),
    /// The solver returned no position for a node of the graph.
    #[error("solver result has no position for {0}")]
    MissingNode(EntityId),
    /// The solver returned no route for an edge of the graph.
    #[error("solver result has no route for layout edge {0:?}")]
    MissingEdge(LayoutEdgeId),
}
