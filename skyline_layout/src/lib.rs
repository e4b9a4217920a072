// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyline_layout --heading-base-level=0

//! Skyline Layout: nested box layouts for landscapes.
//!
//! A landscape tree (systems, node groups, nodes, applications) is laid out in three stages:
//!
//! 1. [`build_layout_graph`] sizes every drawn entity and turns communications into edges
//!    between ports. Hidden applications are represented by a drawn stand-in.
//! 2. A [`LayoutSolver`] positions the nodes. [`TaffySolver`] is a flexbox solver running on
//!    Tokio's blocking pool.
//! 3. The result is mapped back to model units as a [`LandscapeLayout`].
//!
//! [`LayoutPipeline`] ties the stages together. Runs are identified by monotonically
//! increasing tokens and only the newest one is committed, so a burst of disclosure changes
//! never applies an outdated layout.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use skyline_layout::{LayoutConfig, LayoutOutcome, LayoutPipeline, TaffySolver};
//! use skyline_tree::{ContainerKind, ContainmentTree, EntitySpec};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut tree = ContainmentTree::new(ContainerKind::Landscape, "landscape");
//! let root = tree.root();
//! let shop = tree
//!     .insert(root, EntitySpec::container(ContainerKind::System, "shop"))
//!     .unwrap();
//!
//! let pipeline = Arc::new(LayoutPipeline::new(TaffySolver, LayoutConfig::default()));
//! let run = pipeline.request(&tree, &[]);
//! let LayoutOutcome::Applied(layout) = run.finish().await.unwrap() else {
//!     unreachable!("no other run was requested");
//! };
//! assert!(layout.get(shop).is_some());
//! # }
//! ```

mod build;
mod config;
mod error;
mod graph;
mod landscape;
mod pipeline;
mod post;
mod solver;
mod taffy_solver;

pub use build::build_layout_graph;
pub use config::{LayoutConfig, SizingConfig};
pub use error::{LayoutError, SolverError};
pub use graph::{
    Direction, EdgeRouting, GraphEdge, GraphNode, GraphOptions, LayoutEdgeId, LayoutGraph, Port,
    PortId, PortSide,
};
pub use pipeline::{LayoutOutcome, LayoutPipeline, LayoutRun, PipelinePhase};
pub use post::LandscapeLayout;
pub use solver::{LayoutSolver, SolvedLayout, SolvedNode};
pub use taffy_solver::TaffySolver;
