// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyline_comm --heading-base-level=0

//! Skyline Comm: communication edges between the entities of a containment tree.
//!
//! Snapshots deliver communications between leaves. This crate turns them into what is drawn:
//!
//! - [`CommunicationGraph::from_raw`] folds raw communications into one [`LeafEdge`] per
//!   unordered pair of leaves, summing request counts and noting traffic in both directions.
//! - [`CommunicationGraph::route`] draws each leaf edge between the entities its endpoints are
//!   currently drawn as (see [`ContainmentTree::attachment_point`]) and merges edges that land on
//!   the same pair. Edges inside a closed container disappear.
//! - [`Routing::classify`] assigns thicknesses from request-count [`Categories`].
//! - [`layout_pipes`] places pipes between the boxes of routed edges.
//!
//! ```rust
//! use skyline_comm::{CommunicationGraph, RawCommunication, ThicknessConfig};
//! use skyline_tree::{ContainerKind, ContainmentTree, EntitySpec, LeafKind};
//!
//! let mut tree = ContainmentTree::new(ContainerKind::Foundation, "app");
//! let root = tree.root();
//! let web = tree
//!     .insert(root, EntitySpec::container(ContainerKind::Package, "web"))
//!     .unwrap();
//! let api = tree.insert(web, EntitySpec::leaf(LeafKind::Class, "Api")).unwrap();
//! let db = tree.insert(root, EntitySpec::leaf(LeafKind::Class, "Db")).unwrap();
//!
//! let graph = CommunicationGraph::from_raw(&tree, &[RawCommunication::new(api, db, 12)]).unwrap();
//!
//! // `web` is closed, so the call is drawn from the package.
//! let mut routing = graph.route(&tree);
//! routing.classify(&ThicknessConfig::default());
//! assert_eq!(routing.edges()[0].source, web);
//!
//! tree.open(web).unwrap();
//! let routing = graph.route(&tree);
//! assert_eq!(routing.edges()[0].source, api);
//! ```
//!
//! [`ContainmentTree::attachment_point`]: skyline_tree::ContainmentTree::attachment_point
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod graph;
mod pipe;
mod routing;
mod thickness;

pub use error::CommError;
pub use graph::{
    CommunicationGraph, CommunicationId, EdgeKey, LeafEdge, LeafEdgeId, RawCommunication,
};
pub use pipe::{PipeConfig, PipeLayout, layout_pipes};
pub use routing::{RoutedEdge, RoutedEdgeId, Routing, RoutingAnomaly};
pub use thickness::{Categories, ThicknessConfig};
