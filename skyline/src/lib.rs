// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyline --heading-base-level=0

//! Skyline: hierarchical software visualizations.
//!
//! This crate wires the Skyline components into two views:
//!
//! - [`CityView`]: an application drawn as a city. Packages open and close, communications
//!   are re-routed to whatever is drawn, and highlights follow along.
//! - [`LandscapeView`]: systems, node groups, nodes and applications laid out by a
//!   [`LayoutSolver`](skyline_layout::LayoutSolver), newest request first.
//!
//! The building blocks are re-exported as modules:
//!
//! - [`tree`]: the containment tree and its disclosure state.
//! - [`comm`]: communication aggregation, routing and thickness.
//! - [`highlight`]: highlight propagation and composition.
//! - [`layout`]: landscape layout graphs, solvers and the layout pipeline.
//!
//! ```rust
//! use skyline::{CityView, ViewConfig};
//! use skyline::comm::RawCommunication;
//! use skyline::highlight::FocalTarget;
//! use skyline::tree::{ContainerKind, ContainmentTree, EntitySpec, LeafKind};
//!
//! let mut tree = ContainmentTree::new(ContainerKind::Foundation, "app");
//! let root = tree.root();
//! let web = tree
//!     .insert(root, EntitySpec::container(ContainerKind::Package, "web"))
//!     .unwrap();
//! let api = tree.insert(web, EntitySpec::leaf(LeafKind::Class, "Api")).unwrap();
//! let db = tree.insert(root, EntitySpec::leaf(LeafKind::Class, "Db")).unwrap();
//!
//! let mut city =
//!     CityView::new(tree, &[RawCommunication::new(api, db, 3)], ViewConfig::default()).unwrap();
//! city.open(web).unwrap();
//! city.highlight(FocalTarget::Entity(api)).unwrap();
//! assert!(city.highlight_map().entity(api).is_highlighted());
//!
//! // Closing the package hides the highlighted class and drops the highlight.
//! city.close(web).unwrap();
//! assert!(city.highlight_map().is_empty());
//! ```

mod city;
mod config;
mod error;
mod landscape;

pub use city::CityView;
pub use config::ViewConfig;
pub use error::ViewError;
pub use landscape::LandscapeView;

pub use skyline_comm as comm;
pub use skyline_highlight as highlight;
pub use skyline_layout as layout;
pub use skyline_tree as tree;
