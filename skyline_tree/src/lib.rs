// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyline_tree --heading-base-level=0

//! Skyline Tree: the containment tree behind landscape and city views.
//!
//! A [`ContainmentTree`] stores every entity of one loaded snapshot in an arena addressed by
//! [`EntityId`]. Entities are either containers (systems, node groups, nodes, packages, and the
//! two root kinds) or leaves (applications, classes).
//!
//! Each container carries an `open` flag and every entity a `visible` flag. The tree maintains
//! one invariant at all times:
//!
//! - The root is open and visible.
//! - Any other entity is visible exactly when its parent is visible and open.
//!
//! ## Disclosure
//!
//! [`ContainmentTree::open`], [`ContainmentTree::close`], and [`ContainmentTree::toggle`] change
//! one container; [`ContainmentTree::open_all`] and [`ContainmentTree::close_all`] act on whole
//! subtrees. All of them are idempotent and report whether anything changed. Closing collapses
//! the subtree: reopening a container only reveals its direct children again.
//!
//! [`ContainmentTree::apply_default_disclosure`] opens the chain of single children below the
//! root, which is how a freshly loaded snapshot is first presented.
//!
//! ## Attachment points
//!
//! Communication endpoints may be hidden inside closed containers.
//! [`ContainmentTree::attachment_point`] maps any entity to the entity it is currently drawn as:
//! itself when visible, otherwise its nearest visible ancestor.
//!
//! ```rust
//! use skyline_tree::{ContainerKind, ContainmentTree, EntitySpec, LeafKind};
//!
//! let mut tree = ContainmentTree::new(ContainerKind::Foundation, "petclinic");
//! let root = tree.root();
//! let owner = tree
//!     .insert(root, EntitySpec::container(ContainerKind::Package, "owner"))
//!     .unwrap();
//! let vet = tree
//!     .insert(root, EntitySpec::container(ContainerKind::Package, "vet"))
//!     .unwrap();
//! let controller = tree
//!     .insert(owner, EntitySpec::leaf(LeafKind::Class, "OwnerController"))
//!     .unwrap();
//!
//! // Two top-level packages: the default disclosure leaves both closed.
//! assert!(!tree.apply_default_disclosure());
//! assert_eq!(tree.attachment_point(controller), Some(owner));
//!
//! tree.toggle(owner).unwrap();
//! assert_eq!(tree.attachment_point(controller), Some(controller));
//! assert!(!tree.is_open(vet));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod disclosure;
mod error;
mod tree;
mod types;

pub use error::TreeError;
pub use tree::{Ancestors, ContainmentTree, Descendants, Entity, EntitySpec};
pub use types::{ContainerKind, EntityId, EntityKind, LayoutBox, LeafKind, Point3};
