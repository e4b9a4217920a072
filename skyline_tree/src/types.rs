// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the containment tree: entity identifiers, kinds, and layout boxes.

use core::fmt;

use kurbo::{Point, Rect};

/// Identifier for an entity in a [`ContainmentTree`](crate::ContainmentTree).
///
/// This is a small, copyable index into the tree's arena. Entities are never removed
/// individually: a tree is built once per loaded snapshot and discarded wholesale on reload,
/// so ids stay valid for the lifetime of the tree that issued them.
///
/// Ids from one tree must not be used with another; doing so either fails lookups
/// (`None` / [`TreeError::UnknownEntity`](crate::TreeError::UnknownEntity)) or silently
/// addresses an unrelated entity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    /// Arena index of this entity.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a container entity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerKind {
    /// Root of a landscape (systems, node groups, nodes, applications).
    Landscape,
    /// Root of an application city (packages and classes).
    Foundation,
    /// A software system grouping node groups.
    System,
    /// A group of nodes that share the same set of applications.
    NodeGroup,
    /// A single host; holds applications.
    Node,
    /// A package inside an application.
    Package,
}

impl ContainerKind {
    /// Returns `true` for the kinds that root a tree.
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Landscape | Self::Foundation)
    }

    /// Returns `true` if containers of this kind carry user-controlled disclosure state.
    ///
    /// Roots are always open. Nodes follow their own visibility: a visible node is open,
    /// a hidden node is closed.
    #[must_use]
    pub const fn is_disclosable(self) -> bool {
        !matches!(self, Self::Landscape | Self::Foundation | Self::Node)
    }
}

/// Kind of a leaf entity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeafKind {
    /// A class inside an application city.
    Class,
    /// An application deployed on a landscape node.
    Application,
}

/// Closed set of entity variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// An entity with ordered children and an open flag.
    Container(ContainerKind),
    /// An entity without children.
    Leaf(LeafKind),
}

impl EntityKind {
    /// Returns `true` for leaves.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns `true` for containers.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// The container kind, if this is a container.
    #[must_use]
    pub const fn container(self) -> Option<ContainerKind> {
        match self {
            Self::Container(kind) => Some(kind),
            Self::Leaf(_) => None,
        }
    }
}

impl From<ContainerKind> for EntityKind {
    fn from(kind: ContainerKind) -> Self {
        Self::Container(kind)
    }
}

impl From<LeafKind> for EntityKind {
    fn from(kind: LeafKind) -> Self {
        Self::Leaf(kind)
    }
}

/// A point in the 3D scene space of a rendered view.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position (up).
    pub y: f64,
    /// Depth position.
    pub z: f64,
}

impl Point3 {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the ground (`x`/`z`) plane.
    #[must_use]
    pub const fn ground(self) -> Point {
        Point::new(self.x, self.z)
    }
}

/// Position and extent of one visible entity.
///
/// `x`/`y`/`z` locate the minimum corner; `y` grows upwards and `z` into the scene.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutBox {
    /// Minimum `x`.
    pub x: f64,
    /// Minimum `y`.
    pub y: f64,
    /// Minimum `z`.
    pub z: f64,
    /// Extent along `x`.
    pub width: f64,
    /// Extent along `y`.
    pub height: f64,
    /// Extent along `z`.
    pub depth: f64,
}

impl LayoutBox {
    /// Creates a box from its minimum corner and extents.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> Self {
        Self {
            x,
            y,
            z,
            width,
            height,
            depth,
        }
    }

    /// Center of the box's bottom face.
    #[must_use]
    pub fn base_center(&self) -> Point3 {
        Point3::new(
            self.x + self.width / 2.0,
            self.y,
            self.z + self.depth / 2.0,
        )
    }

    /// Footprint of the box on the ground (`x`/`z`) plane.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        Rect::new(self.x, self.z, self.x + self.width, self.z + self.depth)
    }

    /// Front face of the box on the `x`/`y` plane, as used by flat landscape views.
    #[must_use]
    pub fn face(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}
