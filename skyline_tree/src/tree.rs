// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena storage, construction, and read-only queries.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::types::{ContainerKind, EntityId, EntityKind, LeafKind};

/// Description of an entity to insert into a [`ContainmentTree`].
///
/// ```rust
/// use skyline_tree::{ContainerKind, EntitySpec, LeafKind};
///
/// let package = EntitySpec::container(ContainerKind::Package, "net.example")
///     .with_model_id("pkg-1");
/// let class = EntitySpec::leaf(LeafKind::Class, "Server").with_model_id("cls-7");
/// assert!(!package.kind().is_leaf());
/// assert!(class.kind().is_leaf());
/// ```
#[derive(Clone, Debug)]
pub struct EntitySpec {
    kind: EntityKind,
    name: String,
    model_id: Option<String>,
    address: Option<String>,
}

impl EntitySpec {
    /// A container of the given kind.
    pub fn container(kind: ContainerKind, name: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Container(kind),
            name: name.into(),
            model_id: None,
            address: None,
        }
    }

    /// A leaf of the given kind.
    pub fn leaf(kind: LeafKind, name: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Leaf(kind),
            name: name.into(),
            model_id: None,
            address: None,
        }
    }

    /// Sets the external snapshot identifier.
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Sets the network address (used as the fallback label of nodes).
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// The kind of entity this spec describes.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// One entity stored in the arena.
#[derive(Clone, Debug)]
pub struct Entity {
    pub(crate) kind: EntityKind,
    pub(crate) name: String,
    pub(crate) model_id: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: SmallVec<[EntityId; 4]>,
    pub(crate) open: bool,
    pub(crate) visible: bool,
}

impl Entity {
    /// Kind of the entity.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// External snapshot identifier, if one was assigned.
    #[must_use]
    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    /// Network address, if one was assigned.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Parent entity; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Ordered children; always empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Whether the container is open. Leaves are never open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the entity is currently visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` for leaves.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}

/// Arena-allocated containment tree with disclosure state.
///
/// The tree has a single root which is permanently open and visible. Every other entity is
/// visible exactly when its parent is visible and open; disclosure operations in
/// [`disclosure`](crate::ContainmentTree::open) keep that invariant.
///
/// # Example
///
/// ```rust
/// use skyline_tree::{ContainerKind, ContainmentTree, EntitySpec, LeafKind};
///
/// let mut tree = ContainmentTree::new(ContainerKind::Foundation, "shop");
/// let root = tree.root();
/// let pkg = tree
///     .insert(root, EntitySpec::container(ContainerKind::Package, "orders"))
///     .unwrap();
/// let class = tree
///     .insert(pkg, EntitySpec::leaf(LeafKind::Class, "OrderService"))
///     .unwrap();
///
/// // New packages start closed: the class is hidden and attaches to its package.
/// assert!(tree.is_visible(pkg));
/// assert!(!tree.is_visible(class));
/// assert_eq!(tree.attachment_point(class), Some(pkg));
///
/// tree.open(pkg).unwrap();
/// assert!(tree.is_visible(class));
/// ```
#[derive(Clone, Debug)]
pub struct ContainmentTree {
    pub(crate) entities: Vec<Entity>,
    by_model: HashMap<String, EntityId>,
    pub(crate) revision: u64,
}

impl ContainmentTree {
    /// Creates a tree consisting of just a root container.
    pub fn new(kind: ContainerKind, name: impl Into<String>) -> Self {
        let root = Entity {
            kind: EntityKind::Container(kind),
            name: name.into(),
            model_id: None,
            address: None,
            parent: None,
            children: SmallVec::new(),
            open: true,
            visible: true,
        };
        let mut entities = Vec::new();
        entities.push(root);
        Self {
            entities,
            by_model: HashMap::new(),
            revision: 0,
        }
    }

    /// The root entity.
    #[must_use]
    pub const fn root(&self) -> EntityId {
        EntityId::new(0)
    }

    /// Inserts a new entity as the last child of `parent`.
    ///
    /// The new entity is visible if `parent` is visible and open. Disclosable containers start
    /// closed; nodes start open exactly when they are visible.
    pub fn insert(&mut self, parent: EntityId, spec: EntitySpec) -> Result<EntityId, TreeError> {
        let parent_entity = self.entry(parent)?;
        if parent_entity.is_leaf() {
            return Err(TreeError::LeafParent(parent));
        }
        if let Some(model_id) = &spec.model_id {
            if self.by_model.contains_key(model_id.as_str()) {
                return Err(TreeError::DuplicateModelId(model_id.clone()));
            }
        }
        let visible = parent_entity.visible && parent_entity.open;
        let open = match spec.kind {
            EntityKind::Container(kind) => !kind.is_disclosable() && visible,
            EntityKind::Leaf(_) => false,
        };

        let id = Self::id_at(self.entities.len());
        if let Some(model_id) = &spec.model_id {
            self.by_model.insert(model_id.clone(), id);
        }
        self.entities.push(Entity {
            kind: spec.kind,
            name: spec.name,
            model_id: spec.model_id,
            address: spec.address,
            parent: Some(parent),
            children: SmallVec::new(),
            open,
            visible,
        });
        self.entities[parent.index()].children.push(id);
        self.revision = self.revision.wrapping_add(1);
        Ok(id)
    }

    /// Number of entities including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always `false`: a tree contains at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Monotonic counter bumped by every structural or visibility change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if `id` addresses an entity of this tree.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        id.index() < self.entities.len()
    }

    /// Access an entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub(crate) fn entry(&self, id: EntityId) -> Result<&Entity, TreeError> {
        self.get(id).ok_or(TreeError::UnknownEntity(id))
    }

    /// Kind of an entity.
    #[must_use]
    pub fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.get(id).map(Entity::kind)
    }

    /// All ids in insertion order (the root first).
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.entities.len()).map(Self::id_at)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "arena indices are bounded by the snapshot size"
    )]
    const fn id_at(idx: usize) -> EntityId {
        EntityId::new(idx as u32)
    }

    /// Looks up an entity by its external model id.
    #[must_use]
    pub fn by_model_id(&self, model_id: &str) -> Option<EntityId> {
        self.by_model.get(model_id).copied()
    }

    /// Parent of an entity; `None` for the root and for unknown ids.
    #[must_use]
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.get(id).and_then(Entity::parent)
    }

    /// Ordered children; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.get(id).map(Entity::children).unwrap_or(&[])
    }

    /// Whether the entity is visible; `false` for unknown ids.
    #[must_use]
    pub fn is_visible(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(Entity::is_visible)
    }

    /// Whether the entity is an open container; `false` for leaves and unknown ids.
    #[must_use]
    pub fn is_open(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(Entity::is_open)
    }

    /// Whether the entity is a leaf; `false` for unknown ids.
    #[must_use]
    pub fn is_leaf(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(Entity::is_leaf)
    }

    /// Ancestors of `id` from its parent up to and including the root.
    pub fn ancestors(&self, id: EntityId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Number of ancestors of `id` (the root has depth 0).
    #[must_use]
    pub fn depth(&self, id: EntityId) -> usize {
        self.ancestors(id).count()
    }

    /// Strict descendants of `id` in depth-first pre-order.
    pub fn descendants(&self, id: EntityId) -> Descendants<'_> {
        let mut stack = Vec::new();
        stack.extend(self.children(id).iter().rev().copied());
        Descendants { tree: self, stack }
    }

    /// Leaves in the subtree of `id`; a leaf yields only itself.
    pub fn leaves_under(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        let own = self.is_leaf(id).then_some(id);
        own.into_iter()
            .chain(self.descendants(id).filter(|e| self.is_leaf(*e)))
    }

    /// All leaves of the tree in insertion order.
    pub fn leaves(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ids().filter(|id| self.is_leaf(*id))
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Deepest entity that contains both `a` and `b` (an entity contains itself).
    #[must_use]
    pub fn common_ancestor(&self, a: EntityId, b: EntityId) -> Option<EntityId> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        let mut chain_a: Vec<EntityId> = Vec::new();
        chain_a.push(a);
        chain_a.extend(self.ancestors(a));
        core::iter::once(b)
            .chain(self.ancestors(b))
            .find(|candidate| chain_a.contains(candidate))
    }

    /// The entity a possibly hidden entity is drawn as.
    ///
    /// Returns `id` itself when it is visible, otherwise its nearest visible ancestor: the
    /// outermost closed container on its path. Returns `None` for unknown ids.
    #[must_use]
    pub fn attachment_point(&self, id: EntityId) -> Option<EntityId> {
        let entity = self.get(id)?;
        if entity.visible {
            return Some(id);
        }
        self.ancestors(id).find(|a| self.is_visible(*a))
    }
}

/// Iterator over the ancestors of an entity.
///
/// Created by [`ContainmentTree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    tree: &'a ContainmentTree,
    next: Option<EntityId>,
}

impl Iterator for Ancestors<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Depth-first pre-order iterator over a subtree.
///
/// Created by [`ContainmentTree::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    tree: &'a ContainmentTree,
    stack: Vec<EntityId>,
}

impl Iterator for Descendants<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}
