// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What of a landscape is drawn, and what stands in for the rest.
//!
//! A landscape nests systems, node groups, nodes and applications. Node groups differ from
//! the plain disclosure state of the tree: a group with fewer than two nodes is drawn as if
//! open, and a closed group is drawn as its first node, labelled with the group's name.

use skyline_tree::{ContainerKind, ContainmentTree, EntityId, EntityKind, LeafKind};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Projection<'a> {
    tree: &'a ContainmentTree,
}

impl<'a> Projection<'a> {
    pub(crate) fn new(tree: &'a ContainmentTree) -> Self {
        Self { tree }
    }

    pub(crate) fn tree(&self) -> &'a ContainmentTree {
        self.tree
    }

    pub(crate) fn has_kind(&self, id: EntityId, kind: ContainerKind) -> bool {
        self.tree.kind(id) == Some(EntityKind::Container(kind))
    }

    /// Whether the nodes of `group` are laid out individually.
    pub(crate) fn group_is_open(&self, group: EntityId) -> bool {
        self.tree.is_open(group) || self.tree.children(group).len() < 2
    }

    pub(crate) fn is_rendered(&self, id: EntityId) -> bool {
        let Some(entity) = self.tree.get(id) else {
            return false;
        };
        let Some(parent) = entity.parent() else {
            return true;
        };
        match entity.kind() {
            EntityKind::Container(ContainerKind::Node)
                if self.has_kind(parent, ContainerKind::NodeGroup) =>
            {
                self.is_rendered(parent)
                    && (self.group_is_open(parent)
                        || self.tree.children(parent).first() == Some(&id))
            }
            EntityKind::Leaf(LeafKind::Application)
                if self.has_kind(parent, ContainerKind::Node) =>
            {
                self.is_rendered(parent)
            }
            _ => entity.is_visible(),
        }
    }

    /// Label of a node box.
    ///
    /// The node's name, its address when the name is empty or a placeholder such as
    /// `<unknown>`, or the group's name when the node stands in for a closed group.
    pub(crate) fn node_label(&self, node: EntityId) -> &'a str {
        let Some(entity) = self.tree.get(node) else {
            return "";
        };
        if let Some(group) = entity.parent() {
            if self.has_kind(group, ContainerKind::NodeGroup) && !self.group_is_open(group) {
                return self.tree.get(group).map_or("", |group| group.name());
            }
        }
        let name = entity.name();
        if name.is_empty() || name.starts_with('<') {
            entity.address().unwrap_or(name)
        } else {
            name
        }
    }

    /// The rendered entity a communication endpoint is drawn at.
    ///
    /// An application hidden in a closed node group is replaced by the first rendered
    /// application of the same name in that group; in a closed system, by the system.
    pub(crate) fn representative(&self, id: EntityId) -> Option<EntityId> {
        let entity = self.tree.get(id)?;
        if self.is_rendered(id) {
            return Some(id);
        }
        if entity.kind() == EntityKind::Leaf(LeafKind::Application) {
            if let Some(system) = self.system_of_application(id) {
                if !self.tree.is_open(system) {
                    return self.is_rendered(system).then_some(system);
                }
                let group = self.tree.parent(self.tree.parent(id)?)?;
                return self
                    .tree
                    .children(group)
                    .iter()
                    .filter(|node| self.is_rendered(**node))
                    .flat_map(|node| self.tree.children(*node))
                    .copied()
                    .find(|app| {
                        self.tree
                            .get(*app)
                            .is_some_and(|app| app.name() == entity.name())
                    });
            }
        }
        self.tree
            .attachment_point(id)
            .filter(|point| self.is_rendered(*point))
    }

    fn system_of_application(&self, app: EntityId) -> Option<EntityId> {
        let node = self.tree.parent(app)?;
        let group = self.tree.parent(node)?;
        let system = self.tree.parent(group)?;
        (self.has_kind(node, ContainerKind::Node)
            && self.has_kind(group, ContainerKind::NodeGroup)
            && self.has_kind(system, ContainerKind::System))
        .then_some(system)
    }
}
