// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close disclosure and the visibility refresh that backs it.

use alloc::vec::Vec;

use crate::error::TreeError;
use crate::tree::ContainmentTree;
use crate::types::{ContainerKind, EntityId, EntityKind};

impl ContainmentTree {
    /// Opens a container, revealing its direct children.
    ///
    /// Children that are themselves open containers reveal their own children in turn;
    /// closed descendants stay closed. Returns `true` if anything changed.
    ///
    /// Opening a root or a node is a no-op. Opening a leaf fails with
    /// [`TreeError::InvalidOperand`].
    pub fn open(&mut self, id: EntityId) -> Result<bool, TreeError> {
        if !self.disclosable(id)? {
            return Ok(false);
        }
        let changed = self.open_container(id);
        if changed {
            log::debug!("opened {id}");
        }
        Ok(changed)
    }

    /// Closes a container, hiding its whole subtree.
    ///
    /// Every container below `id` is closed as well, so reopening `id` only reveals its
    /// direct children. Returns `true` if anything changed.
    ///
    /// Closing a root or a node is a no-op. Closing a leaf fails with
    /// [`TreeError::InvalidOperand`].
    pub fn close(&mut self, id: EntityId) -> Result<bool, TreeError> {
        if !self.disclosable(id)? {
            return Ok(false);
        }
        let changed = self.close_container(id);
        if changed {
            log::debug!("closed {id}");
        }
        Ok(changed)
    }

    /// Closes an open container, opens a closed one.
    pub fn toggle(&mut self, id: EntityId) -> Result<bool, TreeError> {
        if self.is_open(id) {
            self.close(id)
        } else {
            self.open(id)
        }
    }

    /// Opens `id` and every container below it.
    pub fn open_all(&mut self, id: EntityId) -> Result<bool, TreeError> {
        self.require_container(id)?;
        let mut changed = false;
        let subtree: Vec<EntityId> = core::iter::once(id).chain(self.descendants(id)).collect();
        for entity in subtree {
            let entry = &mut self.entities[entity.index()];
            if let EntityKind::Container(kind) = entry.kind {
                if kind.is_disclosable() && !entry.open {
                    entry.open = true;
                    changed = true;
                }
            }
        }
        if changed {
            self.refresh_subtree(id);
            self.bump();
            log::debug!("opened subtree of {id}");
        }
        Ok(changed)
    }

    /// Closes `id` and every container below it.
    ///
    /// On a root this closes the root's containers; the root itself stays open.
    pub fn close_all(&mut self, id: EntityId) -> Result<bool, TreeError> {
        let kind = self.require_container(id)?;
        if id != self.root() && kind.is_disclosable() {
            return self.close(id);
        }
        let mut changed = false;
        let children: Vec<EntityId> = self.children(id).to_vec();
        for child in children {
            if self.disclosable(child).unwrap_or(false) {
                changed |= self.close_container(child);
            }
        }
        if changed {
            log::debug!("closed all below {id}");
        }
        Ok(changed)
    }

    /// Opens the single-child chain below the root.
    ///
    /// Starting at the root's children: a level with more than one entity stops the walk; a
    /// single container is opened and the walk continues with its children; a single leaf or
    /// an empty level stops. Meant to run once after a snapshot is loaded. Returns `true` if
    /// anything was opened.
    pub fn apply_default_disclosure(&mut self) -> bool {
        let mut changed = false;
        let mut level = self.root();
        loop {
            let &[only] = self.children(level) else {
                break;
            };
            match self.entities[only.index()].kind {
                EntityKind::Leaf(_) => break,
                EntityKind::Container(kind) => {
                    if kind.is_disclosable() {
                        changed |= self.open_container(only);
                    }
                    level = only;
                }
            }
        }
        if changed {
            log::debug!("applied default disclosure");
        }
        changed
    }

    /// Opens every ancestor of `id` so that it becomes visible.
    pub fn reveal(&mut self, id: EntityId) -> Result<bool, TreeError> {
        self.entry(id)?;
        let mut path: Vec<EntityId> = self.ancestors(id).collect();
        path.reverse();
        let mut changed = false;
        for ancestor in path {
            if self.disclosable(ancestor)? {
                changed |= self.open_container(ancestor);
            }
        }
        Ok(changed)
    }

    /// Model ids of the open disclosable containers, in insertion order.
    ///
    /// Feed them to [`restore_disclosure`](Self::restore_disclosure) after reloading a
    /// snapshot to bring back the same open state.
    pub fn open_model_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entities.iter().filter_map(|entity| match entity.kind {
            EntityKind::Container(kind) if kind.is_disclosable() && entity.open => {
                entity.model_id.as_deref()
            }
            _ => None,
        })
    }

    /// Opens the containers with the given model ids.
    ///
    /// The outcome does not depend on the order of `model_ids`. Unknown ids and ids of
    /// entities that cannot be opened are skipped. Returns the number of containers opened.
    pub fn restore_disclosure<I, S>(&mut self, model_ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opened = 0;
        for model_id in model_ids {
            let model_id = model_id.as_ref();
            let Some(id) = self.by_model_id(model_id) else {
                log::warn!("cannot restore disclosure of unknown entity `{model_id}`");
                continue;
            };
            if !self.disclosable(id).unwrap_or(false) {
                log::warn!("entity `{model_id}` has no disclosure state to restore");
                continue;
            }
            let entry = &mut self.entities[id.index()];
            if !entry.open {
                entry.open = true;
                opened += 1;
            }
        }
        if opened > 0 {
            self.refresh_subtree(self.root());
            self.bump();
        }
        opened
    }

    fn require_container(&self, id: EntityId) -> Result<ContainerKind, TreeError> {
        match self.entry(id)?.kind {
            EntityKind::Container(kind) => Ok(kind),
            EntityKind::Leaf(_) => Err(TreeError::InvalidOperand { id }),
        }
    }

    /// `Ok(true)` if `id` carries user-controlled disclosure state.
    fn disclosable(&self, id: EntityId) -> Result<bool, TreeError> {
        let kind = self.require_container(id)?;
        Ok(id != self.root() && kind.is_disclosable())
    }

    fn open_container(&mut self, id: EntityId) -> bool {
        let entry = &mut self.entities[id.index()];
        if entry.open {
            return false;
        }
        entry.open = true;
        self.refresh_subtree(id);
        self.bump();
        true
    }

    fn close_container(&mut self, id: EntityId) -> bool {
        let entry = &mut self.entities[id.index()];
        let mut changed = entry.open;
        entry.open = false;
        let mut stack: Vec<EntityId> = self.children(id).to_vec();
        while let Some(current) = stack.pop() {
            let entry = &mut self.entities[current.index()];
            changed |= entry.visible || entry.open;
            entry.visible = false;
            entry.open = false;
            stack.extend_from_slice(&entry.children);
        }
        if changed {
            self.bump();
        }
        changed
    }

    /// Recomputes visibility below `id` from the open flags.
    ///
    /// Descends only into open containers: the subtree of a closed container is hidden
    /// already. Nodes open and close with their own visibility.
    fn refresh_subtree(&mut self, id: EntityId) {
        let mut stack = Vec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            let parent = &self.entities[current.index()];
            let shown = parent.visible && parent.open;
            for i in 0..self.entities[current.index()].children.len() {
                let child = self.entities[current.index()].children[i];
                let entry = &mut self.entities[child.index()];
                entry.visible = shown;
                if let EntityKind::Container(kind) = entry.kind {
                    if !kind.is_disclosable() {
                        entry.open = shown;
                    }
                    if entry.open {
                        stack.push(child);
                    }
                }
            }
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
