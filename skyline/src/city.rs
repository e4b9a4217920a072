// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The application view: one tree, its communications and its highlights.

use hashbrown::HashMap;
use skyline_comm::{CommunicationGraph, PipeLayout, RawCommunication, Routing, layout_pipes};
use skyline_highlight::{
    FocalTarget, HighlightContext, HighlightInput, HighlightMap, HighlightMode, RemoteTarget,
    compose,
};
use skyline_tree::{ContainmentTree, EntityId, LayoutBox};

use crate::config::ViewConfig;
use crate::error::ViewError;

/// A software city: disclosure, routed communications and highlighting kept consistent.
///
/// Every disclosure operation re-routes the communications, re-classifies their thickness
/// and recomputes all highlights. A highlight whose target disappeared is cleared.
///
/// Besides the local highlight the view keeps one context per remote peer; the map handed to
/// the renderer merges all of them (see [`compose`]).
#[derive(Clone, Debug)]
pub struct CityView {
    tree: ContainmentTree,
    graph: CommunicationGraph,
    routing: Routing,
    config: ViewConfig,
    local: HighlightContext,
    peers: HashMap<String, HighlightContext>,
}

impl CityView {
    /// Creates a view over `tree` with the given communications.
    pub fn new(
        tree: ContainmentTree,
        communications: &[RawCommunication],
        config: ViewConfig,
    ) -> Result<Self, ViewError> {
        let graph = CommunicationGraph::from_raw(&tree, communications)?;
        let mut view = Self {
            tree,
            graph,
            routing: Routing::default(),
            config,
            local: HighlightContext::new(),
            peers: HashMap::new(),
        };
        view.refresh();
        Ok(view)
    }

    /// The application tree.
    #[must_use]
    pub fn tree(&self) -> &ContainmentTree {
        &self.tree
    }

    /// Leaf-level communications.
    #[must_use]
    pub fn graph(&self) -> &CommunicationGraph {
        &self.graph
    }

    /// Communications as currently drawn.
    #[must_use]
    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    /// Settings.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The local highlight.
    #[must_use]
    pub fn highlight_context(&self) -> &HighlightContext {
        &self.local
    }

    /// The highlight of a remote peer.
    #[must_use]
    pub fn peer_context(&self, peer: &str) -> Option<&HighlightContext> {
        self.peers.get(peer)
    }

    /// Opens a container. See [`ContainmentTree::open`].
    pub fn open(&mut self, id: EntityId) -> Result<bool, ViewError> {
        let changed = self.tree.open(id)?;
        self.refresh_if(changed)
    }

    /// Closes a container. See [`ContainmentTree::close`].
    pub fn close(&mut self, id: EntityId) -> Result<bool, ViewError> {
        let changed = self.tree.close(id)?;
        self.refresh_if(changed)
    }

    /// Flips a container. See [`ContainmentTree::toggle`].
    pub fn toggle(&mut self, id: EntityId) -> Result<bool, ViewError> {
        let changed = self.tree.toggle(id)?;
        self.refresh_if(changed)
    }

    /// Opens a container and everything in it. See [`ContainmentTree::open_all`].
    pub fn open_all(&mut self, id: EntityId) -> Result<bool, ViewError> {
        let changed = self.tree.open_all(id)?;
        self.refresh_if(changed)
    }

    /// Closes a container and everything in it. See [`ContainmentTree::close_all`].
    pub fn close_all(&mut self, id: EntityId) -> Result<bool, ViewError> {
        let changed = self.tree.close_all(id)?;
        self.refresh_if(changed)
    }

    /// Opens a chain of single top-level containers.
    /// See [`ContainmentTree::apply_default_disclosure`].
    pub fn apply_default_disclosure(&mut self) -> bool {
        let changed = self.tree.apply_default_disclosure();
        if changed {
            self.refresh();
        }
        changed
    }

    /// Opens the ancestors of `id`. See [`ContainmentTree::reveal`].
    pub fn reveal(&mut self, id: EntityId) -> Result<bool, ViewError> {
        let changed = self.tree.reveal(id)?;
        self.refresh_if(changed)
    }

    /// Opens the containers with the given model ids, e.g. after a snapshot reload.
    pub fn restore_disclosure<I, S>(&mut self, model_ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let opened = self.tree.restore_disclosure(model_ids);
        if opened > 0 {
            self.refresh();
        }
        opened
    }

    /// Replaces the communications, keeping highlights that still resolve.
    ///
    /// Edge targets are carried over by the model ids of their endpoints. Trace highlights
    /// are cleared.
    pub fn set_communications(
        &mut self,
        communications: &[RawCommunication],
    ) -> Result<(), ViewError> {
        let graph = CommunicationGraph::from_raw(&self.tree, communications)?;
        let old = HighlightInput {
            tree: &self.tree,
            graph: &self.graph,
            routing: &self.routing,
        };
        let local = carry(&self.local, old);
        let peer_targets: Vec<(String, Option<Carried>)> = self
            .peers
            .iter()
            .map(|(peer, context)| (peer.clone(), carry(context, old)))
            .collect();

        self.graph = graph;
        self.routing = self.graph.route(&self.tree);
        self.routing.classify(&self.config.thickness);
        let input = HighlightInput {
            tree: &self.tree,
            graph: &self.graph,
            routing: &self.routing,
        };
        retarget(&mut self.local, local, input);
        for (peer, target) in peer_targets {
            if let Some(context) = self.peers.get_mut(&peer) {
                retarget(context, target, input);
            }
        }
        Ok(())
    }

    /// Highlights `target` locally, or clears the highlight if it already is the target.
    pub fn highlight(&mut self, target: FocalTarget) -> Result<bool, ViewError> {
        self.highlight_with(target, HighlightMode::Toggle)
    }

    /// Highlights `target` locally with an explicit mode.
    pub fn highlight_with(
        &mut self,
        target: FocalTarget,
        mode: HighlightMode,
    ) -> Result<bool, ViewError> {
        let input = HighlightInput {
            tree: &self.tree,
            graph: &self.graph,
            routing: &self.routing,
        };
        Ok(self.local.highlight(target, input, mode)?)
    }

    /// Applies a highlight requested by a remote peer to that peer's context.
    pub fn highlight_remote(
        &mut self,
        peer: &str,
        target: &RemoteTarget,
    ) -> Result<bool, ViewError> {
        let input = HighlightInput {
            tree: &self.tree,
            graph: &self.graph,
            routing: &self.routing,
        };
        let focal = target
            .resolve(input)
            .ok_or_else(|| ViewError::UnresolvedRemote(describe(target)))?;
        let context = self.peers.entry_ref(peer).or_default();
        Ok(context.highlight(focal, input, HighlightMode::Toggle)?)
    }

    /// The local highlight as remote peers would name it.
    #[must_use]
    pub fn remote_target(&self) -> Option<RemoteTarget> {
        let input = HighlightInput {
            tree: &self.tree,
            graph: &self.graph,
            routing: &self.routing,
        };
        RemoteTarget::of(self.local.target()?, input)
    }

    /// Clears the local highlight.
    pub fn clear_highlighting(&mut self) {
        self.local.clear();
    }

    /// Forgets the highlight of a remote peer.
    pub fn clear_remote(&mut self, peer: &str) -> bool {
        self.peers.remove(peer).is_some()
    }

    /// The merged state of the local and all remote highlights.
    #[must_use]
    pub fn highlight_map(&self) -> HighlightMap {
        compose(core::iter::once(&self.local).chain(self.peers.values()))
    }

    /// Pipes for every drawn edge, given the boxes of the drawn entities.
    pub fn pipes<F>(&self, boxes: F) -> Vec<PipeLayout>
    where
        F: FnMut(EntityId) -> Option<LayoutBox>,
    {
        layout_pipes(&self.routing, boxes, &self.config.pipes)
    }

    fn refresh_if(&mut self, changed: bool) -> Result<bool, ViewError> {
        if changed {
            self.refresh();
        }
        Ok(changed)
    }

    fn refresh(&mut self) {
        self.routing = self.graph.route(&self.tree);
        self.routing.classify(&self.config.thickness);
        let input = HighlightInput {
            tree: &self.tree,
            graph: &self.graph,
            routing: &self.routing,
        };
        if self.local.is_active() && !self.local.update(input) {
            log::debug!("local highlight target is no longer drawn");
        }
        for context in self.peers.values_mut() {
            context.update(input);
        }
    }
}

/// A highlight target detached from the communication graph it was made for.
enum Carried {
    Entity(EntityId),
    Edge(RemoteTarget),
}

fn carry(context: &HighlightContext, input: HighlightInput<'_>) -> Option<Carried> {
    match context.target()? {
        FocalTarget::Entity(id) => Some(Carried::Entity(*id)),
        target @ FocalTarget::Edge(_) => RemoteTarget::of(target, input).map(Carried::Edge),
        FocalTarget::Trace(_) => None,
    }
}

fn retarget(context: &mut HighlightContext, carried: Option<Carried>, input: HighlightInput<'_>) {
    let focal = match carried {
        Some(Carried::Entity(id)) => Some(FocalTarget::Entity(id)),
        Some(Carried::Edge(remote)) => remote.resolve(input),
        None => None,
    };
    match focal {
        Some(focal) => {
            if context.highlight(focal, input, HighlightMode::Replace).is_err() {
                context.clear();
            }
        }
        None => context.clear(),
    }
}

fn describe(target: &RemoteTarget) -> String {
    match target {
        RemoteTarget::Entity { model_id } => model_id.clone(),
        RemoteTarget::Edge(key) => key.to_string(),
    }
}
