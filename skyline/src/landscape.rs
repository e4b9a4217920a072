// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The landscape view: systems and their applications, laid out by a solver.

use std::sync::Arc;

use skyline_comm::RawCommunication;
use skyline_layout::{LandscapeLayout, LayoutPipeline, LayoutRun, LayoutSolver};
use skyline_tree::{ContainmentTree, EntityId};

use crate::config::ViewConfig;
use crate::error::ViewError;

/// A landscape tree whose every disclosure change requests a new layout.
///
/// Each operation returns the [`LayoutRun`] it requested. Runs can be finished in any order;
/// only the newest one is committed to the shared pipeline.
#[derive(Debug)]
pub struct LandscapeView<S> {
    tree: ContainmentTree,
    communications: Vec<RawCommunication>,
    pipeline: Arc<LayoutPipeline<S>>,
}

impl<S: LayoutSolver> LandscapeView<S> {
    /// Creates a view with its own pipeline, set up from `config.layout`.
    pub fn new(
        tree: ContainmentTree,
        communications: Vec<RawCommunication>,
        solver: S,
        config: ViewConfig,
    ) -> Self {
        Self::with_pipeline(
            tree,
            communications,
            Arc::new(LayoutPipeline::new(solver, config.layout)),
        )
    }

    /// Creates a view on an existing pipeline.
    pub fn with_pipeline(
        tree: ContainmentTree,
        communications: Vec<RawCommunication>,
        pipeline: Arc<LayoutPipeline<S>>,
    ) -> Self {
        Self {
            tree,
            communications,
            pipeline,
        }
    }

    /// The landscape tree.
    pub fn tree(&self) -> &ContainmentTree {
        &self.tree
    }

    /// Communications between applications.
    pub fn communications(&self) -> &[RawCommunication] {
        &self.communications
    }

    /// The pipeline runs are requested from.
    pub fn pipeline(&self) -> &Arc<LayoutPipeline<S>> {
        &self.pipeline
    }

    /// The most recently committed layout.
    pub fn layout(&self) -> Option<Arc<LandscapeLayout>> {
        self.pipeline.current()
    }

    /// Requests a layout of the current state.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn relayout(&self) -> LayoutRun<S> {
        self.pipeline.request(&self.tree, &self.communications)
    }

    /// Opens a system or node group.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn open(&mut self, id: EntityId) -> Result<LayoutRun<S>, ViewError> {
        self.tree.open(id)?;
        Ok(self.relayout())
    }

    /// Closes a system or node group.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn close(&mut self, id: EntityId) -> Result<LayoutRun<S>, ViewError> {
        self.tree.close(id)?;
        Ok(self.relayout())
    }

    /// Flips a system or node group.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn toggle(&mut self, id: EntityId) -> Result<LayoutRun<S>, ViewError> {
        self.tree.toggle(id)?;
        Ok(self.relayout())
    }

    /// Opens `id` and everything in it.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn open_all(&mut self, id: EntityId) -> Result<LayoutRun<S>, ViewError> {
        self.tree.open_all(id)?;
        Ok(self.relayout())
    }

    /// Closes `id` and everything in it.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn close_all(&mut self, id: EntityId) -> Result<LayoutRun<S>, ViewError> {
        self.tree.close_all(id)?;
        Ok(self.relayout())
    }

    /// Opens a chain of single top-level containers.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn apply_default_disclosure(&mut self) -> LayoutRun<S> {
        self.tree.apply_default_disclosure();
        self.relayout()
    }

    /// Replaces the communications.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn set_communications(&mut self, communications: Vec<RawCommunication>) -> LayoutRun<S> {
        self.communications = communications;
        self.relayout()
    }
}
