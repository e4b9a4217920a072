// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latest-wins layout runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skyline_comm::RawCommunication;
use skyline_tree::ContainmentTree;

use crate::build::build_layout_graph;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, SolverError};
use crate::graph::LayoutGraph;
use crate::post::{LandscapeLayout, remap};
use crate::solver::LayoutSolver;

/// Where the latest layout run currently is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Building the layout graph.
    Building,
    /// Waiting for the solver.
    AwaitingSolver,
    /// Mapping solver output back to model space.
    PostProcessing,
    /// The latest run committed its layout.
    Done,
}

/// Result of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutOutcome {
    /// The run was the latest one and its layout is now current.
    Applied(Arc<LandscapeLayout>),
    /// A newer run was requested in the meantime; the result was dropped.
    Superseded {
        /// Token of the dropped run.
        token: u64,
        /// Token of the newest run at the time.
        latest: u64,
    },
}

#[derive(Debug, Default)]
struct PipelineState {
    phase: PipelinePhase,
    committed: Option<Arc<LandscapeLayout>>,
}

/// Runs layouts through build, solve and post-processing, committing only the newest.
///
/// Every [`request`](Self::request) takes a fresh token. A run whose token is no longer the
/// latest when it completes is reported as [`LayoutOutcome::Superseded`] and leaves the
/// committed layout alone.
#[derive(Debug)]
pub struct LayoutPipeline<S> {
    solver: S,
    config: LayoutConfig,
    latest: AtomicU64,
    state: Mutex<PipelineState>,
}

impl<S: LayoutSolver> LayoutPipeline<S> {
    /// Creates an idle pipeline without a committed layout.
    pub fn new(solver: S, config: LayoutConfig) -> Self {
        Self {
            solver,
            config,
            latest: AtomicU64::new(0),
            state: Mutex::new(PipelineState::default()),
        }
    }

    /// The solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Settings.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Starts a run for the current state of `tree`.
    ///
    /// Builds the layout graph right away; the returned run must be
    /// [finished](LayoutRun::finish) to solve and commit it. Dropping it unfinished puts
    /// the pipeline back to [`PipelinePhase::Idle`]. Any run requested earlier becomes stale.
    #[must_use = "a layout run does nothing until it is finished"]
    pub fn request(
        self: &Arc<Self>,
        tree: &ContainmentTree,
        communications: &[RawCommunication],
    ) -> LayoutRun<S> {
        let token = {
            let mut state = self.lock();
            let token = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
            state.phase = PipelinePhase::Building;
            token
        };
        log::debug!("layout run {token}: building");
        let graph = Arc::new(build_layout_graph(tree, communications, &self.config));
        self.enter(token, PipelinePhase::AwaitingSolver);
        LayoutRun {
            pipeline: Arc::clone(self),
            token,
            graph,
        }
    }
}

impl<S> LayoutPipeline<S> {
    /// Phase of the latest run.
    pub fn phase(&self) -> PipelinePhase {
        self.lock().phase
    }

    /// Token of the latest run; 0 before the first request.
    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// The most recently committed layout.
    pub fn current(&self) -> Option<Arc<LandscapeLayout>> {
        self.lock().committed.clone()
    }

    fn lock(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::Acquire) == token
    }

    /// Moves to `phase` if `token` is still the latest run.
    fn enter(&self, token: u64, phase: PipelinePhase) -> bool {
        let mut state = self.lock();
        if !self.is_latest(token) {
            return false;
        }
        state.phase = phase;
        true
    }
}

/// One requested layout, between graph construction and commit.
#[derive(Debug)]
#[must_use = "a layout run does nothing until it is finished"]
pub struct LayoutRun<S> {
    pipeline: Arc<LayoutPipeline<S>>,
    token: u64,
    graph: Arc<LayoutGraph>,
}

impl<S: LayoutSolver> LayoutRun<S> {
    /// Token of this run.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// The graph built for this run.
    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    /// Solves, post-processes and commits the layout.
    ///
    /// Returns [`LayoutOutcome::Superseded`] if a newer run was requested before this one
    /// could commit. On failure the pipeline returns to [`PipelinePhase::Idle`] and keeps the
    /// previously committed layout.
    pub async fn finish(self) -> Result<LayoutOutcome, LayoutError> {
        let pipeline = &*self.pipeline;
        if !pipeline.is_latest(self.token) {
            return Ok(self.superseded());
        }

        let solving = pipeline.solver.solve(Arc::clone(&self.graph));
        let solved = match pipeline.config.solver_timeout {
            Some(limit) => match tokio::time::timeout(limit, solving).await {
                Ok(result) => result,
                Err(_) => Err(SolverError::TimedOut(limit)),
            },
            None => solving.await,
        };
        let solved = match solved {
            Ok(solved) => solved,
            Err(err) => return self.fail(err.into()),
        };

        if !pipeline.enter(self.token, PipelinePhase::PostProcessing) {
            return Ok(self.superseded());
        }
        let layout = match remap(&self.graph, &solved, &pipeline.config.sizing, self.token) {
            Ok(layout) => Arc::new(layout),
            Err(err) => return self.fail(err),
        };

        let mut state = pipeline.lock();
        if !pipeline.is_latest(self.token) {
            drop(state);
            return Ok(self.superseded());
        }
        state.committed = Some(Arc::clone(&layout));
        state.phase = PipelinePhase::Done;
        drop(state);
        log::debug!("layout run {}: committed", self.token);
        Ok(LayoutOutcome::Applied(layout))
    }

    fn superseded(&self) -> LayoutOutcome {
        let latest = self.pipeline.latest_token();
        log::trace!("layout run {}: superseded by {latest}", self.token);
        LayoutOutcome::Superseded {
            token: self.token,
            latest,
        }
    }

    fn fail(&self, err: LayoutError) -> Result<LayoutOutcome, LayoutError> {
        if !self.pipeline.enter(self.token, PipelinePhase::Idle) {
            return Ok(self.superseded());
        }
        log::warn!("layout run {}: {err}; keeping the previous layout", self.token);
        Err(err)
    }
}

impl<S> Drop for LayoutRun<S> {
    fn drop(&mut self) {
        let pipeline = &*self.pipeline;
        let mut state = pipeline.lock();
        if !pipeline.is_latest(self.token) {
            return;
        }
        if matches!(
            state.phase,
            PipelinePhase::Building | PipelinePhase::AwaitingSolver | PipelinePhase::PostProcessing
        ) {
            state.phase = PipelinePhase::Idle;
            log::debug!("layout run {}: abandoned", self.token);
        }
    }
}
