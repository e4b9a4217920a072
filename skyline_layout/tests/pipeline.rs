// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latest-wins behavior of the layout pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use skyline_layout::{
    LayoutConfig, LayoutError, LayoutGraph, LayoutOutcome, LayoutPipeline, LayoutSolver,
    PipelinePhase, SolvedLayout, SolverError, TaffySolver,
};
use skyline_tree::{ContainerKind, ContainmentTree, EntityId, EntitySpec};
use tokio::sync::{Notify, oneshot};

fn landscape() -> (ContainmentTree, EntityId) {
    let mut tree = ContainmentTree::new(ContainerKind::Landscape, "landscape");
    let root = tree.root();
    let shop = tree
        .insert(root, EntitySpec::container(ContainerKind::System, "shop"))
        .unwrap();
    let group = tree
        .insert(shop, EntitySpec::container(ContainerKind::NodeGroup, "web"))
        .unwrap();
    tree.insert(group, EntitySpec::container(ContainerKind::Node, "web-1"))
        .unwrap();
    (tree, shop)
}

/// Holds the first call until released; later calls solve right away.
#[derive(Debug)]
struct GatedSolver {
    entered: Arc<Notify>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl LayoutSolver for GatedSolver {
    async fn solve(&self, graph: Arc<LayoutGraph>) -> Result<SolvedLayout, SolverError> {
        let gate = self.gate.lock().unwrap().take();
        self.entered.notify_one();
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| SolverError::Worker("gate dropped".into()))?;
        }
        TaffySolver::solve_blocking(&graph)
    }
}

#[derive(Debug)]
struct FailingSolver;

#[async_trait]
impl LayoutSolver for FailingSolver {
    async fn solve(&self, _graph: Arc<LayoutGraph>) -> Result<SolvedLayout, SolverError> {
        Err(SolverError::Failed("no layout today".into()))
    }
}

#[tokio::test]
async fn a_newer_request_supersedes_an_outstanding_one() {
    let (mut tree, shop) = landscape();
    let entered = Arc::new(Notify::new());
    let (release, gate) = oneshot::channel();
    let pipeline = Arc::new(LayoutPipeline::new(
        GatedSolver {
            entered: Arc::clone(&entered),
            gate: Mutex::new(Some(gate)),
        },
        LayoutConfig::default(),
    ));

    let first = pipeline.request(&tree, &[]);
    let first_token = first.token();
    let first = tokio::spawn(first.finish());
    entered.notified().await;
    assert_eq!(pipeline.phase(), PipelinePhase::AwaitingSolver);

    tree.open(shop).unwrap();
    let second = pipeline.request(&tree, &[]);
    let second_token = second.token();
    assert!(second_token > first_token);
    let LayoutOutcome::Applied(applied) = second.finish().await.unwrap() else {
        panic!("the newest run must be applied");
    };
    assert_eq!(applied.token, second_token);
    assert_eq!(pipeline.phase(), PipelinePhase::Done);

    release.send(()).unwrap();
    let outcome = first.await.unwrap().unwrap();
    assert_eq!(
        outcome,
        LayoutOutcome::Superseded {
            token: first_token,
            latest: second_token,
        }
    );
    let current = pipeline.current().unwrap();
    assert_eq!(current.token, second_token);
    assert_eq!(pipeline.phase(), PipelinePhase::Done);
}

#[tokio::test]
async fn a_run_requested_after_another_is_never_overwritten_by_it() {
    let (tree, _) = landscape();
    let pipeline = Arc::new(LayoutPipeline::new(TaffySolver, LayoutConfig::default()));
    let stale = pipeline.request(&tree, &[]);
    let fresh = pipeline.request(&tree, &[]);

    assert!(matches!(
        fresh.finish().await,
        Ok(LayoutOutcome::Applied(_))
    ));
    assert!(matches!(
        stale.finish().await,
        Ok(LayoutOutcome::Superseded { .. })
    ));
    assert_eq!(pipeline.current().unwrap().token, pipeline.latest_token());
}

#[tokio::test]
async fn solver_failure_keeps_the_previous_layout() {
    let (tree, shop) = landscape();
    let good = Arc::new(LayoutPipeline::new(TaffySolver, LayoutConfig::default()));
    let LayoutOutcome::Applied(layout) = good.request(&tree, &[]).finish().await.unwrap() else {
        panic!("a lone run must be applied");
    };
    assert!(layout.get(shop).is_some());

    let failing = Arc::new(LayoutPipeline::new(FailingSolver, LayoutConfig::default()));
    let err = failing.request(&tree, &[]).finish().await.unwrap_err();
    assert!(matches!(
        err,
        LayoutError::SolverFailure(SolverError::Failed(_))
    ));
    assert_eq!(failing.phase(), PipelinePhase::Idle);
    assert!(failing.current().is_none());
}

#[tokio::test]
async fn failures_after_a_commit_leave_it_in_place() {
    let (tree, _) = landscape();
    let solver: Arc<dyn LayoutSolver> = Arc::new(TaffySolver);
    let pipeline = Arc::new(LayoutPipeline::new(
        SwitchableSolver {
            inner: solver,
            fail: Mutex::new(false),
        },
        LayoutConfig::default(),
    ));
    pipeline.request(&tree, &[]).finish().await.unwrap();
    let committed = pipeline.current().unwrap();

    *pipeline.solver().fail.lock().unwrap() = true;
    assert!(pipeline.request(&tree, &[]).finish().await.is_err());
    assert_eq!(pipeline.phase(), PipelinePhase::Idle);
    assert_eq!(pipeline.current(), Some(committed));
}

#[tokio::test]
async fn dropping_an_unfinished_run_returns_to_idle() {
    let (tree, _) = landscape();
    let pipeline = Arc::new(LayoutPipeline::new(TaffySolver, LayoutConfig::default()));
    let run = pipeline.request(&tree, &[]);
    assert_eq!(pipeline.phase(), PipelinePhase::AwaitingSolver);
    drop(run);
    assert_eq!(pipeline.phase(), PipelinePhase::Idle);

    // A stale run going away leaves the newer run's phase alone.
    let stale = pipeline.request(&tree, &[]);
    let fresh = pipeline.request(&tree, &[]);
    drop(stale);
    assert_eq!(pipeline.phase(), PipelinePhase::AwaitingSolver);
    assert!(matches!(
        fresh.finish().await,
        Ok(LayoutOutcome::Applied(_))
    ));
    assert_eq!(pipeline.phase(), PipelinePhase::Done);
}

#[tokio::test]
async fn a_slow_solver_times_out_and_keeps_the_previous_layout() {
    let (tree, _) = landscape();
    let pipeline = Arc::new(LayoutPipeline::new(
        SleepySolver {
            asleep: AtomicBool::new(false),
        },
        LayoutConfig {
            solver_timeout: Some(Duration::from_millis(20)),
            ..LayoutConfig::default()
        },
    ));
    pipeline.request(&tree, &[]).finish().await.unwrap();
    let committed = pipeline.current().unwrap();

    pipeline.solver().asleep.store(true, Ordering::Release);
    let err = pipeline.request(&tree, &[]).finish().await.unwrap_err();
    assert!(matches!(
        err,
        LayoutError::SolverFailure(SolverError::TimedOut(limit)) if limit == Duration::from_millis(20)
    ));
    assert_eq!(pipeline.phase(), PipelinePhase::Idle);
    assert_eq!(pipeline.current(), Some(committed));
}

/// Sleeps well past any test timeout once `asleep` is set.
#[derive(Debug)]
struct SleepySolver {
    asleep: AtomicBool,
}

#[async_trait]
impl LayoutSolver for SleepySolver {
    async fn solve(&self, graph: Arc<LayoutGraph>) -> Result<SolvedLayout, SolverError> {
        if self.asleep.load(Ordering::Acquire) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        TaffySolver::solve_blocking(&graph)
    }
}

struct SwitchableSolver {
    inner: Arc<dyn LayoutSolver>,
    fail: Mutex<bool>,
}

impl std::fmt::Debug for SwitchableSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchableSolver")
            .field("fail", &self.fail)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LayoutSolver for SwitchableSolver {
    async fn solve(&self, graph: Arc<LayoutGraph>) -> Result<SolvedLayout, SolverError> {
        if *self.fail.lock().unwrap() {
            return Err(SolverError::Failed("switched off".into()));
        }
        self.inner.solve(graph).await
    }
}
