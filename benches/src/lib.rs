// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generated inputs shared by the Skyline benchmarks.

use skyline_comm::RawCommunication;
use skyline_tree::{ContainerKind, ContainmentTree, EntityId, EntitySpec, LeafKind};

/// Small deterministic generator.
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
    /// Seeds the generator.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next value in `0..upper_exclusive`; 0 when `upper_exclusive` is 0.
    pub fn below(&mut self, upper_exclusive: usize) -> usize {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        if upper_exclusive == 0 {
            return 0;
        }
        ((self.0 >> 32) as usize) % upper_exclusive
    }
}

/// A package tree `fanout` wide and `depth` deep with `classes` classes per innermost package,
/// and `edges` random communications between the classes.
pub fn package_city(
    fanout: usize,
    depth: usize,
    classes: usize,
    edges: usize,
    seed: u64,
) -> (ContainmentTree, Vec<EntityId>, Vec<RawCommunication>) {
    let mut tree = ContainmentTree::new(ContainerKind::Foundation, "bench");
    let mut level = vec![tree.root()];
    for d in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fanout);
        for &parent in &level {
            for i in 0..fanout {
                let spec = EntitySpec::container(ContainerKind::Package, format!("p{d}_{i}"));
                next.push(tree.insert(parent, spec).expect("parent is a package"));
            }
        }
        level = next;
    }
    let mut leaves = Vec::with_capacity(level.len() * classes);
    for &package in &level {
        for i in 0..classes {
            let spec = EntitySpec::leaf(LeafKind::Class, format!("C{i}"));
            leaves.push(tree.insert(package, spec).expect("parent is a package"));
        }
    }
    let mut rng = Lcg::new(seed);
    let communications = (0..edges)
        .map(|_| {
            let source = leaves[rng.below(leaves.len())];
            let target = leaves[rng.below(leaves.len())];
            RawCommunication::new(source, target, rng.below(1_000) as u64)
        })
        .collect();
    (tree, leaves, communications)
}

/// A landscape of `systems` systems, each with one two-node group running `apps` applications
/// per node, and `edges` random communications between the applications.
pub fn landscape(
    systems: usize,
    apps: usize,
    edges: usize,
    seed: u64,
) -> (ContainmentTree, Vec<RawCommunication>) {
    let mut tree = ContainmentTree::new(ContainerKind::Landscape, "bench");
    let root = tree.root();
    let mut applications = Vec::new();
    for s in 0..systems {
        let system = tree
            .insert(root, EntitySpec::container(ContainerKind::System, format!("system-{s}")))
            .expect("root is a container");
        let group = tree
            .insert(system, EntitySpec::container(ContainerKind::NodeGroup, "group"))
            .expect("systems are containers");
        for n in 0..2 {
            let node = tree
                .insert(group, EntitySpec::container(ContainerKind::Node, format!("node-{n}")))
                .expect("groups are containers");
            for a in 0..apps {
                let spec = EntitySpec::leaf(LeafKind::Application, format!("app-{a}"));
                applications.push(tree.insert(node, spec).expect("nodes are containers"));
            }
        }
    }
    let mut rng = Lcg::new(seed);
    let communications = (0..edges)
        .map(|_| {
            let source = applications[rng.below(applications.len())];
            let target = applications[rng.below(applications.len())];
            RawCommunication::new(source, target, rng.below(1_000) as u64)
        })
        .collect();
    (tree, communications)
}
