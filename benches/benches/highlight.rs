// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use skyline_benches::package_city;
use skyline_comm::CommunicationGraph;
use skyline_highlight::{FocalTarget, HighlightContext, HighlightInput, HighlightMode};

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("skyline_highlight");
    group.sample_size(50);

    for &(fanout, edges) in &[(4_usize, 1_000_usize), (8, 20_000)] {
        let (mut tree, leaves, raw) = package_city(fanout, 3, 8, edges, 0x5C71_0000_0000_0002);
        tree.open_all(tree.root()).unwrap();
        let graph = CommunicationGraph::from_raw(&tree, &raw).unwrap();
        let routing = graph.route(&tree);
        let input = HighlightInput {
            tree: &tree,
            graph: &graph,
            routing: &routing,
        };
        let package = tree.parent(leaves[0]).unwrap();

        group.bench_function(format!("leaf(f={fanout},e={edges})"), |b| {
            b.iter(|| {
                let mut context = HighlightContext::new();
                context
                    .highlight(FocalTarget::Entity(leaves[0]), input, HighlightMode::Replace)
                    .unwrap();
                black_box(context);
            });
        });

        group.bench_function(format!("package(f={fanout},e={edges})"), |b| {
            b.iter(|| {
                let mut context = HighlightContext::new();
                context
                    .highlight(FocalTarget::Entity(package), input, HighlightMode::Replace)
                    .unwrap();
                black_box(context);
            });
        });

        if let Some(edge) = graph.edges().first() {
            group.bench_function(format!("edge(f={fanout},e={edges})"), |b| {
                b.iter(|| {
                    let mut context = HighlightContext::new();
                    context
                        .highlight(FocalTarget::Edge(edge.id), input, HighlightMode::Replace)
                        .unwrap();
                    black_box(context);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_highlight);
criterion_main!(benches);
