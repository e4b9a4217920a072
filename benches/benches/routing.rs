// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use skyline_benches::package_city;
use skyline_comm::{CommunicationGraph, ThicknessConfig};

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("skyline_routing");
    group.sample_size(50);

    for &(fanout, depth, edges) in &[(4_usize, 3_usize, 1_000_usize), (8, 3, 20_000)] {
        let (mut tree, _, raw) = package_city(fanout, depth, 8, edges, 0x5C71_0000_0000_0001);

        group.bench_function(format!("aggregate(f={fanout},d={depth},e={edges})"), |b| {
            b.iter(|| black_box(CommunicationGraph::from_raw(&tree, &raw).unwrap()));
        });

        let graph = CommunicationGraph::from_raw(&tree, &raw).unwrap();
        group.bench_function(format!("route_closed(f={fanout},d={depth},e={edges})"), |b| {
            b.iter(|| black_box(graph.route(&tree)));
        });

        tree.open_all(tree.root()).unwrap();
        group.bench_function(format!("route_open(f={fanout},d={depth},e={edges})"), |b| {
            b.iter(|| black_box(graph.route(&tree)));
        });

        group.bench_function(
            format!("classify_open(f={fanout},d={depth},e={edges})"),
            |b| {
                b.iter_batched(
                    || graph.route(&tree),
                    |mut routing| {
                        black_box(routing.classify(&ThicknessConfig::DEFAULT));
                        black_box(routing);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
