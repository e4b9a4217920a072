// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use skyline_benches::landscape;
use skyline_layout::{LayoutConfig, TaffySolver, build_layout_graph};

fn bench_landscape(c: &mut Criterion) {
    let mut group = c.benchmark_group("skyline_landscape");
    group.sample_size(30);
    let config = LayoutConfig::default();

    for &(systems, apps, edges) in &[(10_usize, 4_usize, 200_usize), (50, 8, 2_000)] {
        let (mut tree, raw) = landscape(systems, apps, edges, 0x5C71_0000_0000_0003);

        group.bench_function(format!("build_closed(s={systems},e={edges})"), |b| {
            b.iter(|| black_box(build_layout_graph(&tree, &raw, &config)));
        });

        tree.open_all(tree.root()).unwrap();
        group.bench_function(format!("build_open(s={systems},e={edges})"), |b| {
            b.iter(|| black_box(build_layout_graph(&tree, &raw, &config)));
        });

        let graph = build_layout_graph(&tree, &raw, &config);
        group.bench_function(format!("solve_open(s={systems},e={edges})"), |b| {
            b.iter(|| black_box(TaffySolver::solve_blocking(&graph).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_landscape);
criterion_main!(benches);
