// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion and reconstruction throughput.

#![allow(
    missing_docs,
    reason = "criterion_group! emits an undocumented function."
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::Vec3;
use octant_demos::SyntheticScan;
use octant_tree::reconstructors::{Noop, VoxelSurface};
use octant_tree::{ReconstructionTree, TreeConfig};
use std::hint::black_box;

const POINTS: usize = 50_000;

fn insert(c: &mut Criterion) {
    let points = SyntheticScan::room(3, 8.0).frame(POINTS);
    let mut group = c.benchmark_group("insert");
    for depth in [2, 4, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let config = TreeConfig::centered(Vec3::ZERO, 8.0, depth);
                let mut tree = ReconstructionTree::<Noop>::new(config).unwrap();
                tree.extend_points(points.iter().copied()).unwrap();
                black_box(tree.cluster_count())
            });
        });
    }
    group.finish();
}

fn reconstruct(c: &mut Criterion) {
    let points = SyntheticScan::room(3, 8.0).frame(POINTS);
    let config = TreeConfig::centered(Vec3::ZERO, 8.0, 3);
    let mut tree = ReconstructionTree::with_factory(config, || VoxelSurface::new(0.05)).unwrap();
    tree.extend_points(points).unwrap();

    let mut group = c.benchmark_group("reconstruct");
    group.bench_function("serial", |b| {
        b.iter(|| {
            tree.reconstruct();
            black_box(tree.collect_mesh().len())
        });
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            tree.reconstruct_parallel();
            black_box(tree.collect_mesh().len())
        });
    });
    group.finish();
}

criterion_group!(benches, insert, reconstruct);
criterion_main!(benches);
