//! Benchmark for cube mesh generation.
//!
//! Every active voxel emits 8 vertices and 36 indices, so cost is linear in the
//! number of active cells.
//!
//! Run with: cargo bench --package voxview_rendering --bench mesh_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use voxview_rendering::{CubeMesher, VoxelGrid};

fn benchmark_synthetic_grids(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_mesh");

    for size in [8usize, 16, 32] {
        let grid = VoxelGrid::synthetic(size, 42).expect("bench grid size in range");
        group.throughput(Throughput::Elements((size * size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| black_box(CubeMesher::build(black_box(grid))));
        });
    }

    group.finish();
}

fn benchmark_grid_construction(c: &mut Criterion) {
    c.bench_function("synthetic_grid_32", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(VoxelGrid::synthetic(32, seed))
        });
    });
}

criterion_group!(benches, benchmark_synthetic_grids, benchmark_grid_construction);
criterion_main!(benches);
