//! Measure a full field recalculation across an open grid of 500x500 tiles with the target in
//! the bottom-right corner, for both solvers
//!

use std::hint::black_box;

use bevy_flowfield_pathfinding::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};

/// Build an open grid with a sprinkling of agents so the flow pass has occupancy to skip
fn prepare(solver: SolverMode) -> FlowFieldPathfinding {
	let settings = PathfindingSettings::default().with_solver(solver);
	let mut pathfinding = FlowFieldPathfinding::from_layout(&WalkableLayout::open(500, 500), settings);
	for i in 0..100 {
		let id = pathfinding.register_agent().unwrap();
		pathfinding.update_agent(id, (i * 37) % 500, (i * 91) % 500, 2, 2);
	}
	pathfinding
}

/// Register the open grid benchmarks
pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(20);
	let mut wavefront = prepare(SolverMode::Wavefront);
	group.bench_function("calc_flow_open_wavefront", |b| {
		b.iter(|| wavefront.update(black_box((499, 499))))
	});
	let mut exact = prepare(SolverMode::Exact);
	group.bench_function("calc_flow_open_exact", |b| {
		b.iter(|| exact.update(black_box((499, 499))))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
