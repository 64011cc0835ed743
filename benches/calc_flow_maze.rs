//! Measure a full field recalculation across a 500x500 grid with a snake-like maze of walls
//! running up and down the entire grid, so the wave has to travel the longest possible way
//!
//! ```txt
//!  _____________________________
//! |__|__|__|xx|__|__|__|xx|__|__|
//! |__|xx|__|xx|__|xx|__|xx|__|xx|
//! |__|xx|__|xx|__|xx|__|xx|__|xx|
//! |__|xx|__|xx|__|xx|__|xx|__|xx|
//! |__|xx|__|__|__|xx|__|__|__|xx|
//! ```
//!
//! A second case uses a seeded random scattering of walls instead
//!

use std::hint::black_box;

use bevy_flowfield_pathfinding::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use demo_utils::random_maze;

/// Width and height of the benchmarked grids
const SIZE: i32 = 500;

/// Every odd column is a wall, alternating between a gap at the bottom and a gap at the top
fn snake_layout() -> WalkableLayout {
	let mut layout = WalkableLayout::default();
	for x in 0..SIZE {
		for y in 0..SIZE {
			let is_wall = if x % 2 == 0 {
				false
			} else if x % 4 == 1 {
				y != SIZE - 1
			} else {
				y != 0
			};
			if !is_wall {
				layout.push(TilePosition::new(x, y));
			}
		}
	}
	layout
}

/// Register the maze benchmarks
pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(10);
	for solver in [SolverMode::Wavefront, SolverMode::Exact] {
		let settings = PathfindingSettings::default().with_solver(solver);
		let mut snake = FlowFieldPathfinding::from_layout(&snake_layout(), settings.clone());
		group.bench_function(format!("calc_flow_maze_snake_{:?}", solver), |b| {
			b.iter(|| snake.update(black_box((0, 0))))
		});
		let mut random = FlowFieldPathfinding::from_layout(&random_maze(SIZE, SIZE, 0.3, 42), settings);
		group.bench_function(format!("calc_flow_maze_random_{:?}", solver), |b| {
			b.iter(|| random.update(black_box((SIZE - 1, SIZE - 1))))
		});
	}
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
