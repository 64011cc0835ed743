//! Measure moving a crowd of agents around a 200x200 grid and querying where each one should
//! step next, the per-tick work of a game driving the field
//!

use std::hint::black_box;

use bevy_flowfield_pathfinding::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Number of agents in the crowd
const CROWD: usize = 1000;

/// Build a solved field with every agent placed at a random position
fn prepare(rng: &mut StdRng) -> (FlowFieldPathfinding, Vec<AgentId>) {
	let mut pathfinding = FlowFieldPathfinding::from_layout(
		&WalkableLayout::open(200, 200),
		PathfindingSettings::default().with_max_agents(CROWD),
	);
	let mut agents = Vec::with_capacity(CROWD);
	for _ in 0..CROWD {
		let id = pathfinding.register_agent().unwrap();
		let (x, y) = (rng.random_range(0..200), rng.random_range(0..200));
		pathfinding.update_agent(id, x, y, 1, 1);
		agents.push(id);
	}
	pathfinding.update((100, 100));
	(pathfinding, agents)
}

/// Register the agent churn benchmark
pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(50);
	let mut rng = StdRng::seed_from_u64(3);
	let (mut pathfinding, agents) = prepare(&mut rng);
	group.bench_function("agent_churn_step", |b| {
		b.iter(|| {
			for id in agents.iter() {
				if let Some(next) = pathfinding.get_next_agent_position(*id) {
					pathfinding.update_agent(*id, next.get_x(), next.get_y(), 1, 1);
				}
			}
		})
	});
	group.bench_function("agent_churn_teleport", |b| {
		b.iter(|| {
			for id in agents.iter() {
				let (x, y) = (rng.random_range(0..200), rng.random_range(0..200));
				pathfinding.update_agent(black_box(*id), x, y, 3, 3);
			}
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
