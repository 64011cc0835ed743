//! A crowd of agents walks through a small maze towards a target, the field and the crowd are
//! printed to the console after every tick.
//!
//! The field is recalculated every tick so that the agents steer around each other
//!

use bevy_flowfield_pathfinding::prelude::*;
use demo_utils::{find_markers, layout_from_ascii, render_directions, render_distances};

/// `#` walls, `A` agents and `T` the target
const MAP: &str = "
	A.A.A.#.........
	......#..####...
	A.A...#.....#...
	......####..#...
	..........#.#..T
	..#####...#.....
	..........#.....
";

/// Walk the crowd until everyone arrived or the ticks run out
fn main() {
	let layout = layout_from_ascii(MAP);
	let target = find_markers(MAP, 'T')[0];
	let mut pathfinding = FlowFieldPathfinding::from_layout(&layout, PathfindingSettings::default());

	let mut crowd = Vec::new();
	for start in find_markers(MAP, 'A') {
		match pathfinding.register_agent() {
			Ok(id) => {
				pathfinding.update_agent(id, start.get_x(), start.get_y(), 1, 1);
				crowd.push(id);
			}
			Err(e) => eprintln!("{}", e),
		}
	}
	pathfinding.update(target);
	println!("Distances:\n{}", render_distances(&pathfinding));

	let mut arrived = 0;
	for tick in 1..=60 {
		let mut moved = 0;
		crowd.retain(|id| {
			let Some(next) = pathfinding.get_next_agent_position(*id) else {
				return true;
			};
			if next == target {
				// clear the target for the next one in line
				pathfinding.remove_agent(*id);
				arrived += 1;
				moved += 1;
				return false;
			}
			if !pathfinding.is_tile_occupied(next) {
				pathfinding.update_agent(*id, next.get_x(), next.get_y(), 1, 1);
				moved += 1;
			}
			true
		});
		pathfinding.update(target);
		println!(
			"Tick {}, {} moved, {} arrived:\n{}",
			tick,
			moved,
			arrived,
			render_directions(&pathfinding)
		);
		if crowd.is_empty() || moved == 0 {
			break;
		}
	}
}
