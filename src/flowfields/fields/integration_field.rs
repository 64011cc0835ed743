//! The integration pass fills every reachable [Tile] of a [TileGrid] with the accumulated cost
//! of travelling from it to the target.
//!
//! The target is set to `0` and a wave expands outwards from it. Stepping to an orthogonal
//! neighbour costs `1` and stepping to a diagonal neighbour costs `√2`, walls are never entered
//! so the wave flows around them. On an open `5x5` grid with the target in the bottom-right
//! corner the field looks like:
//!
//! ```text
//!  _______________________________
//! |     |     |     |     |     |
//! | 5.7 | 5.2 | 4.8 | 4.4 | 4.0 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 5.2 | 4.2 | 3.8 | 3.4 | 3.0 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 4.8 | 3.8 | 2.8 | 2.4 | 2.0 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 4.4 | 3.4 | 2.4 | 1.4 | 1.0 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 4.0 | 3.0 | 2.0 | 1.0 |  0  |
//! |_____|_____|_____|_____|_____|
//! ```
//!
//! Two expansion strategies exist, see [SolverMode].
//!

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use bevy::prelude::*;

use crate::prelude::*;

/// Entry of the open list used by [SolverMode::Exact], ordered so that the max-heap
/// [BinaryHeap] pops the smallest distance first
#[derive(Clone, Copy, Debug)]
struct OpenTile {
	/// Tentative distance at the time of queueing
	distance: f32,
	/// Index of the tile in the grid
	index: usize,
}

impl PartialEq for OpenTile {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for OpenTile {}

impl Ord for OpenTile {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.distance
			.total_cmp(&self.distance)
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl PartialOrd for OpenTile {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl TileGrid {
	/// Calculate the distance of every tile that can reach the tile at `target` index. Tiles
	/// that get reached are stamped with a fresh generation, anything else keeps a stale
	/// distance which [TileGrid::is_visited] reports as unvisited.
	///
	/// Returns the number of tiles reached, including the target. A `target` outside of the
	/// grid reaches nothing and leaves the grid untouched
	pub fn calculate_distances(&mut self, target: usize, solver: SolverMode) -> usize {
		if target >= self.get_tile_count() {
			return 0;
		}
		let generation = self.advance_generation();
		if let Some(tile) = self.get_tile_by_index_mut(target) {
			tile.mark_visited(generation, 0.0);
		}
		match solver {
			SolverMode::Wavefront => self.expand_wavefront(target, generation),
			SolverMode::Exact => self.expand_exact(target, generation),
		}
	}
	/// Breadth-first expansion, each tile is queued once when first discovered and any cheaper
	/// path found while it waits only lowers its distance in place
	fn expand_wavefront(&mut self, target: usize, generation: u32) -> usize {
		// each tile is queued at most once so the buffer never grows past the tile count
		let mut queue = VecDeque::with_capacity(self.get_tile_count());
		queue.push_back(target);
		let mut reached = 1;
		while let Some(current) = queue.pop_front() {
			let (Some(current_pos), Some(current_tile)) =
				(self.to_position(current), self.get_tile_by_index(current))
			else {
				continue;
			};
			let current_distance = current_tile.get_distance();
			for (neighbour, (dx, dy)) in self.get_all_tile_neighbours(current) {
				let step = current_pos.distance_to(&current_pos.offset(dx, dy));
				let candidate = current_distance + step;
				let is_visited = match self.get_tile_by_index(neighbour) {
					Some(tile) if !tile.is_wall() => self.is_visited(tile),
					_ => continue,
				};
				if let Some(tile) = self.get_tile_by_index_mut(neighbour) {
					if is_visited {
						if candidate < tile.get_distance() {
							tile.set_distance(candidate);
						}
					} else {
						tile.mark_visited(generation, candidate);
						queue.push_back(neighbour);
						reached += 1;
					}
				}
			}
		}
		reached
	}
	/// Dijkstra expansion, tiles are re-queued whenever their distance improves and stale queue
	/// entries are skipped when popped
	fn expand_exact(&mut self, target: usize, generation: u32) -> usize {
		let mut open = BinaryHeap::new();
		open.push(OpenTile {
			distance: 0.0,
			index: target,
		});
		let mut reached = 1;
		while let Some(OpenTile { distance, index }) = open.pop() {
			let (Some(current_pos), Some(current_tile)) =
				(self.to_position(index), self.get_tile_by_index(index))
			else {
				continue;
			};
			if distance > current_tile.get_distance() {
				continue;
			}
			for (neighbour, (dx, dy)) in self.get_all_tile_neighbours(index) {
				let candidate = distance + current_pos.distance_to(&current_pos.offset(dx, dy));
				let is_visited = match self.get_tile_by_index(neighbour) {
					Some(tile) if !tile.is_wall() => self.is_visited(tile),
					_ => continue,
				};
				if let Some(tile) = self.get_tile_by_index_mut(neighbour) {
					if !is_visited {
						reached += 1;
					} else if candidate >= tile.get_distance() {
						continue;
					}
					tile.mark_visited(generation, candidate);
					open.push(OpenTile {
						distance: candidate,
						index: neighbour,
					});
				}
			}
		}
		reached
	}
}
