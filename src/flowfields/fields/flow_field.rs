//! The flow pass points every walkable [Tile] at its cheapest neighbour once the integration
//! pass has settled the distances. An agent standing on a tile only has to read the
//! [Direction] to know where to step next.
//!
//! A neighbour is only considered when it is in bounds, not a wall, reached by the latest solve
//! and not covered by an agent footprint. Occupied tiles are skipped so that agents get steered
//! around each other, a tile whose neighbours are all unusable points nowhere. Ties go to the
//! first neighbour found in [NEIGHBOUR_OFFSETS] order.
//!
//! The target gets no special treatment: every neighbour is further away than it so it points
//! at its closest neighbour. Callers decide for themselves when an agent has arrived.
//!

use crate::prelude::*;

impl TileGrid {
	/// Recalculate the direction of every walkable tile from the current distances and
	/// occupancy
	pub fn calculate_directions(&mut self) {
		for i in 0..self.get_tile_count() {
			match self.get_tile_by_index(i) {
				Some(tile) if !tile.is_wall() => {}
				_ => continue,
			}
			let offset = self
				.find_cheapest_neighbour(i)
				.map(|(_, offset)| offset)
				.unwrap_or((0, 0));
			if let Some(tile) = self.get_tile_by_index_mut(i) {
				tile.set_direction(offset);
			}
		}
	}
	/// Find the unoccupied, visited, walkable neighbour of a tile with the smallest distance,
	/// returned with the `(dx, dy)` step towards it
	pub fn find_cheapest_neighbour(&self, index: usize) -> Option<(usize, (i32, i32))> {
		let mut cheapest: Option<(usize, (i32, i32), f32)> = None;
		for (neighbour, offset) in self.get_all_tile_neighbours(index) {
			let Some(tile) = self.get_tile_by_index(neighbour) else {
				continue;
			};
			if tile.is_wall() || tile.is_occupied() || !self.is_visited(tile) {
				continue;
			}
			match cheapest {
				Some((_, _, distance)) if tile.get_distance() >= distance => {}
				_ => cheapest = Some((neighbour, offset, tile.get_distance())),
			}
		}
		cheapest.map(|(neighbour, offset, _)| (neighbour, offset))
	}
}
