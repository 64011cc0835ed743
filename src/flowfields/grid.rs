//! The [TileGrid] owns a dense array of [Tile]s addressed by `index = x + y * width`.
//!
//! The grid is the bounding box of a [WalkableLayout], its `width` and `height` are one more
//! than the largest `x` and `y` found in the layout. Every tile starts life as a wall and only
//! the positions listed by the layout are opened up:
//!
//! ```text
//!  _______________________
//! |     |     |     |     |
//! |  0  |  1  |  2  |  3  |
//! |_____|_____|_____|_____|
//! |     |     |     |     |
//! |  4  |  5  |  6  |  7  |
//! |_____|_____|_____|_____|
//! |     |     |     |     |
//! |  8  |  9  | 10  | 11  |
//! |_____|_____|_____|_____|
//! ```
//!
//! Each solve of the fields stamps the tiles it reaches with the current generation. Bumping
//! the generation at the start of a solve invalidates every previous stamp without touching
//! the array.
//!

use bevy::prelude::*;

use crate::prelude::*;

/// A single cell of the [TileGrid]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Tile {
	/// Impassable, agents never stand on or path through a wall
	wall: bool,
	/// Generation of the last solve that reached this tile
	visited: u32,
	/// Accumulated path cost to the target, only meaningful if visited in the current generation
	distance: f32,
	/// Direction of the cheapest neighbour
	direction: Direction,
	/// `(dx, dy)` step matching `direction`
	offset: (i32, i32),
	/// Agent whose footprint covers the tile
	occupied_by: Option<AgentId>,
}

impl Default for Tile {
	fn default() -> Self {
		Tile {
			wall: true,
			visited: 0,
			distance: 0.0,
			direction: Direction::None,
			offset: (0, 0),
			occupied_by: None,
		}
	}
}

impl Tile {
	/// Whether the tile is impassable
	pub fn is_wall(&self) -> bool {
		self.wall
	}
	/// Distance stored by the latest solve that reached the tile
	pub fn get_distance(&self) -> f32 {
		self.distance
	}
	/// Direction the tile points in
	pub fn get_direction(&self) -> Direction {
		self.direction
	}
	/// `(dx, dy)` step towards the neighbour the tile points at
	pub fn get_offset(&self) -> (i32, i32) {
		self.offset
	}
	/// Agent whose footprint covers the tile
	pub fn get_occupied_by(&self) -> Option<AgentId> {
		self.occupied_by
	}
	/// Whether any agent covers the tile
	pub fn is_occupied(&self) -> bool {
		self.occupied_by.is_some()
	}
	/// Generation of the last solve that reached the tile
	pub(crate) fn get_visited(&self) -> u32 {
		self.visited
	}
	/// Stamp the tile as reached by the solve of `generation`
	pub(crate) fn mark_visited(&mut self, generation: u32, distance: f32) {
		self.visited = generation;
		self.distance = distance;
	}
	/// Lower the distance of a tile already reached in the current solve
	pub(crate) fn set_distance(&mut self, distance: f32) {
		self.distance = distance;
	}
	/// Point the tile at the neighbour `offset` away
	pub(crate) fn set_direction(&mut self, offset: (i32, i32)) {
		self.offset = offset;
		self.direction = Direction::from_offset(offset.0, offset.1);
	}
	/// Claim or release the tile for an agent
	pub(crate) fn set_occupied_by(&mut self, occupied_by: Option<AgentId>) {
		self.occupied_by = occupied_by;
	}
}

/// Dense, fixed size grid of [Tile]s. Before it has been built from a non-empty layout the
/// dimensions are `-1` and every lookup misses
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct TileGrid {
	/// Number of columns, `-1` when uninitialised
	width: i32,
	/// Number of rows, `-1` when uninitialised
	height: i32,
	/// Row-major tile storage
	tiles: Vec<Tile>,
	/// Generation of the latest solve, `0` means nothing has been solved yet
	generation: u32,
}

impl Default for TileGrid {
	fn default() -> Self {
		TileGrid {
			width: -1,
			height: -1,
			tiles: Vec::new(),
			generation: 0,
		}
	}
}

impl TileGrid {
	/// Build a grid sized to the bounding box of the `walkable` positions. Negative positions
	/// cannot be addressed and are skipped. If nothing usable remains the grid is left
	/// uninitialised
	pub fn new(walkable: &[TilePosition]) -> Self {
		let mut max_x = -1;
		let mut max_y = -1;
		for pos in walkable.iter() {
			if pos.get_x() < 0 || pos.get_y() < 0 {
				warn!("Ignoring walkable position {} with a negative coordinate", pos);
				continue;
			}
			max_x = max_x.max(pos.get_x());
			max_y = max_y.max(pos.get_y());
		}
		if max_x < 0 || max_y < 0 {
			debug!("No usable walkable positions, grid left uninitialised");
			return TileGrid::default();
		}
		let (Some(width), Some(height)) = (max_x.checked_add(1), max_y.checked_add(1)) else {
			warn!(
				"Walkable position ({}, {}) is too far out to address, grid left uninitialised",
				max_x, max_y
			);
			return TileGrid::default();
		};
		let Some(count) = width.checked_mul(height) else {
			warn!(
				"A {}x{} grid has too many tiles to address, grid left uninitialised",
				width, height
			);
			return TileGrid::default();
		};
		let mut grid = TileGrid {
			width,
			height,
			tiles: vec![Tile::default(); count as usize],
			generation: 0,
		};
		for pos in walkable.iter() {
			if let Some(tile) = grid.get_tile_mut(*pos) {
				tile.wall = false;
			}
		}
		debug!(
			"Built {}x{} grid with {} walkable positions",
			width,
			height,
			walkable.len()
		);
		grid
	}
	/// Whether the grid has been built from a usable layout
	pub fn is_initialised(&self) -> bool {
		self.width > 0 && self.height > 0
	}
	/// Number of columns, `-1` when uninitialised
	pub fn get_width(&self) -> i32 {
		self.width
	}
	/// Number of rows, `-1` when uninitialised
	pub fn get_height(&self) -> i32 {
		self.height
	}
	/// Number of tiles in the grid
	pub fn get_tile_count(&self) -> usize {
		self.tiles.len()
	}
	/// Get a reference to the tile array
	pub fn get(&self) -> &[Tile] {
		&self.tiles
	}
	/// Generation of the latest solve
	pub fn get_generation(&self) -> u32 {
		self.generation
	}
	/// Convert a position to an index, [None] if it sits outside of the grid
	pub fn to_index(&self, position: TilePosition) -> Option<usize> {
		let (x, y) = position.get_xy();
		if x < 0 || y < 0 || x >= self.width || y >= self.height {
			return None;
		}
		Some((x + y * self.width) as usize)
	}
	/// Convert an index back into a position, [None] if the index is out of range
	pub fn to_position(&self, index: usize) -> Option<TilePosition> {
		if index >= self.tiles.len() {
			return None;
		}
		let i = index as i32;
		Some(TilePosition::new(i % self.width, i / self.width))
	}
	/// Retrieve a tile, [None] if the position is outside of the grid
	pub fn get_tile(&self, position: TilePosition) -> Option<&Tile> {
		self.to_index(position).map(|i| &self.tiles[i])
	}
	/// Retrieve a tile by its index
	pub fn get_tile_by_index(&self, index: usize) -> Option<&Tile> {
		self.tiles.get(index)
	}
	/// Mutable access to a tile, [None] if the position is outside of the grid
	pub(crate) fn get_tile_mut(&mut self, position: TilePosition) -> Option<&mut Tile> {
		match self.to_index(position) {
			Some(i) => Some(&mut self.tiles[i]),
			None => None,
		}
	}
	/// Mutable access to a tile by its index
	pub(crate) fn get_tile_by_index_mut(&mut self, index: usize) -> Option<&mut Tile> {
		self.tiles.get_mut(index)
	}
	/// Whether a tile was reached by the latest solve
	pub fn is_visited(&self, tile: &Tile) -> bool {
		self.generation != 0 && tile.get_visited() == self.generation
	}
	/// Find the in-bounds neighbours of a tile (up to 8), each paired with the `(dx, dy)` step
	/// from the tile to it. Neighbours are listed in [NEIGHBOUR_OFFSETS] order
	pub fn get_all_tile_neighbours(&self, index: usize) -> Vec<(usize, (i32, i32))> {
		let mut neighbours = Vec::new();
		if let Some(origin) = self.to_position(index) {
			for (dx, dy) in NEIGHBOUR_OFFSETS.iter() {
				if let Some(n) = self.to_index(origin.offset(*dx, *dy)) {
					neighbours.push((n, (*dx, *dy)));
				}
			}
		}
		neighbours
	}
	/// Start a new solve, every tile visited by a previous solve becomes stale
	pub(crate) fn advance_generation(&mut self) -> u32 {
		self.generation = self.generation.wrapping_add(1);
		if self.generation == 0 {
			// wrapped around, old stamps could collide with new ones
			for tile in self.tiles.iter_mut() {
				tile.visited = 0;
			}
			self.generation = 1;
		}
		self.generation
	}
}
