//! Helpers shared by the demos, benches and integration tests: building layouts from ASCII art
//! or a seeded random maze, and printing a solved field to the console
//!

use bevy::prelude::*;
use bevy_flowfield_pathfinding::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Character marking a wall in ASCII layouts
pub const WALL: char = '#';

/// Lines of an ASCII map with surrounding blank lines and indentation removed
fn ascii_rows(art: &str) -> impl Iterator<Item = &str> {
	art.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Build a layout from ASCII art, each character is a tile and [WALL] is the only impassable
/// one. Any other character (`.`, `T`, `A`, ...) is walkable so maps can carry markers
pub fn layout_from_ascii(art: &str) -> WalkableLayout {
	let mut layout = WalkableLayout::default();
	for (y, row) in ascii_rows(art).enumerate() {
		for (x, c) in row.chars().enumerate() {
			if c != WALL {
				layout.push(TilePosition::new(x as i32, y as i32));
			}
		}
	}
	layout
}

/// Find every tile of an ASCII map marked with `marker`, in reading order
pub fn find_markers(art: &str, marker: char) -> Vec<TilePosition> {
	let mut found = Vec::new();
	for (y, row) in ascii_rows(art).enumerate() {
		for (x, c) in row.chars().enumerate() {
			if c == marker {
				found.push(TilePosition::new(x as i32, y as i32));
			}
		}
	}
	found
}

/// Generate a `width` by `height` layout where each tile is a wall with a probability of
/// `wall_chance`. The same `seed` always gives the same maze. The corners are kept walkable so
/// they can be used as targets
pub fn random_maze(width: i32, height: i32, wall_chance: f64, seed: u64) -> WalkableLayout {
	let mut rng = StdRng::seed_from_u64(seed);
	let corners = [
		(0, 0),
		(width - 1, 0),
		(0, height - 1),
		(width - 1, height - 1),
	];
	let mut layout = WalkableLayout::default();
	for y in 0..height {
		for x in 0..width {
			if corners.contains(&(x, y)) || !rng.random_bool(wall_chance) {
				layout.push(TilePosition::new(x, y));
			}
		}
	}
	layout
}

/// Single character arrow for a direction
pub fn direction_glyph(direction: Direction) -> char {
	match direction {
		Direction::None => '·',
		Direction::Left => '←',
		Direction::Right => '→',
		Direction::Up => '↑',
		Direction::Down => '↓',
		Direction::TopLeft => '↖',
		Direction::TopRight => '↗',
		Direction::BotLeft => '↙',
		Direction::BotRight => '↘',
	}
}

/// Draw the flow field one row per line. The target is `T`, walls are [WALL] and tiles covered
/// by an agent are `A`
pub fn render_directions(pathfinding: &FlowFieldPathfinding) -> String {
	let mut out = String::new();
	for y in 0..pathfinding.get_height() {
		for x in 0..pathfinding.get_width() {
			let glyph = if pathfinding.get_target_position() == Some(TilePosition::new(x, y)) {
				'T'
			} else if pathfinding.is_tile_wall((x, y)) {
				WALL
			} else if pathfinding.is_tile_occupied((x, y)) {
				'A'
			} else {
				direction_glyph(pathfinding.get_tile_direction((x, y)))
			};
			out.push(glyph);
		}
		out.push('\n');
	}
	out
}

/// Draw the distance of every tile with one decimal place, walls and unreached tiles are blank
pub fn render_distances(pathfinding: &FlowFieldPathfinding) -> String {
	let mut out = String::new();
	for y in 0..pathfinding.get_height() {
		for x in 0..pathfinding.get_width() {
			match pathfinding.get_tile_distance_checked((x, y)) {
				Some(distance) => out.push_str(&format!("{:6.1}", distance)),
				None => out.push_str(&format!("{:>6}", WALL)),
			}
		}
		out.push('\n');
	}
	out
}

/// Log the flow field at info level, one line per row
pub fn log_directions(pathfinding: &FlowFieldPathfinding) {
	for line in render_directions(pathfinding).lines() {
		info!("{}", line);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn ascii_walls_and_markers() {
		let art = "
			T..
			.#.
			..A
		";
		let layout = layout_from_ascii(art);
		assert_eq!(8, layout.len());
		assert!(!layout.get().contains(&TilePosition::new(1, 1)));
		assert_eq!(vec![TilePosition::new(0, 0)], find_markers(art, 'T'));
		assert_eq!(vec![TilePosition::new(2, 2)], find_markers(art, 'A'));
	}
	#[test]
	fn maze_is_seeded() {
		let a = random_maze(20, 10, 0.3, 7);
		let b = random_maze(20, 10, 0.3, 7);
		assert_eq!(a, b);
		assert!(a.get().contains(&TilePosition::new(19, 9)));
		assert!(a.len() < 200);
	}
	#[test]
	fn render_small_field() {
		let mut pathfinding = FlowFieldPathfinding::from_layout(
			&layout_from_ascii("...\n.#.\n..."),
			PathfindingSettings::default(),
		);
		pathfinding.update((2, 2));
		let drawn = render_directions(&pathfinding);
		// (0, 0) ties between (0, 1) and (1, 0), the left column is inspected first
		assert_eq!("↓↘↓\n↘#↓\n→→T\n", drawn);
	}
}
