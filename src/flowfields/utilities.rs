//! Useful structures and tools used by the grid, the fields and the agents
//!

use bevy::prelude::*;

/// Maximum number of agents a [crate::prelude::FlowFieldPathfinding] will hand out ids for unless configured otherwise
pub const DEFAULT_MAX_AGENTS: usize = 1000;
/// Largest footprint, in tiles, an agent may claim unless configured otherwise
pub const DEFAULT_MAX_AGENT_AREA: i32 = 20 * 20;
/// Value returned by distance queries when a position doesn't map to a tile
pub const NO_DISTANCE: f32 = -1.0;

/// The `(x, y)` offsets of the 8 neighbours of a tile in the order they get inspected.
///
/// Columns are walked first (`x` from `-1` to `1`) and rows second, skipping the tile itself.
/// When building directions the first cheapest neighbour found wins so this order is the
/// tie-break
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
	(-1, -1),
	(-1, 0),
	(-1, 1),
	(0, -1),
	(0, 1),
	(1, -1),
	(1, 0),
	(1, 1),
];

/// Position of a tile within the grid, `(0, 0)` is the top-left corner, `x` grows to the right
/// and `y` grows downwards
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct TilePosition {
	/// Column
	x: i32,
	/// Row
	y: i32,
}

impl TilePosition {
	/// Create a new instance of [TilePosition]
	pub fn new(x: i32, y: i32) -> Self {
		TilePosition { x, y }
	}
	/// Get the column
	pub fn get_x(&self) -> i32 {
		self.x
	}
	/// Get the row
	pub fn get_y(&self) -> i32 {
		self.y
	}
	/// Get the `(x, y)` tuple
	pub fn get_xy(&self) -> (i32, i32) {
		(self.x, self.y)
	}
	/// Position shifted by `(dx, dy)`, the result may sit outside of any grid. Only meant for
	/// steps between tiles of a grid, see [TilePosition::checked_offset] for arbitrary shifts
	pub fn offset(&self, dx: i32, dy: i32) -> Self {
		TilePosition::new(self.x + dx, self.y + dy)
	}
	/// Position shifted by `(dx, dy)`, [None] if either coordinate overflows
	pub fn checked_offset(&self, dx: i32, dy: i32) -> Option<Self> {
		Some(TilePosition::new(
			self.x.checked_add(dx)?,
			self.y.checked_add(dy)?,
		))
	}
	/// Euclidean distance between two tile positions, `1.0` for orthogonal neighbours and `√2` for diagonal ones
	pub fn distance_to(&self, other: &TilePosition) -> f32 {
		let dx = (other.x - self.x) as f32;
		let dy = (other.y - self.y) as f32;
		(dx * dx + dy * dy).sqrt()
	}
}

impl From<(i32, i32)> for TilePosition {
	fn from(value: (i32, i32)) -> Self {
		TilePosition::new(value.0, value.1)
	}
}

impl From<IVec2> for TilePosition {
	fn from(value: IVec2) -> Self {
		TilePosition::new(value.x, value.y)
	}
}

impl From<TilePosition> for IVec2 {
	fn from(value: TilePosition) -> Self {
		IVec2::new(value.x, value.y)
	}
}

impl std::fmt::Display for TilePosition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// The 8 directions of movement a tile of the flow field can point in. `None` marks a tile with
/// nowhere better to go: walls, unreachable tiles, the only tile of a `1x1` grid or a tile
/// boxed in by occupied neighbours. The target itself points at its closest neighbour.
///
/// Discriminants are stable so the enum can be handed to scripting layers as a plain integer
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Reflect)]
#[repr(u8)]
pub enum Direction {
	/// No movement
	#[default]
	None = 0,
	/// `(-1, 0)`
	Left = 1,
	/// `(1, 0)`
	Right = 2,
	/// `(0, -1)`
	Up = 3,
	/// `(0, 1)`
	Down = 4,
	/// `(-1, -1)`
	TopLeft = 5,
	/// `(1, -1)`
	TopRight = 6,
	/// `(-1, 1)`
	BotLeft = 7,
	/// `(1, 1)`
	BotRight = 8,
}

impl Direction {
	/// Map a neighbour offset onto a [Direction], anything that isn't a unit step gives [Direction::None]
	pub fn from_offset(x: i32, y: i32) -> Self {
		match (x, y) {
			(-1, 0) => Direction::Left,
			(1, 0) => Direction::Right,
			(0, -1) => Direction::Up,
			(0, 1) => Direction::Down,
			(-1, -1) => Direction::TopLeft,
			(1, -1) => Direction::TopRight,
			(-1, 1) => Direction::BotLeft,
			(1, 1) => Direction::BotRight,
			_ => Direction::None,
		}
	}
	/// The `(dx, dy)` grid step of this direction
	pub fn get_offset(&self) -> (i32, i32) {
		match self {
			Direction::None => (0, 0),
			Direction::Left => (-1, 0),
			Direction::Right => (1, 0),
			Direction::Up => (0, -1),
			Direction::Down => (0, 1),
			Direction::TopLeft => (-1, -1),
			Direction::TopRight => (1, -1),
			Direction::BotLeft => (-1, 1),
			Direction::BotRight => (1, 1),
		}
	}
	/// Unit vector of the direction in 2d space. The grid grows downwards while world space
	/// grows upwards so [Direction::Up] gives `(0.0, 1.0)`
	#[cfg(feature = "2d")]
	pub fn unit_vector_2d(&self) -> Vec2 {
		let (x, y) = self.get_offset();
		Vec2::new(x as f32, -y as f32).normalize_or_zero()
	}
	/// Unit vector of the direction across the x-z plane in 3d space, [Direction::Up] points
	/// along `-z`
	#[cfg(feature = "3d")]
	pub fn unit_vector_3d(&self) -> Vec3 {
		let (x, z) = self.get_offset();
		Vec3::new(x as f32, 0.0, z as f32).normalize_or_zero()
	}
}

impl From<Direction> for u8 {
	fn from(value: Direction) -> Self {
		value as u8
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn offsets_round_trip_through_direction() {
		for (x, y) in NEIGHBOUR_OFFSETS.iter() {
			let dir = Direction::from_offset(*x, *y);
			assert_ne!(Direction::None, dir);
			assert_eq!((*x, *y), dir.get_offset());
		}
	}
	#[test]
	fn non_unit_offset_has_no_direction() {
		assert_eq!(Direction::None, Direction::from_offset(0, 0));
		assert_eq!(Direction::None, Direction::from_offset(2, 1));
	}
	#[test]
	fn direction_discriminants() {
		assert_eq!(0, u8::from(Direction::None));
		assert_eq!(3, u8::from(Direction::Up));
		assert_eq!(8, u8::from(Direction::BotRight));
	}
	#[test]
	fn neighbour_order_walks_columns_first() {
		assert_eq!((-1, -1), NEIGHBOUR_OFFSETS[0]);
		assert_eq!((-1, 1), NEIGHBOUR_OFFSETS[2]);
		assert_eq!((0, -1), NEIGHBOUR_OFFSETS[3]);
		assert_eq!((1, 1), NEIGHBOUR_OFFSETS[7]);
	}
	#[test]
	fn distance_orthogonal_and_diagonal() {
		let origin = TilePosition::new(3, 3);
		assert_eq!(1.0, origin.distance_to(&TilePosition::new(4, 3)));
		assert_eq!(1.0, origin.distance_to(&TilePosition::new(3, 2)));
		let diag = origin.distance_to(&TilePosition::new(2, 4));
		assert!((diag - std::f32::consts::SQRT_2).abs() < f32::EPSILON);
	}
	#[test]
	fn checked_offset_stops_at_the_coordinate_range() {
		let pos = TilePosition::new(i32::MAX, 0);
		assert_eq!(None, pos.checked_offset(1, 0));
		assert_eq!(Some(TilePosition::new(i32::MAX - 1, 1)), pos.checked_offset(-1, 1));
		assert_eq!(None, TilePosition::new(0, i32::MIN).checked_offset(0, -1));
	}
	#[test]
	fn ivec_conversions() {
		let pos = TilePosition::from(IVec2::new(5, -2));
		assert_eq!((5, -2), pos.get_xy());
		assert_eq!(IVec2::new(5, -2), IVec2::from(pos));
		assert_eq!(pos, TilePosition::from((5, -2)));
	}
	#[test]
	#[cfg(feature = "2d")]
	fn unit_vector_2d_flips_y() {
		assert_eq!(Vec2::new(0.0, 1.0), Direction::Up.unit_vector_2d());
		assert_eq!(Vec2::ZERO, Direction::None.unit_vector_2d());
		let v = Direction::BotRight.unit_vector_2d();
		assert!((v.length() - 1.0).abs() < 0.0001);
		assert!(v.x > 0.0 && v.y < 0.0);
	}
	#[test]
	#[cfg(feature = "3d")]
	fn unit_vector_3d_on_xz_plane() {
		assert_eq!(Vec3::new(0.0, 0.0, -1.0), Direction::Up.unit_vector_3d());
		assert_eq!(Vec3::new(-1.0, 0.0, 0.0), Direction::Left.unit_vector_3d());
	}
}
