//! [FlowFieldPathfinding] ties the [TileGrid], the integration and flow passes and the
//! [AgentRegistry] together behind one surface.
//!
//! The surface is forgiving: positions outside of the grid, unknown agents and an
//! uninitialised grid all degrade to neutral answers (`false`, `-1`, [Direction::None],
//! [None]) or no-ops instead of panicking, so it can be driven straight from a scripting layer
//! or from Bevy systems.
//!
//! Typical use:
//!
//! ```
//! use bevy_flowfield_pathfinding::prelude::*;
//!
//! let mut pathfinding = FlowFieldPathfinding::default();
//! pathfinding.init(WalkableLayout::open(5, 5).get());
//! let agent = pathfinding.register_agent().unwrap();
//! pathfinding.update_agent(agent, 0, 0, 1, 1);
//! pathfinding.update((4, 4));
//! assert_eq!(Some(TilePosition::new(1, 1)), pathfinding.get_next_agent_position(agent));
//! ```
//!

use bevy::prelude::*;

use crate::prelude::*;

/// Single-target flow field pathfinder over a tile grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Debug, Default, Reflect)]
pub struct FlowFieldPathfinding {
	/// Tiles with their distances, directions and occupancy
	grid: TileGrid,
	/// Registered agents and their footprints
	agents: AgentRegistry,
	/// Solver and limits
	settings: PathfindingSettings,
	/// Target of the latest successful [FlowFieldPathfinding::update]
	target: Option<TilePosition>,
}

impl FlowFieldPathfinding {
	/// Create a new instance of [FlowFieldPathfinding] with custom settings, the grid still needs
	/// to be built with [FlowFieldPathfinding::init]
	pub fn new(settings: PathfindingSettings) -> Self {
		FlowFieldPathfinding {
			grid: TileGrid::default(),
			agents: AgentRegistry::new(settings.get_max_agents(), settings.get_max_agent_area()),
			settings,
			target: None,
		}
	}
	/// Create a new instance of [FlowFieldPathfinding] with the grid built from `layout`
	pub fn from_layout(layout: &WalkableLayout, settings: PathfindingSettings) -> Self {
		let mut pathfinding = FlowFieldPathfinding::new(settings);
		pathfinding.init(layout.get());
		pathfinding
	}
	/// Build the grid from the list of walkable positions, everything else in their bounding box
	/// becomes a wall. Building again discards the previous field and target, agents that are
	/// placed get stamped onto the new grid
	pub fn init(&mut self, walkable: &[TilePosition]) {
		self.grid = TileGrid::new(walkable);
		self.target = None;
		self.agents.restamp(&mut self.grid);
	}
	/// Recalculate the distance and direction of every tile towards `target`, taking the current
	/// agent footprints into account. A target outside of the grid is ignored and the previous
	/// field is kept
	pub fn update(&mut self, target: impl Into<TilePosition>) {
		let target = target.into();
		let Some(target_index) = self.grid.to_index(target) else {
			debug!("Ignoring flow field target {} outside of the grid", target);
			return;
		};
		let reached = self
			.grid
			.calculate_distances(target_index, self.settings.get_solver());
		self.grid.calculate_directions();
		self.target = Some(target);
		debug!(
			"Flow field towards {} reached {} tiles in generation {}",
			target,
			reached,
			self.grid.get_generation()
		);
	}
	/// Number of columns, `-1` before the grid has been built
	pub fn get_width(&self) -> i32 {
		self.grid.get_width()
	}
	/// Number of rows, `-1` before the grid has been built
	pub fn get_height(&self) -> i32 {
		self.grid.get_height()
	}
	/// Target of the current field, [None] until a valid target has been set
	pub fn get_target_position(&self) -> Option<TilePosition> {
		self.target
	}
	/// Whether a valid target has been set
	pub fn has_target(&self) -> bool {
		self.target.is_some()
	}
	/// Get a reference to the [TileGrid]
	pub fn get_grid(&self) -> &TileGrid {
		&self.grid
	}
	/// Get a reference to the [AgentRegistry]
	pub fn get_agents(&self) -> &AgentRegistry {
		&self.agents
	}
	/// Get a reference to the [PathfindingSettings]
	pub fn get_settings(&self) -> &PathfindingSettings {
		&self.settings
	}
	/// Register a new agent. It has no footprint until [FlowFieldPathfinding::update_agent] is
	/// called. Fails once the configured number of agents has been handed out
	pub fn register_agent(&mut self) -> FlowFieldResult<AgentId> {
		self.agents.register()
	}
	/// Move an agent so that its footprint of `width` by `height` tiles has its top-left corner
	/// at `(x, y)`. A negative `x` takes the agent off the grid. Unknown agents, oversized
	/// footprints and footprints reaching past the coordinate range are ignored.
	///
	/// The field isn't recalculated, the new occupancy is seen by the next
	/// [FlowFieldPathfinding::update]
	pub fn update_agent(&mut self, id: AgentId, x: i32, y: i32, width: i32, height: i32) {
		let footprint = Footprint::new(TilePosition::new(x, y), width, height);
		if let Err(e) = self.agents.place(&mut self.grid, id, footprint) {
			debug!("Ignoring agent update: {}", e);
		}
	}
	/// Take an agent's footprint off the grid, the agent stays registered. Unknown agents are
	/// ignored
	pub fn remove_agent(&mut self, id: AgentId) {
		if let Err(e) = self.agents.remove(&mut self.grid, id) {
			debug!("Ignoring agent removal: {}", e);
		}
	}
	/// The tile an agent should move to next, see [AgentRegistry::next_position]
	pub fn get_next_agent_position(&self, id: AgentId) -> Option<TilePosition> {
		self.agents.next_position(&self.grid, id)
	}
	/// Whether the position is a wall, `false` outside of the grid
	pub fn is_tile_wall(&self, position: impl Into<TilePosition>) -> bool {
		self.grid
			.get_tile(position.into())
			.is_some_and(|tile| tile.is_wall())
	}
	/// Stored distance to the target, [NO_DISTANCE] outside of the grid. Tiles the latest field
	/// didn't reach keep whatever they held before (`0` if never reached), see
	/// [FlowFieldPathfinding::get_tile_distance_checked] to tell them apart
	pub fn get_tile_distance(&self, position: impl Into<TilePosition>) -> f32 {
		self.grid
			.get_tile(position.into())
			.map_or(NO_DISTANCE, |tile| tile.get_distance())
	}
	/// Distance to the target, only if the tile was reached by the latest field
	pub fn get_tile_distance_checked(&self, position: impl Into<TilePosition>) -> Option<f32> {
		let tile = self.grid.get_tile(position.into())?;
		if tile.is_wall() || !self.grid.is_visited(tile) {
			return None;
		}
		Some(tile.get_distance())
	}
	/// Direction of the flow, [Direction::None] outside of the grid
	pub fn get_tile_direction(&self, position: impl Into<TilePosition>) -> Direction {
		self.grid
			.get_tile(position.into())
			.map_or(Direction::None, |tile| tile.get_direction())
	}
	/// `(dx, dy)` step of the flow, `(0, 0)` outside of the grid
	pub fn get_tile_offset(&self, position: impl Into<TilePosition>) -> (i32, i32) {
		self.grid
			.get_tile(position.into())
			.map_or((0, 0), |tile| tile.get_offset())
	}
	/// Whether an agent footprint covers the position, `false` outside of the grid
	pub fn is_tile_occupied(&self, position: impl Into<TilePosition>) -> bool {
		self.grid
			.get_tile(position.into())
			.is_some_and(|tile| tile.is_occupied())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	/// Length of a diagonal step
	const SQRT_2: f32 = std::f32::consts::SQRT_2;

	/// Pathfinder over an open `width` by `height` grid with default settings
	fn open_pathfinding(width: i32, height: i32) -> FlowFieldPathfinding {
		FlowFieldPathfinding::from_layout(
			&WalkableLayout::open(width, height),
			PathfindingSettings::default(),
		)
	}

	#[test]
	fn uninitialised_gives_neutral_answers() {
		let mut pathfinding = FlowFieldPathfinding::default();
		assert_eq!(-1, pathfinding.get_width());
		assert_eq!(-1, pathfinding.get_height());
		pathfinding.update((0, 0));
		assert_eq!(None, pathfinding.get_target_position());
		assert!(!pathfinding.is_tile_wall((0, 0)));
		assert_eq!(NO_DISTANCE, pathfinding.get_tile_distance((0, 0)));
		assert_eq!(Direction::None, pathfinding.get_tile_direction((0, 0)));
		assert!(!pathfinding.is_tile_occupied((0, 0)));
		let id = pathfinding.register_agent().unwrap();
		pathfinding.update_agent(id, 0, 0, 1, 1);
		assert_eq!(None, pathfinding.get_next_agent_position(id));
	}
	#[test]
	fn empty_init_stays_uninitialised() {
		let mut pathfinding = FlowFieldPathfinding::default();
		pathfinding.init(&[]);
		assert_eq!(-1, pathfinding.get_width());
		pathfinding.update((0, 0));
		assert!(!pathfinding.has_target());
	}
	#[test]
	fn out_of_bounds_target_keeps_field() {
		let mut pathfinding = open_pathfinding(5, 5);
		pathfinding.update((4, 4));
		let before = pathfinding.get_grid().clone();
		pathfinding.update((5, 0));
		pathfinding.update((-1, 2));
		assert_eq!(Some(TilePosition::new(4, 4)), pathfinding.get_target_position());
		assert_eq!(&before, pathfinding.get_grid());
	}
	#[test]
	fn out_of_bounds_queries() {
		let pathfinding = open_pathfinding(3, 3);
		assert!(!pathfinding.is_tile_wall((3, 0)));
		assert_eq!(NO_DISTANCE, pathfinding.get_tile_distance((0, -1)));
		assert_eq!(Direction::None, pathfinding.get_tile_direction((9, 9)));
		assert_eq!((0, 0), pathfinding.get_tile_offset((9, 9)));
		assert!(!pathfinding.is_tile_occupied((-4, 1)));
		assert_eq!(None, pathfinding.get_tile_distance_checked((3, 3)));
	}
	#[test]
	fn unknown_agents_are_ignored() {
		let mut pathfinding = open_pathfinding(3, 3);
		let ghost = AgentId::new(12);
		pathfinding.update_agent(ghost, 0, 0, 1, 1);
		pathfinding.remove_agent(ghost);
		assert!(!pathfinding.is_tile_occupied((0, 0)));
		assert_eq!(None, pathfinding.get_next_agent_position(ghost));
	}
	#[test]
	fn checked_distance_only_for_reached_tiles() {
		let mut layout = WalkableLayout::open(5, 1);
		layout.remove(TilePosition::new(2, 0));
		let mut pathfinding = FlowFieldPathfinding::from_layout(&layout, PathfindingSettings::default());
		assert_eq!(None, pathfinding.get_tile_distance_checked((0, 0)));
		pathfinding.update((0, 0));
		assert_eq!(Some(1.0), pathfinding.get_tile_distance_checked((1, 0)));
		assert_eq!(None, pathfinding.get_tile_distance_checked((2, 0)));
		assert_eq!(None, pathfinding.get_tile_distance_checked((4, 0)));
		assert_eq!(0.0, pathfinding.get_tile_distance((4, 0)));
	}
	#[test]
	fn occupancy_changes_wait_for_update() {
		let mut pathfinding = open_pathfinding(5, 5);
		let blocker = pathfinding.register_agent().unwrap();
		pathfinding.update((4, 4));
		assert_eq!(Direction::BotRight, pathfinding.get_tile_direction((0, 0)));
		pathfinding.update_agent(blocker, 1, 1, 1, 1);
		// the field is stale until the next update
		assert_eq!(Direction::BotRight, pathfinding.get_tile_direction((0, 0)));
		pathfinding.update((4, 4));
		assert_eq!(Direction::Down, pathfinding.get_tile_direction((0, 0)));
	}
	#[test]
	fn query_reflects_live_occupancy() {
		let mut pathfinding = open_pathfinding(5, 5);
		let first = pathfinding.register_agent().unwrap();
		let second = pathfinding.register_agent().unwrap();
		pathfinding.update_agent(first, 2, 2, 1, 1);
		pathfinding.update((4, 4));
		assert_eq!(Some(TilePosition::new(3, 3)), pathfinding.get_next_agent_position(first));
		// second steps onto first's anchor, first still owns it
		pathfinding.update_agent(second, 2, 2, 1, 1);
		assert_eq!(None, pathfinding.get_next_agent_position(second));
		pathfinding.remove_agent(first);
		assert_eq!(None, pathfinding.get_next_agent_position(first));
		// the tile was cleared rather than handed over
		assert!(!pathfinding.is_tile_occupied((2, 2)));
		assert_eq!(None, pathfinding.get_next_agent_position(second));
	}
	#[test]
	fn capacity_error_is_reported() {
		let settings = PathfindingSettings::default().with_max_agents(1);
		let mut pathfinding = FlowFieldPathfinding::from_layout(&WalkableLayout::open(2, 2), settings);
		assert!(pathfinding.register_agent().is_ok());
		assert!(matches!(
			pathfinding.register_agent(),
			Err(FlowFieldError::AgentCapacity { max: 1 })
		));
	}
	#[test]
	fn reinit_restamps_agents() {
		let mut pathfinding = open_pathfinding(4, 4);
		let id = pathfinding.register_agent().unwrap();
		pathfinding.update_agent(id, 1, 1, 2, 2);
		pathfinding.update((0, 0));
		pathfinding.init(WalkableLayout::open(6, 6).get());
		assert_eq!(6, pathfinding.get_width());
		assert!(!pathfinding.has_target());
		assert!(pathfinding.is_tile_occupied((2, 2)));
		assert!(!pathfinding.is_tile_occupied((3, 3)));
		pathfinding.update((0, 0));
		assert_eq!(Some(TilePosition::new(0, 0)), pathfinding.get_next_agent_position(id));
		// the agent's own footprint blocks it like any other
		pathfinding.update((5, 5));
		assert_ne!(Some(TilePosition::new(2, 2)), pathfinding.get_next_agent_position(id));
	}
	#[test]
	fn extreme_input_is_ignored() {
		let mut pathfinding = open_pathfinding(3, 3);
		let id = pathfinding.register_agent().unwrap();
		pathfinding.update_agent(id, 1, 1, 1, 1);
		pathfinding.update_agent(id, i32::MAX, 0, 2, 1);
		assert!(pathfinding.is_tile_occupied((1, 1)));
		pathfinding.update_agent(id, 0, 0, i32::MAX, 0);
		assert!(!pathfinding.is_tile_occupied((1, 1)));
		assert!(!pathfinding.is_tile_occupied((0, 0)));

		pathfinding.init(&[TilePosition::new(50000, 50000)]);
		assert_eq!(-1, pathfinding.get_width());
		assert_eq!(-1, pathfinding.get_height());
		pathfinding.update((0, 0));
		assert!(!pathfinding.has_target());
	}
	#[test]
	fn target_keeps_a_direction() {
		let mut pathfinding = open_pathfinding(5, 5);
		pathfinding.update((4, 4));
		assert_eq!(Direction::Left, pathfinding.get_tile_direction((4, 4)));
		assert_eq!((-1, 0), pathfinding.get_tile_offset((4, 4)));
		pathfinding.update((2, 2));
		assert_eq!(Direction::Left, pathfinding.get_tile_direction((2, 2)));
	}
	#[test]
	fn exact_solver_through_settings() {
		let settings = PathfindingSettings::default().with_solver(SolverMode::Exact);
		let mut pathfinding = FlowFieldPathfinding::from_layout(&WalkableLayout::open(5, 5), settings);
		pathfinding.update((4, 4));
		assert!((pathfinding.get_tile_distance((0, 0)) - 4.0 * SQRT_2).abs() < 0.0001);
		assert_eq!(Direction::BotRight, pathfinding.get_tile_direction((0, 0)));
	}
}
