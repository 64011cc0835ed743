//! Logic for rebuilding grids and recalculating the fields of a [FlowFieldPathfinding]
//!

use std::collections::BTreeMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Rebuild the grid of a field from a new layout, see [FlowFieldPathfinding::init]
#[derive(Event)]
pub struct EventInitGrid {
	/// Entity holding the [FlowFieldPathfinding]
	field: Entity,
	/// Walkable tiles of the new grid
	layout: WalkableLayout,
}

impl EventInitGrid {
	/// Create a new instance of [EventInitGrid]
	pub fn new(field: Entity, layout: WalkableLayout) -> Self {
		EventInitGrid { field, layout }
	}
	/// Entity holding the [FlowFieldPathfinding]
	pub fn get_field(&self) -> Entity {
		self.field
	}
	/// Walkable tiles of the new grid
	pub fn get_layout(&self) -> &WalkableLayout {
		&self.layout
	}
}

/// Point a field at a new target, see [FlowFieldPathfinding::update]
#[derive(Event)]
pub struct EventUpdateTarget {
	/// Entity holding the [FlowFieldPathfinding]
	field: Entity,
	/// Tile to flow towards
	target: TilePosition,
}

impl EventUpdateTarget {
	/// Create a new instance of [EventUpdateTarget]
	pub fn new(field: Entity, target: impl Into<TilePosition>) -> Self {
		EventUpdateTarget {
			field,
			target: target.into(),
		}
	}
	/// Entity holding the [FlowFieldPathfinding]
	pub fn get_field(&self) -> Entity {
		self.field
	}
	/// Tile to flow towards
	pub fn get_target(&self) -> TilePosition {
		self.target
	}
}

/// Read [EventInitGrid] and rebuild grids
#[cfg(not(tarpaulin_include))]
pub fn init_grids(
	mut events: EventReader<EventInitGrid>,
	mut fields: Query<&mut FlowFieldPathfinding>,
) {
	for event in events.read() {
		if let Ok(mut pathfinding) = fields.get_mut(event.get_field()) {
			pathfinding.init(event.get_layout().get());
		} else {
			warn!("Cannot init grid, entity {} has no FlowFieldPathfinding", event.get_field());
		}
	}
}

/// Read [EventUpdateTarget] and recalculate fields. Only the latest target sent to each field
/// in a frame is solved
pub fn update_targets(
	mut events: EventReader<EventUpdateTarget>,
	mut fields: Query<&mut FlowFieldPathfinding>,
) {
	// coalesce so a field is solved at most once per frame
	let mut latest = BTreeMap::new();
	for event in events.read() {
		latest.insert(event.get_field(), event.get_target());
	}
	for (field, target) in latest {
		match fields.get_mut(field) {
			Ok(mut pathfinding) => pathfinding.update(target),
			Err(_) => warn!("Cannot update target, entity {} has no FlowFieldPathfinding", field),
		}
	}
}
