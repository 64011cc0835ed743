//! Defines the Bevy [Plugin] for FlowFieldPathfinding.
//!
//! An entity carrying a [FlowFieldPathfinding] component is a field. Events addressed to the
//! field entity register, move and remove agents, rebuild the grid and set the target. Agent
//! events are always applied before field events within a frame, so a field recalculated in a
//! frame sees every agent moved in that frame
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod agent_layer;
pub mod field_layer;

/// Order in which the events of a frame get applied
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum PathfindingSet {
	/// Register, place and remove agents
	Agents,
	/// Rebuild grids and recalculate fields
	Field,
}

/// Registers the pathfinding types, events and systems
pub struct FlowFieldPathfindingPlugin;

impl Plugin for FlowFieldPathfindingPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<TilePosition>()
			.register_type::<Direction>()
			.register_type::<SolverMode>()
			.register_type::<PathfindingSettings>()
			.register_type::<AgentId>()
			.register_type::<FlowFieldAgent>()
			.register_type::<FlowFieldPathfinding>()
			.add_event::<agent_layer::EventRegisterAgent>()
			.add_event::<agent_layer::EventPlaceAgent>()
			.add_event::<agent_layer::EventRemoveAgent>()
			.add_event::<field_layer::EventInitGrid>()
			.add_event::<field_layer::EventUpdateTarget>()
			.configure_sets(Update, (PathfindingSet::Agents, PathfindingSet::Field).chain())
			.add_systems(
				Update,
				(
					(
						agent_layer::register_agents,
						agent_layer::place_agents,
						agent_layer::remove_agents,
					)
						.chain()
						.in_set(PathfindingSet::Agents),
					(field_layer::init_grids, field_layer::update_targets)
						.chain()
						.in_set(PathfindingSet::Field),
				),
			);
	}
}
