//! Logic for handling agents through events, each event names the field entity holding the
//! [FlowFieldPathfinding] it applies to
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Ties an entity to the agent it was registered as
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct FlowFieldAgent {
	/// Entity holding the [FlowFieldPathfinding] the agent belongs to
	field: Entity,
	/// Id handed out by the field
	id: AgentId,
}

impl FlowFieldAgent {
	/// Create a new instance of [FlowFieldAgent]
	pub fn new(field: Entity, id: AgentId) -> Self {
		FlowFieldAgent { field, id }
	}
	/// Entity holding the [FlowFieldPathfinding]
	pub fn get_field(&self) -> Entity {
		self.field
	}
	/// Id of the agent within its field
	pub fn get_id(&self) -> AgentId {
		self.id
	}
}

/// Register `agent` with the field, once processed the agent entity gets a [FlowFieldAgent]
#[derive(Event)]
pub struct EventRegisterAgent {
	/// Entity holding the [FlowFieldPathfinding]
	field: Entity,
	/// Entity to receive the [FlowFieldAgent]
	agent: Entity,
}

impl EventRegisterAgent {
	/// Create a new instance of [EventRegisterAgent]
	pub fn new(field: Entity, agent: Entity) -> Self {
		EventRegisterAgent { field, agent }
	}
	/// Entity holding the [FlowFieldPathfinding]
	pub fn get_field(&self) -> Entity {
		self.field
	}
	/// Entity to receive the [FlowFieldAgent]
	pub fn get_agent(&self) -> Entity {
		self.agent
	}
}

/// Move an agent's footprint, see [FlowFieldPathfinding::update_agent]
#[derive(Event)]
pub struct EventPlaceAgent {
	/// Entity holding the [FlowFieldPathfinding]
	field: Entity,
	/// Agent to move
	id: AgentId,
	/// Where the agent now stands
	footprint: Footprint,
}

impl EventPlaceAgent {
	/// Create a new instance of [EventPlaceAgent]
	pub fn new(field: Entity, id: AgentId, footprint: Footprint) -> Self {
		EventPlaceAgent {
			field,
			id,
			footprint,
		}
	}
	/// Build the event from the [FlowFieldAgent] of an entity
	pub fn from_agent(agent: &FlowFieldAgent, footprint: Footprint) -> Self {
		EventPlaceAgent::new(agent.get_field(), agent.get_id(), footprint)
	}
	/// Entity holding the [FlowFieldPathfinding]
	pub fn get_field(&self) -> Entity {
		self.field
	}
	/// Id of the agent within its field
	pub fn get_id(&self) -> AgentId {
		self.id
	}
	/// Where the agent now stands
	pub fn get_footprint(&self) -> Footprint {
		self.footprint
	}
}

/// Lift an agent's footprint off the grid, see [FlowFieldPathfinding::remove_agent]
#[derive(Event)]
pub struct EventRemoveAgent {
	/// Entity holding the [FlowFieldPathfinding]
	field: Entity,
	/// Agent to remove
	id: AgentId,
}

impl EventRemoveAgent {
	/// Create a new instance of [EventRemoveAgent]
	pub fn new(field: Entity, id: AgentId) -> Self {
		EventRemoveAgent { field, id }
	}
	/// Entity holding the [FlowFieldPathfinding]
	pub fn get_field(&self) -> Entity {
		self.field
	}
	/// Id of the agent within its field
	pub fn get_id(&self) -> AgentId {
		self.id
	}
}

/// Read [EventRegisterAgent] and hand out agent ids
pub fn register_agents(
	mut events: EventReader<EventRegisterAgent>,
	mut fields: Query<&mut FlowFieldPathfinding>,
	mut commands: Commands,
) {
	for event in events.read() {
		let Ok(mut pathfinding) = fields.get_mut(event.get_field()) else {
			warn!(
				"Cannot register agent {}, entity {} has no FlowFieldPathfinding",
				event.get_agent(),
				event.get_field()
			);
			continue;
		};
		match pathfinding.register_agent() {
			Ok(id) => match commands.get_entity(event.get_agent()) {
				Ok(mut agent) => {
					agent.insert(FlowFieldAgent::new(event.get_field(), id));
				}
				Err(e) => warn!("Registered agent {} without an entity: {}", id, e),
			},
			Err(e) => warn!("Cannot register agent {}: {}", event.get_agent(), e),
		}
	}
}

/// Read [EventPlaceAgent] and move footprints
pub fn place_agents(
	mut events: EventReader<EventPlaceAgent>,
	mut fields: Query<&mut FlowFieldPathfinding>,
) {
	for event in events.read() {
		if let Ok(mut pathfinding) = fields.get_mut(event.get_field()) {
			let footprint = event.get_footprint();
			let (x, y) = footprint.get_position().get_xy();
			pathfinding.update_agent(
				event.get_id(),
				x,
				y,
				footprint.get_width(),
				footprint.get_height(),
			);
		} else {
			debug!("Ignoring placement of agent {}, no field", event.get_id());
		}
	}
}

/// Read [EventRemoveAgent] and lift footprints
pub fn remove_agents(
	mut events: EventReader<EventRemoveAgent>,
	mut fields: Query<&mut FlowFieldPathfinding>,
) {
	for event in events.read() {
		if let Ok(mut pathfinding) = fields.get_mut(event.get_field()) {
			pathfinding.remove_agent(event.get_id());
		}
	}
}
