//! Agents are the actors following the flow field. Each one claims a rectangular footprint of
//! tiles, the top-left tile of the footprint being its anchor:
//!
//! ```text
//!  _______________________
//! |     |     |     |     |
//! |  A  |  a  |     |     |
//! |_____|_____|_____|_____|
//! |     |     |     |     |
//! |  a  |  a  |     |     |
//! |_____|_____|_____|_____|
//! ```
//!
//! Tiles under a footprint are marked as occupied in the [TileGrid] and the flow field steers
//! other agents around them. A tile is only ever owned by one agent, when footprints overlap
//! the agent that got there first keeps it.
//!
//! Ids are handed out sequentially from `0` up to a fixed limit and never reused. Removing an
//! agent only lifts its footprint off the grid, the id stays valid and the agent can be placed
//! again.
//!

use bevy::prelude::*;

use crate::prelude::*;

/// Identifies a registered agent
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Reflect)]
pub struct AgentId(
	/// Slot in the [AgentRegistry]
	usize,
);

impl AgentId {
	/// Create a new instance of [AgentId]
	pub fn new(id: usize) -> Self {
		AgentId(id)
	}
	/// Get the raw index
	pub fn get(&self) -> usize {
		self.0
	}
}

impl std::fmt::Display for AgentId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Rectangle of tiles covered by an agent, `position` is the top-left (anchor) tile
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub struct Footprint {
	/// Anchor tile
	position: TilePosition,
	/// Number of columns covered
	width: i32,
	/// Number of rows covered
	height: i32,
}

impl Footprint {
	/// Create a new instance of [Footprint]
	pub fn new(position: TilePosition, width: i32, height: i32) -> Self {
		Footprint {
			position,
			width,
			height,
		}
	}
	/// Anchor tile
	pub fn get_position(&self) -> TilePosition {
		self.position
	}
	/// Number of columns covered
	pub fn get_width(&self) -> i32 {
		self.width
	}
	/// Number of rows covered
	pub fn get_height(&self) -> i32 {
		self.height
	}
	/// Number of tiles covered, `0` for a degenerate rectangle
	pub fn get_area(&self) -> i32 {
		self.width.max(0).saturating_mul(self.height.max(0))
	}
	/// Whether every covered tile has a representable position. A footprint covering nothing
	/// always is
	pub fn is_addressable(&self) -> bool {
		self.get_area() == 0
			|| self
				.position
				.checked_offset(self.width - 1, self.height - 1)
				.is_some()
	}
	/// Every position covered by the footprint, some of which may sit outside of a grid.
	/// Positions that can't be represented are left out
	pub fn get_positions(&self) -> Vec<TilePosition> {
		let mut positions = Vec::new();
		if self.get_area() == 0 {
			return positions;
		}
		for ix in 0..self.width {
			for iy in 0..self.height {
				if let Some(position) = self.position.checked_offset(ix, iy) {
					positions.push(position);
				}
			}
		}
		positions
	}
}

/// State of one registered agent
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub struct Agent {
	/// Where the agent stands, [None] until it has been placed or after removal
	footprint: Option<Footprint>,
}

impl Agent {
	/// Where the agent stands
	pub fn get_footprint(&self) -> Option<Footprint> {
		self.footprint
	}
	/// Whether the agent currently stands on the grid
	pub fn is_placed(&self) -> bool {
		self.footprint.is_some()
	}
}

/// Fixed capacity table of agents indexed by [AgentId]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct AgentRegistry {
	/// Agents in id order
	agents: Vec<Agent>,
	/// Hard limit on the number of agents
	max_agents: usize,
	/// Largest footprint area accepted
	max_agent_area: i32,
}

impl Default for AgentRegistry {
	fn default() -> Self {
		AgentRegistry::new(DEFAULT_MAX_AGENTS, DEFAULT_MAX_AGENT_AREA)
	}
}

impl AgentRegistry {
	/// Create a new instance of [AgentRegistry]
	pub fn new(max_agents: usize, max_agent_area: i32) -> Self {
		AgentRegistry {
			agents: Vec::new(),
			max_agents,
			max_agent_area,
		}
	}
	/// Number of registered agents
	pub fn len(&self) -> usize {
		self.agents.len()
	}
	/// Whether no agent has been registered yet
	pub fn is_empty(&self) -> bool {
		self.agents.is_empty()
	}
	/// Hard limit on the number of agents
	pub fn get_max_agents(&self) -> usize {
		self.max_agents
	}
	/// Get an agent, [None] if the id was never handed out
	pub fn get_agent(&self, id: AgentId) -> Option<&Agent> {
		self.agents.get(id.get())
	}
	/// Iterate over every registered agent with its id
	pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent)> {
		self.agents
			.iter()
			.enumerate()
			.map(|(i, agent)| (AgentId::new(i), agent))
	}
	/// Hand out the next id. Fails once the capacity has been used up
	pub fn register(&mut self) -> FlowFieldResult<AgentId> {
		if self.agents.len() >= self.max_agents {
			return Err(FlowFieldError::AgentCapacity {
				max: self.max_agents,
			});
		}
		let id = AgentId::new(self.agents.len());
		self.agents.push(Agent::default());
		trace!("Registered agent {}", id);
		Ok(id)
	}
	/// Move an agent to a new footprint. Its old footprint is lifted off the `grid` and the new
	/// one is stamped onto any walkable tile that nobody else owns. A negative `x` marks the
	/// agent as not placed and nothing gets stamped.
	///
	/// Oversized footprints and footprints whose far corner overflows the coordinate range are
	/// rejected and the agent keeps its old footprint
	pub fn place(
		&mut self,
		grid: &mut TileGrid,
		id: AgentId,
		footprint: Footprint,
	) -> FlowFieldResult<()> {
		if footprint.get_area() > self.max_agent_area {
			return Err(FlowFieldError::FootprintTooLarge {
				width: footprint.get_width(),
				height: footprint.get_height(),
				max_area: self.max_agent_area,
			});
		}
		if !footprint.is_addressable() {
			let (x, y) = footprint.get_position().get_xy();
			return Err(FlowFieldError::FootprintOutOfRange {
				x,
				y,
				width: footprint.get_width(),
				height: footprint.get_height(),
			});
		}
		self.remove(grid, id)?;
		let agent = self
			.agents
			.get_mut(id.get())
			.ok_or(FlowFieldError::UnknownAgent(id))?;
		if footprint.get_position().get_x() < 0 {
			agent.footprint = None;
			return Ok(());
		}
		agent.footprint = Some(footprint);
		set_agent_tiles(grid, &footprint, None, Some(id));
		Ok(())
	}
	/// Lift an agent's footprint off the `grid`. Removing an agent that isn't placed does nothing
	pub fn remove(&mut self, grid: &mut TileGrid, id: AgentId) -> FlowFieldResult<()> {
		let agent = self
			.agents
			.get_mut(id.get())
			.ok_or(FlowFieldError::UnknownAgent(id))?;
		if let Some(footprint) = agent.footprint.take() {
			set_agent_tiles(grid, &footprint, Some(id), None);
		}
		Ok(())
	}
	/// Stamp every placed agent onto a freshly built `grid`, in id order
	pub fn restamp(&self, grid: &mut TileGrid) {
		for (id, agent) in self.iter() {
			if let Some(footprint) = agent.get_footprint() {
				set_agent_tiles(grid, &footprint, None, Some(id));
			}
		}
	}
	/// The tile an agent should step onto next according to the flow field under its anchor.
	///
	/// [None] when the agent is unknown or not placed, when its anchor is outside of the grid
	/// or on a wall, or when the anchor tile isn't owned by the agent (another footprint got
	/// there first). An agent whose tile points nowhere gets its own anchor back
	pub fn next_position(&self, grid: &TileGrid, id: AgentId) -> Option<TilePosition> {
		let footprint = self.get_agent(id)?.get_footprint()?;
		let anchor = footprint.get_position();
		let tile = grid.get_tile(anchor)?;
		if tile.is_wall() || tile.get_occupied_by() != Some(id) {
			return None;
		}
		let (dx, dy) = tile.get_offset();
		Some(anchor.offset(dx, dy))
	}
}

/// Hand every tile of a footprint currently owned by `from` over to `to`. Tiles outside of the
/// grid and walls are left alone
fn set_agent_tiles(
	grid: &mut TileGrid,
	footprint: &Footprint,
	from: Option<AgentId>,
	to: Option<AgentId>,
) {
	for position in footprint.get_positions() {
		if let Some(tile) = grid.get_tile_mut(position) {
			if !tile.is_wall() && tile.get_occupied_by() == from {
				tile.set_occupied_by(to);
			}
		}
	}
}
