//! Tunables of a [crate::prelude::FlowFieldPathfinding]
//!

use bevy::prelude::*;

use crate::prelude::*;

/// How the distance of each tile to the target gets calculated
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Reflect)]
pub enum SolverMode {
	/// Breadth-first expansion from the target through a FIFO queue. A tile is expanded once,
	/// when first discovered, and later cheaper paths only tighten its stored distance. Exact on
	/// open ground and cheap, but can leave a tile slightly over-costed when walls force the
	/// wave into unusual orderings
	#[default]
	Wavefront,
	/// Dijkstra through a min-priority queue keyed on tentative distance, tiles are re-queued
	/// whenever a cheaper path is found so every distance is the true shortest path
	Exact,
}

/// Configuration of the solver and the agent limits
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct PathfindingSettings {
	/// Algorithm used to produce tile distances
	solver: SolverMode,
	/// Hard limit on the number of agents that can be registered
	max_agents: usize,
	/// Largest footprint (`width * height`) an agent may occupy
	max_agent_area: i32,
}

impl Default for PathfindingSettings {
	fn default() -> Self {
		PathfindingSettings {
			solver: SolverMode::default(),
			max_agents: DEFAULT_MAX_AGENTS,
			max_agent_area: DEFAULT_MAX_AGENT_AREA,
		}
	}
}

impl PathfindingSettings {
	/// Create a new instance of [PathfindingSettings]
	pub fn new(solver: SolverMode, max_agents: usize, max_agent_area: i32) -> Self {
		PathfindingSettings {
			solver,
			max_agents,
			max_agent_area,
		}
	}
	/// Use a different [SolverMode]
	pub fn with_solver(mut self, solver: SolverMode) -> Self {
		self.solver = solver;
		self
	}
	/// Use a different agent limit
	pub fn with_max_agents(mut self, max_agents: usize) -> Self {
		self.max_agents = max_agents;
		self
	}
	/// Use a different footprint limit
	pub fn with_max_agent_area(mut self, max_agent_area: i32) -> Self {
		self.max_agent_area = max_agent_area;
		self
	}
	/// Integration solver in use
	pub fn get_solver(&self) -> SolverMode {
		self.solver
	}
	/// Number of agents that can be registered
	pub fn get_max_agents(&self) -> usize {
		self.max_agents
	}
	/// Largest footprint area accepted
	pub fn get_max_agent_area(&self) -> i32 {
		self.max_agent_area
	}
	/// Read [PathfindingSettings] from a `.ron` file, missing fields fall back to their defaults
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> FlowFieldResult<Self> {
		let file = std::fs::File::open(path)?;
		let settings: PathfindingSettings = ron::de::from_reader(file)?;
		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn default_settings() {
		let settings = PathfindingSettings::default();
		assert_eq!(SolverMode::Wavefront, settings.get_solver());
		assert_eq!(1000, settings.get_max_agents());
		assert_eq!(400, settings.get_max_agent_area());
	}
	#[test]
	fn builder_overrides() {
		let settings = PathfindingSettings::default()
			.with_solver(SolverMode::Exact)
			.with_max_agents(3)
			.with_max_agent_area(4);
		assert_eq!(PathfindingSettings::new(SolverMode::Exact, 3, 4), settings);
	}
	#[test]
	#[cfg(feature = "ron")]
	fn partial_ron_uses_defaults() {
		let settings: PathfindingSettings = ron::de::from_str("(solver: Exact)").unwrap();
		assert_eq!(SolverMode::Exact, settings.get_solver());
		assert_eq!(DEFAULT_MAX_AGENTS, settings.get_max_agents());
	}
}
