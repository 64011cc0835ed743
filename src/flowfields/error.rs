//! Errors produced while building a grid or managing agents.
//!
//! Most of the public surface of [crate::prelude::FlowFieldPathfinding] degrades to sentinel
//! values instead of erroring, these are reserved for the few things a caller genuinely needs
//! to react to
//!

use thiserror::Error;

use crate::prelude::*;

/// Errors produced by the pathfinder
#[derive(Debug, Error)]
pub enum FlowFieldError {
	/// Every agent id has been handed out
	#[error("agent capacity of {max} has been reached")]
	AgentCapacity {
		/// Configured number of agents
		max: usize,
	},

	/// The id was never handed out by the registry
	#[error("agent {0} has not been registered")]
	UnknownAgent(AgentId),

	/// The footprint covers more tiles than allowed
	#[error("footprint of {width}x{height} tiles exceeds the maximum area of {max_area}")]
	FootprintTooLarge {
		/// Columns requested
		width: i32,
		/// Rows requested
		height: i32,
		/// Configured largest area
		max_area: i32,
	},

	/// The far corner of the footprint can't be represented as a [TilePosition]
	#[error("footprint of {width}x{height} tiles at ({x}, {y}) reaches past the coordinate range")]
	FootprintOutOfRange {
		/// Anchor column
		x: i32,
		/// Anchor row
		y: i32,
		/// Columns requested
		width: i32,
		/// Rows requested
		height: i32,
	},

	/// Nothing in the layout can be walked on
	#[error("layout does not contain any walkable tiles")]
	EmptyLayout,

	/// Reading a layout or settings file failed
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A RON file couldn't be parsed
	#[cfg(feature = "ron")]
	#[error("RON error: {0}")]
	Ron(#[from] ron::error::SpannedError),

	/// A CSV file couldn't be parsed
	#[cfg(feature = "csv")]
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// A CSV cell isn't an 8-bit cost
	#[cfg(feature = "csv")]
	#[error("invalid cell value `{value}` at row {row}, column {column}")]
	InvalidCell {
		/// Zero-based row of the cell
		row: usize,
		/// Zero-based column of the cell
		column: usize,
		/// Raw text of the cell
		value: String,
	},

	/// The heightmap image couldn't be opened
	#[cfg(feature = "heightmap")]
	#[error("heightmap error: {0}")]
	Heightmap(String),
}

/// Result alias used throughout the crate
pub type FlowFieldResult<T> = Result<T, FlowFieldError>;
