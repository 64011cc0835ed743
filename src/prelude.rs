//! `use bevy_flowfield_pathfinding::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::flowfields::{
	agents::*, error::*, fields::*, grid::*, layout::*, pathfinding::*, settings::*,
	utilities::*,
};

#[doc(hidden)]
pub use crate::plugin::{agent_layer::*, field_layer::*, *};
