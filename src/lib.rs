//! Single-target FlowField pathfinding over a tile grid, with agent footprints that steer the
//! field around each other. Usable as a plain struct or driven through the Bevy plugin
//!

pub mod flowfields;
pub mod plugin;

pub mod prelude;
