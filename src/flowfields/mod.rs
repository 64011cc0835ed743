//! Flowfields are a means of handling pathfinding for a crowd of agents sharing one destination.
//! Rather than every agent searching for its own path, a single pass over the map works out the
//! best direction to move in from every tile and the agents simply read the tile they stand on.
//!
//! [Fixing Pathfinding Once and For All](https://web.archive.org/web/20150905073624/http://www.ai-blog.net/archives/000152.html)
//!
//! [jdxdev](https://www.jdxdev.com/blog/2020/05/03/flowfields/)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! The map is a single [grid::TileGrid] built from the list of walkable tiles, everything else
//! is a wall. Tiles are indexed from the top-left corner, `x` grows to the right and `y` grows
//! downwards.
//!
//! Definitions:
//!
//! * Tile - a cell of the grid, either a wall or walkable, which stores the results of the
//! latest solve and which agent (if any) is covering it
//! * Integration field - the distance from every reachable tile to the target. Orthogonal steps
//! cost `1` and diagonal steps cost `√2`
//! * Flow field - the direction each tile points in, towards its cheapest neighbour that isn't
//! covered by an agent
//!
//! ```text
//!  _____________________________
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|██|__|__|__|
//! |__|__|__|__|__|__|██|__|__|__|
//! |__|__|AA|AA|__|__|██|__|__|__|
//! |__|__|AA|AA|__|__|██|__|T_|__|
//! |__|__|__|__|__|__|██|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! ```
//!
//! * Agent - an actor with a rectangular footprint (`A`) following the field towards the
//! target (`T`). Walls (`█`) and other agents are routed around
//!

pub mod agents;
pub mod error;
pub mod fields;
pub mod grid;
pub mod layout;
pub mod pathfinding;
pub mod settings;
pub mod utilities;
