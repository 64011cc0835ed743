//! Runs the plugin without a window: agents register through events, step along the field each
//! frame and the field is recalculated around their new positions
//!

use bevy::{log::LogPlugin, prelude::*};
use bevy_flowfield_pathfinding::prelude::*;
use demo_utils::{layout_from_ascii, log_directions};

/// Walkable map, `#` is a wall
const MAP: &str = "
	..........
	.######...
	......#...
	..#...#...
	..#.......
";

/// Where the crowd is heading
const TARGET: (i32, i32) = (9, 4);

/// Marks the entity holding the field
#[derive(Component)]
struct Map;

/// Where an agent currently stands and whether the field knows about it yet
#[derive(Component)]
struct Walker {
	/// Anchor tile of the agent
	position: TilePosition,
	/// Whether a placement has been sent
	placed: bool,
}

/// Run thirty frames and print the final field
fn main() {
	let mut app = App::new();
	app.add_plugins((LogPlugin::default(), FlowFieldPathfindingPlugin))
		.add_systems(Startup, setup)
		.add_systems(Update, walk.after(PathfindingSet::Field));
	for _ in 0..30 {
		app.update();
	}
	let world = app.world_mut();
	let mut maps = world.query_filtered::<&FlowFieldPathfinding, With<Map>>();
	if let Ok(pathfinding) = maps.single(world) {
		log_directions(pathfinding);
	}
}

/// Spawn the field and the crowd, ask for every walker to be registered
fn setup(
	mut commands: Commands,
	mut register: EventWriter<EventRegisterAgent>,
	mut target: EventWriter<EventUpdateTarget>,
) {
	let pathfinding =
		FlowFieldPathfinding::from_layout(&layout_from_ascii(MAP), PathfindingSettings::default());
	let field = commands.spawn((Map, pathfinding)).id();
	for (x, y) in [(0, 0), (1, 0), (0, 2), (0, 4), (1, 4)] {
		let walker = commands
			.spawn(Walker {
				position: TilePosition::new(x, y),
				placed: false,
			})
			.id();
		register.write(EventRegisterAgent::new(field, walker));
	}
	target.write(EventUpdateTarget::new(field, TARGET));
}

/// Step every walker along the field, the next frame applies the moves and re-solves
fn walk(
	mut walkers: Query<(&FlowFieldAgent, &mut Walker)>,
	fields: Query<(Entity, &FlowFieldPathfinding), With<Map>>,
	mut place: EventWriter<EventPlaceAgent>,
	mut target: EventWriter<EventUpdateTarget>,
) {
	let Ok((field, pathfinding)) = fields.single() else {
		return;
	};
	let mut moved = false;
	for (agent, mut walker) in walkers.iter_mut() {
		// arrived, the target tile would send it back out again
		if walker.placed && walker.position == TilePosition::from(TARGET) {
			continue;
		}
		let owns_anchor = pathfinding
			.get_grid()
			.get_tile(walker.position)
			.and_then(|tile| tile.get_occupied_by())
			== Some(agent.get_id());
		// an agent that lost its anchor to another footprint keeps asking for it back
		if walker.placed && owns_anchor {
			match pathfinding.get_next_agent_position(agent.get_id()) {
				Some(next) if next != walker.position => walker.position = next,
				_ => continue,
			}
		}
		walker.placed = true;
		moved = true;
		debug!("Agent {} heading to {}", agent.get_id(), walker.position);
		place.write(EventPlaceAgent::from_agent(
			agent,
			Footprint::new(walker.position, 1, 1),
		));
	}
	if moved {
		target.write(EventUpdateTarget::new(field, TARGET));
	}
}
