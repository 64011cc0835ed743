//! A [WalkableLayout] is the list of tile positions an agent can stand on. It's the input used
//! to size and build a [crate::prelude::TileGrid], every position missing from it becomes a wall.
//!
//! Layouts can be built by hand or, behind features, read from disk:
//!
//! * `ron` - a serialised list of `(x: i32, y: i32)` positions
//! * `csv` - a grid of 8-bit costs in the style of a cost field, `255` marks a wall and any
//! other value is walkable. Each line is a row
//! * `heightmap` - a greyscale image where pure black pixels are walls
//!

use bevy::prelude::*;

use crate::prelude::*;

/// Cost value marking an impassable cell in `csv` and `heightmap` sources
#[cfg(any(feature = "csv", feature = "heightmap"))]
const IMPASSABLE: u8 = 255;

/// Positions that can be walked on, everything else in their bounding box becomes a wall once
/// a [TileGrid] is built from them
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct WalkableLayout(
	/// Walkable positions, duplicates are harmless
	Vec<TilePosition>,
);

impl WalkableLayout {
	/// Create a new instance of [WalkableLayout]
	pub fn new(positions: Vec<TilePosition>) -> Self {
		WalkableLayout(positions)
	}
	/// Every tile of a `width` by `height` rectangle is walkable
	pub fn open(width: i32, height: i32) -> Self {
		let mut positions = Vec::new();
		for y in 0..height {
			for x in 0..width {
				positions.push(TilePosition::new(x, y));
			}
		}
		WalkableLayout(positions)
	}
	/// Get the walkable positions
	pub fn get(&self) -> &[TilePosition] {
		&self.0
	}
	/// Mark another position as walkable
	pub fn push(&mut self, position: TilePosition) {
		self.0.push(position);
	}
	/// Remove every occurrence of `position`, turning it into a wall once built
	pub fn remove(&mut self, position: TilePosition) {
		self.0.retain(|p| *p != position);
	}
	/// Number of positions listed
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether no position is listed
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Read a serialised [WalkableLayout] from a `.ron` file
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> FlowFieldResult<Self> {
		let file = std::fs::File::open(path)?;
		let layout: WalkableLayout = ron::de::from_reader(file)?;
		if layout.is_empty() {
			return Err(FlowFieldError::EmptyLayout);
		}
		Ok(layout)
	}
	/// Read a grid of costs from a CSV file without headers, each record is a row of the grid
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> FlowFieldResult<Self> {
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.flexible(true)
			.from_path(path)?;
		let mut positions = Vec::new();
		for (row, record) in rdr.records().enumerate() {
			let record = record?;
			for (column, value) in record.iter().enumerate() {
				let cost = value
					.trim()
					.parse::<u8>()
					.map_err(|_| FlowFieldError::InvalidCell {
						row,
						column,
						value: value.to_string(),
					})?;
				if cost != IMPASSABLE {
					positions.push(TilePosition::new(column as i32, row as i32));
				}
			}
		}
		if positions.is_empty() {
			return Err(FlowFieldError::EmptyLayout);
		}
		Ok(WalkableLayout(positions))
	}
	/// Read a greyscale image where each pixel is a tile. The colour is treated like a cost, white
	/// being the cheapest, and only pure black pixels become walls
	#[cfg(feature = "heightmap")]
	pub fn from_heightmap(path: &str) -> FlowFieldResult<Self> {
		use photon_rs::native::open_image;
		let img = open_image(path).map_err(|e| FlowFieldError::Heightmap(e.to_string()))?;
		let img_width = img.get_width() as usize;
		let img_height = img.get_height() as usize;
		let raw_pixels = img.get_raw_pixels();
		// raw pixels come from the top left in sets of RGB or RGBA
		let chunk_size = if raw_pixels.len() == img_width * img_height * 4 {
			4
		} else {
			3
		};
		let mut positions = Vec::new();
		for (i, px) in raw_pixels.chunks(chunk_size).enumerate() {
			if px.len() < 3 {
				return Err(FlowFieldError::Heightmap(format!(
					"truncated pixel data at pixel {}",
					i
				)));
			}
			// careful of u8 overflow
			let colour_avg = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
			let cost = 255 - colour_avg as u8;
			if cost != IMPASSABLE {
				positions.push(TilePosition::new(
					(i % img_width) as i32,
					(i / img_width) as i32,
				));
			}
		}
		if positions.is_empty() {
			return Err(FlowFieldError::EmptyLayout);
		}
		Ok(WalkableLayout(positions))
	}
}

impl From<Vec<(i32, i32)>> for WalkableLayout {
	fn from(value: Vec<(i32, i32)>) -> Self {
		WalkableLayout(value.into_iter().map(TilePosition::from).collect())
	}
}

impl FromIterator<TilePosition> for WalkableLayout {
	fn from_iter<I: IntoIterator<Item = TilePosition>>(iter: I) -> Self {
		WalkableLayout(iter.into_iter().collect())
	}
}
