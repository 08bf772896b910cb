//! Entity positions are stored in sixteenths of a tile with Y pointing up;
//! the grid is indexed top row first.

use {
	crate::level::{Enemy, Item, MapObject},
	glam::Vec2,
};

pub const SUBUNITS_PER_TILE: f32 = 16.0;

/// Converts a file-space position to tile units with Y pointing down.
pub fn fileToTile(position: Vec2, levelHeight: u32) -> Vec2 {
	Vec2::new(position.x / SUBUNITS_PER_TILE, levelHeight as f32 - position.y / SUBUNITS_PER_TILE)
}

impl Enemy {
	pub fn tilePosition(&self, levelHeight: u32) -> Vec2 {
		fileToTile(Vec2::new(self.x as _, self.y as _), levelHeight)
	}
}

impl MapObject {
	pub fn tilePosition(&self, levelHeight: u32) -> Vec2 {
		fileToTile(Vec2::new(self.x as _, self.y as _), levelHeight)
	}
}

impl Item {
	pub fn tilePosition(&self, levelHeight: u32) -> Vec2 {
		fileToTile(Vec2::new(self.x as _, self.y as _), levelHeight)
	}
}
