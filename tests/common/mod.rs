#![allow(dead_code)]

//! Builds synthetic XBIN files by running each section decoder in reverse.

use {
	byteorder::{WriteBytesExt, BE, LE},
	tristar_xbin::{
		chunk::CHUNK_TABLE_OFFSET,
		format::{BIG_ENDIAN_MARKER, MAGIC, SENTINEL},
		level::{fileRowToY, Enemy, EnemyType, Grid, Item, MapObject, Tile, VisualLayer, NUM_VISUAL_LAYERS},
		ByteOrder, LevelData, Section, Variant,
	},
};

pub struct XbinWriter {
	bytes: Vec<u8>,
	byteOrder: ByteOrder,
}

macro_rules! put {
	( $( $name: ident => $method: ident ( $type: ty ) ),* $(,)? ) => {$(
		pub fn $name(&mut self, value: $type) {
			(match self.byteOrder {
				ByteOrder::Little => self.bytes.$method::<LE>(value),
				ByteOrder::Big => self.bytes.$method::<BE>(value),
			})
			.unwrap();
		}
	)*};
}

impl XbinWriter {
	pub fn new(byteOrder: ByteOrder, numSlots: u32) -> Self {
		let mut bytes = MAGIC.as_bytes().to_vec();
		bytes.extend_from_slice(match byteOrder {
			ByteOrder::Big => &BIG_ENDIAN_MARKER,
			ByteOrder::Little => &[0x34, 0x12],
		});
		bytes.resize(CHUNK_TABLE_OFFSET as usize + 4 * numSlots as usize, 0);
		Self { bytes, byteOrder }
	}

	put! { u16 => write_u16(u16), i16 => write_i16(i16), u32 => write_u32(u32), i32 => write_i32(i32) }

	pub fn position(&self) -> u32 {
		self.bytes.len() as _
	}

	pub fn patch(&mut self, at: u32, value: u32) {
		let at = at as usize;
		let mut field = &mut self.bytes[at..at + 4];
		(match self.byteOrder {
			ByteOrder::Little => field.write_u32::<LE>(value),
			ByteOrder::Big => field.write_u32::<BE>(value),
		})
		.unwrap();
	}

	pub fn setSlot(&mut self, id: u32, value: u32) {
		self.patch(CHUNK_TABLE_OFFSET as u32 + 4 * id, value);
	}

	/// Starts chunk `id` at the current end of the file.
	pub fn beginChunk(&mut self, id: u32) {
		self.setSlot(id, self.position());
	}

	/// Writes a placeholder pointer, returning where to patch it.
	pub fn reservePointer(&mut self) -> u32 {
		let at = self.position();
		self.u32(0);
		at
	}

	/// Points the pointer at `at` to the current end of the file.
	pub fn pointHere(&mut self, at: u32) {
		self.patch(at, self.position());
	}

	pub fn string(&mut self, text: &str) {
		self.u32(text.len() as _);
		self.bytes.extend_from_slice(text.as_bytes());
	}

	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}

	fn grid(&mut self, level: &LevelData, mut cell: impl FnMut(&mut Self, &Tile)) {
		self.u32(level.width);
		self.u32(level.height);
		for fileRow in 0..level.height {
			let y = fileRowToY(level.height, fileRow);
			for x in 0..level.width {
				cell(self, level.blocks.get(x, y).unwrap());
			}
		}
	}

	fn breakable(&mut self, level: &LevelData) {
		self.grid(level, |writer, tile| writer.i16(tile.breakable));
	}

	fn collision(&mut self, level: &LevelData) {
		let body = self.reservePointer();
		self.pointHere(body);
		self.grid(level, |writer, tile| writer.u32(tile.collision));
	}

	fn collisionAlt(&mut self, level: &LevelData) {
		self.u32(0xDEAD_BEEF);
		let body = self.reservePointer();
		self.pointHere(body);
		self.grid(level, |writer, tile| writer.i32(((tile.collision as i32) << 24) | 0x0012_3456));
	}

	fn visual(&mut self, level: &LevelData) {
		self.u32(level.unknown1);
		self.u32(level.unknown2);
		let bodies = [(); NUM_VISUAL_LAYERS].map(|()| self.reservePointer());
		for (layer, body) in bodies.into_iter().enumerate() {
			self.pointHere(body);
			self.grid(level, |writer, tile| {
				writer.i16(tile.visual[layer].first);
				writer.u16(tile.visual[layer].second);
			});
		}
	}

	fn enemies(&mut self, enemies: &[Enemy]) {
		self.u32(enemies.len() as _);
		let mut names = Vec::new();
		for enemy in enemies {
			names.push(self.reservePointer());
			for value in enemy.spawnData {
				self.i32(value);
			}
			self.i32(enemy.typeIndex);
			self.i32(enemy.x);
			self.i32(enemy.y);
			for value in enemy.trailingData {
				self.i32(value);
			}
		}
		for (at, enemy) in names.into_iter().zip(enemies) {
			self.pointHere(at);
			self.string(&enemy.name);
		}
	}

	fn enemyTypes(&mut self, enemyTypes: &[EnemyType]) {
		self.u32(enemyTypes.len() as _);
		let pointers = enemyTypes.iter().map(|_| [self.reservePointer(), self.reservePointer()]).collect::<Vec<_>>();
		// states first, so the two strings of a record are not adjacent
		for ([_, state], enemyType) in pointers.iter().zip(enemyTypes) {
			self.pointHere(*state);
			self.string(&enemyType.state);
		}
		for ([name, _], enemyType) in pointers.iter().zip(enemyTypes) {
			self.pointHere(*name);
			self.string(&enemyType.name);
		}
	}

	fn music(&mut self, musicName: &str) {
		let body = self.reservePointer();
		self.pointHere(body);
		self.string(musicName);
	}

	fn objects(&mut self, objects: &[MapObject], objectNames: &[String]) {
		let (list, names) = (self.reservePointer(), self.reservePointer());
		self.pointHere(list);
		self.u32(objects.len() as _);
		for object in objects {
			self.u32(object.x);
			self.u32(object.y);
			self.u32(object.typeIndex);
			self.i32(object.unknown);
			self.i32(object.enabled);
			for param in object.params {
				self.i32(param);
			}
		}
		self.pointHere(names);
		self.u32(objectNames.len() as _);
		let pointers = objectNames.iter().map(|_| self.reservePointer()).collect::<Vec<_>>();
		for (at, name) in pointers.into_iter().zip(objectNames) {
			self.pointHere(at);
			self.string(name);
		}
	}

	fn items(&mut self, items: &[Item]) {
		self.u32(items.len() as _);
		for item in items {
			for value in item.data {
				self.i32(value);
			}
			self.u32(item.x);
			self.u32(item.y);
			self.u32(item.data2);
		}
	}
}

/// Encodes `level` in the given layout.
pub fn encode(level: &LevelData, variant: Variant, byteOrder: ByteOrder) -> Vec<u8> {
	let mut writer = XbinWriter::new(byteOrder, variant.sentinelSlot() + 1);
	writer.setSlot(variant.sentinelSlot(), SENTINEL);
	for &(section, chunk) in variant.sections() {
		writer.beginChunk(chunk);
		match section {
			Section::Breakable => writer.breakable(level),
			Section::Collision => writer.collision(level),
			Section::CollisionAlt => writer.collisionAlt(level),
			Section::Visual => writer.visual(level),
			Section::Enemies => writer.enemies(&level.enemies),
			Section::EnemyTypes => writer.enemyTypes(&level.enemyTypes),
			Section::Music => writer.music(&level.musicName),
			Section::Objects => writer.objects(&level.objects, &level.objectNames),
			Section::Items => writer.items(&level.items),
		}
	}
	writer.finish()
}

/// A 3x2 level holding what `variant` can carry.
pub fn sampleLevel(variant: Variant) -> LevelData {
	let (width, height) = (3, 2);
	let mut blocks = Grid::new(width, height);
	for y in 0..height {
		for x in 0..width {
			let tile = blocks.getMut(x, y).unwrap();
			let seed = (y * width + x) as i16;
			tile.breakable = if variant == Variant::C || seed == 4 { -1 } else { seed + 10 };
			tile.collision = (x * 3 + y) as u32 + 1;
			for (layer, visual) in tile.visual.iter_mut().enumerate() {
				*visual = if seed == layer as i16 {
					VisualLayer::ABSENT
				} else {
					VisualLayer { first: seed + 100 * layer as i16, second: 0x8000 + y as u16 }
				};
			}
		}
	}
	let mut level = LevelData { width, height, blocks, unknown1: 0x0001_0002, unknown2: 0xFFFF_0000, ..LevelData::default() };
	if variant == Variant::C {
		return level;
	}
	level.musicName = "BGM_FINE_FIELDS".to_owned();
	level.objectNames = vec!["Door".to_owned(), "Warp Star".to_owned()];
	level.objects = vec![
		MapObject { x: 16, y: 32, typeIndex: 1, unknown: -1, enabled: 1, params: [1, 2, 3, 4, 5, 6, 7, 8] },
		MapObject { x: 40, y: 8, typeIndex: 5, unknown: 0, enabled: 0, params: [-8; 8] },
	];
	if variant == Variant::B {
		return level;
	}
	level.enemies = vec![
		Enemy {
			name: "Waddle Dee".to_owned(),
			spawnData: [1, -2, 3],
			typeIndex: 0,
			x: 24,
			y: 16,
			trailingData: [7, -7],
		},
		Enemy { name: "Gordo".to_owned(), spawnData: [0; 3], typeIndex: 3, x: -4, y: 0, trailingData: [0, 1] },
	];
	level.enemyTypes = vec![
		EnemyType { name: "WaddleDee".to_owned(), state: "Walk".to_owned() },
		EnemyType { name: "Gordo".to_owned(), state: "".to_owned() },
	];
	level.items = vec![Item { data: [1, 0, -1], x: 8, y: 24, data2: 0xFFFF_FFFF }];
	level
}
