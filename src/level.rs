use {
	crate::{
		error::DecodeError,
		format::{self, Variant},
		options::DecodeOptions,
		reader::Reader,
		sections,
	},
	serde::{Deserialize, Serialize},
	std::{
		fs::File,
		io::{BufReader, Read, Seek},
		path::Path,
	},
};

pub const NUM_VISUAL_LAYERS: usize = 3;

/// `Tile::breakable` of a cell without a breakable block.
pub const NO_BREAKABLE: i16 = -1;

/// Shown by inspectors in place of a name whose index is out of range.
pub const INVALID_NAME: &str = "invalid";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualLayer {
	pub first: i16,
	pub second: u16,
}

impl VisualLayer {
	pub const ABSENT: Self = Self { first: -1, second: 0 };

	pub fn isPresent(self) -> bool {
		self.first >= 0
	}
}

impl Default for VisualLayer {
	fn default() -> Self {
		Self::ABSENT
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
	pub breakable: i16,
	pub collision: u32,
	pub visual: [VisualLayer; NUM_VISUAL_LAYERS],
}

impl Default for Tile {
	fn default() -> Self {
		Self { breakable: NO_BREAKABLE, collision: 0, visual: [VisualLayer::ABSENT; NUM_VISUAL_LAYERS] }
	}
}

/// Dense tile grid, top row first. Files store rows bottom to top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
	rows: Vec<Vec<Tile>>,
}

impl Grid {
	pub fn new(width: u32, height: u32) -> Self {
		let mut grid = Self::default();
		grid.allocate(width, height);
		grid
	}

	/// A grid with no cells has no rows either, whatever its other side claims.
	pub fn allocate(&mut self, width: u32, height: u32) {
		if width == 0 || height == 0 {
			self.rows = Vec::new();
			return;
		}
		self.rows = vec![vec![Tile::default(); width as _]; height as _];
	}

	/// Resizes every row to `width` cells, keeping what is already there.
	pub fn fitRows(&mut self, width: u32) {
		for row in &mut self.rows {
			row.resize(width as _, Tile::default());
		}
	}

	pub fn clear(&mut self) {
		self.rows.clear();
	}

	pub fn rows(&self) -> &[Vec<Tile>] {
		&self.rows
	}

	pub fn width(&self) -> usize {
		self.rows.first().map_or(0, Vec::len)
	}

	pub fn height(&self) -> usize {
		self.rows.len()
	}

	pub fn isEmpty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
		self.rows.get(y as usize)?.get(x as usize)
	}

	pub fn getMut(&mut self, x: u32, y: u32) -> Option<&mut Tile> {
		self.rows.get_mut(y as usize)?.get_mut(x as usize)
	}
}

/// Row index in memory of the `fileRow`-th row stored in a file.
pub fn fileRowToY(height: u32, fileRow: u32) -> u32 {
	height - 1 - fileRow
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
	pub name: String,
	pub spawnData: [i32; 3],

	/// Index into `LevelData::enemyTypes`, not checked against it.
	#[serde(rename = "type")]
	pub typeIndex: i32,

	pub x: i32,
	pub y: i32,
	pub trailingData: [i32; 2],
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyType {
	pub name: String,
	pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapObject {
	pub x: u32,
	pub y: u32,

	/// Index into `LevelData::objectNames`, not checked against it.
	#[serde(rename = "type")]
	pub typeIndex: u32,

	pub unknown: i32,
	pub enabled: i32,
	pub params: [i32; 8],
}

impl MapObject {
	pub fn isEnabled(&self) -> bool {
		self.enabled != 0
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
	pub data: [i32; 3],
	pub x: u32,
	pub y: u32,
	pub data2: u32,
}

/// Everything decoded from one level file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
	pub width: u32,
	pub height: u32,
	pub musicName: String,
	pub unknown1: u32,
	pub unknown2: u32,
	pub blocks: Grid,

	#[serde(rename = "enemy")]
	pub enemies: Vec<Enemy>,

	#[serde(rename = "enemyType")]
	pub enemyTypes: Vec<EnemyType>,

	#[serde(rename = "object")]
	pub objects: Vec<MapObject>,

	pub objectNames: Vec<String>,

	#[serde(rename = "item")]
	pub items: Vec<Item>,
}

impl LevelData {
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn isEmpty(&self) -> bool {
		*self == Self::default()
	}

	/// Decodes `stream` into `self` with the default options.
	///
	/// On any error `self` is left cleared.
	pub fn open<R: Read + Seek>(&mut self, stream: R) -> Result<Variant, DecodeError> {
		self.openWith(stream, &DecodeOptions::default())
	}

	pub fn openWith<R: Read + Seek>(&mut self, stream: R, options: &DecodeOptions) -> Result<Variant, DecodeError> {
		self.clear();
		let result = self.decode(stream, options);
		if result.is_err() {
			self.clear();
		}
		result
	}

	pub fn read<R: Read + Seek>(stream: R, options: &DecodeOptions) -> Result<Self, DecodeError> {
		let mut level = Self::default();
		level.openWith(stream, options)?;
		Ok(level)
	}

	/// Opens a file from disk, checking its magic before decoding.
	pub fn openFile(&mut self, path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Variant, DecodeError> {
		self.clear();
		let mut file = BufReader::new(File::open(path)?);
		format::checkMagic(&mut file)?;
		self.openWith(file, options)
	}

	fn decode<R: Read + Seek>(&mut self, mut stream: R, options: &DecodeOptions) -> Result<Variant, DecodeError> {
		let byteOrder = format::readByteOrder(&mut stream)?;
		let reader = &mut Reader::new(stream, byteOrder);
		let variant = Variant::detect(reader)?.ok_or(DecodeError::UnrecognizedFormat { byteOrder })?;
		log::info!("layout {variant:?}, {byteOrder:?} endian");
		for &(section, chunk) in variant.sections() {
			sections::readSection(reader, self, section, chunk, options)?;
		}
		Ok(variant)
	}

	/// Name of `object`'s type, if its index is in range.
	pub fn objectName(&self, object: &MapObject) -> Option<&str> {
		self.objectNames.get(object.typeIndex as usize).map(String::as_str)
	}

	pub fn enemyType(&self, enemy: &Enemy) -> Option<&EnemyType> {
		self.enemyTypes.get(usize::try_from(enemy.typeIndex).ok()?)
	}
}
