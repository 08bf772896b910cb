//! One decoder per section. Each seeks its own chunk before reading.

use {
	crate::{
		error::DecodeError,
		format::Section,
		level::{fileRowToY, Enemy, EnemyType, Grid, Item, LevelData, MapObject, Tile, VisualLayer, NO_BREAKABLE},
		options::{DecodeOptions, DimensionPolicy},
		reader::Reader,
	},
	core::mem::size_of,
	std::io::{self, Read, Seek},
};

pub fn readSection<R: Read + Seek>(
	reader: &mut Reader<R>,
	level: &mut LevelData,
	section: Section,
	chunk: u32,
	options: &DecodeOptions,
) -> Result<(), DecodeError> {
	log::trace!("reading {section} from chunk {chunk}");
	match section {
		Section::Breakable => readBreakable(reader, level, chunk),
		Section::Collision => readCollision(reader, level, chunk, options),
		Section::CollisionAlt => readCollisionAlt(reader, level, chunk),
		Section::Visual => readVisual(reader, level, chunk, options),
		Section::Enemies => readEnemies(reader, level, chunk),
		Section::EnemyTypes => readEnemyTypes(reader, level, chunk),
		Section::Music => readMusic(reader, level, chunk),
		Section::Objects => readObjects(reader, level, chunk),
		Section::Items => readItems(reader, level, chunk),
	}
}

/// Reads a grid's width and height, failing early unless the stream holds
/// all of its `cellSize`-byte cells.
fn readGridSize<R: Read + Seek>(reader: &mut Reader<R>, cellSize: usize) -> io::Result<(u32, u32)> {
	let (width, height) = (reader.readNum()?, reader.readNum()?);
	ensureRecords(reader, u64::from(width) * u64::from(height), cellSize)?;
	Ok((width, height))
}

fn checkDimensions(
	level: &LevelData,
	section: Section,
	found: (u32, u32),
	options: &DecodeOptions,
) -> Result<(), DecodeError> {
	let expected = (level.width, level.height);
	if found == expected {
		return Ok(());
	}
	match options.dimensionPolicy {
		DimensionPolicy::Strict => Err(DecodeError::DimensionMismatch { section, expected, found }),
		DimensionPolicy::Permissive => {
			log::warn!("{section} size mismatch: {expected:?} != {found:?}");
			Ok(())
		}
	}
}

/// Fails early when the stream cannot hold `count` records of `recordSize` bytes.
fn ensureRecords<R: Read + Seek>(reader: &mut Reader<R>, count: u64, recordSize: usize) -> io::Result<()> {
	reader.ensureRemaining(count.saturating_mul(recordSize as _))
}

/// Reads `width * height` cells in file order and stores each one in the grid.
/// Cells landing outside the grid are consumed and dropped.
fn fillGrid<R: Read + Seek, T>(
	reader: &mut Reader<R>,
	grid: &mut Grid,
	section: Section,
	(width, height): (u32, u32),
	mut readCell: impl FnMut(&mut Reader<R>) -> io::Result<T>,
	mut store: impl FnMut(&mut Tile, T),
) -> io::Result<()> {
	if width == 0 || height == 0 {
		return Ok(());
	}
	let mut dropped = 0_u64;
	for fileRow in 0..height {
		let y = fileRowToY(height, fileRow);
		for x in 0..width {
			let cell = readCell(reader)?;
			match grid.getMut(x, y) {
				Some(tile) => store(tile, cell),
				None => dropped += 1,
			}
		}
	}
	if dropped != 0 {
		log::debug!("{section}: dropped {dropped} cells outside the {}x{} grid", grid.width(), grid.height());
	}
	Ok(())
}

/// Establishes the level size for layouts A and B.
fn readBreakable<R: Read + Seek>(reader: &mut Reader<R>, level: &mut LevelData, chunk: u32) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	let (width, height) = readGridSize(reader, size_of::<i16>())?;
	(level.width, level.height) = (width, height);
	level.blocks.allocate(width, height);
	fillGrid(reader, &mut level.blocks, Section::Breakable, (width, height), Reader::readNum::<i16>, |tile, breakable| {
		tile.breakable = breakable;
	})?;
	Ok(())
}

fn readCollision<R: Read + Seek>(
	reader: &mut Reader<R>,
	level: &mut LevelData,
	chunk: u32,
	options: &DecodeOptions,
) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	reader.seekPointer()?;
	let dimensions = readGridSize(reader, size_of::<u32>())?;
	checkDimensions(level, Section::Collision, dimensions, options)?;
	fillGrid(reader, &mut level.blocks, Section::Collision, dimensions, Reader::readNum::<u32>, |tile, collision| {
		tile.collision = collision;
	})?;
	Ok(())
}

/// Layout C: no breakable section, so this one establishes the level size.
/// Only the top byte of each cell is the collision code.
fn readCollisionAlt<R: Read + Seek>(reader: &mut Reader<R>, level: &mut LevelData, chunk: u32) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	let leading = reader.readNum::<u32>()?;
	log::debug!("{} leading value = {leading:#X}", Section::CollisionAlt);
	reader.seekPointer()?;
	let (width, height) = readGridSize(reader, size_of::<i32>())?;
	(level.width, level.height) = (width, height);
	level.blocks.allocate(width, height);
	fillGrid(
		reader,
		&mut level.blocks,
		Section::CollisionAlt,
		(width, height),
		Reader::readNum::<i32>,
		|tile, cell| {
			tile.collision = (cell >> 24) as _;
			tile.breakable = NO_BREAKABLE;
		},
	)?;
	Ok(())
}

impl VisualLayer {
	pub fn read<R: Read + Seek>(reader: &mut Reader<R>) -> io::Result<Self> {
		Ok(Self { first: reader.readNum()?, second: reader.readNum()? })
	}
}

fn readVisual<R: Read + Seek>(
	reader: &mut Reader<R>,
	level: &mut LevelData,
	chunk: u32,
	options: &DecodeOptions,
) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	level.unknown1 = reader.readNum()?;
	level.unknown2 = reader.readNum()?;
	log::debug!("{} unknown1 = {:#X} unknown2 = {:#X}", Section::Visual, level.unknown1, level.unknown2);
	let pointers: [u32; 3] = [reader.readNum()?, reader.readNum()?, reader.readNum()?];
	for (layer, pointer) in pointers.into_iter().enumerate() {
		reader.seekTo(pointer.into())?;
		let dimensions = readGridSize(reader, size_of::<VisualLayer>())?;
		checkDimensions(level, Section::Visual, dimensions, options)?;
		level.blocks.fitRows(level.width);
		fillGrid(reader, &mut level.blocks, Section::Visual, dimensions, VisualLayer::read, |tile, visual| {
			tile.visual[layer] = visual;
		})?;
	}
	Ok(())
}

impl Enemy {
	/// Name pointer followed by eight 32-bit fields.
	pub const RECORD_SIZE: usize = 9 * 4;

	pub fn read<R: Read + Seek>(reader: &mut Reader<R>) -> io::Result<Self> {
		Ok(Self {
			name: reader.readPointedString()?,
			spawnData: [reader.readNum()?, reader.readNum()?, reader.readNum()?],
			typeIndex: reader.readNum()?,
			x: reader.readNum()?,
			y: reader.readNum()?,
			trailingData: [reader.readNum()?, reader.readNum()?],
		})
	}
}

impl EnemyType {
	pub const RECORD_SIZE: usize = 2 * 4;

	pub fn read<R: Read + Seek>(reader: &mut Reader<R>) -> io::Result<Self> {
		let (namePointer, statePointer) = (reader.readNum()?, reader.readNum()?);
		Ok(Self { name: reader.readStringAt(namePointer)?, state: reader.readStringAt(statePointer)? })
	}
}

impl MapObject {
	pub const RECORD_SIZE: usize = 13 * 4;

	pub fn read<R: Read + Seek>(reader: &mut Reader<R>) -> io::Result<Self> {
		Ok(Self {
			x: reader.readNum()?,
			y: reader.readNum()?,
			typeIndex: reader.readNum()?,
			unknown: reader.readNum()?,
			enabled: reader.readNum()?,
			params: {
				let mut params = [0_i32; 8];
				for param in &mut params {
					*param = reader.readNum()?;
				}
				params
			},
		})
	}
}

impl Item {
	pub const RECORD_SIZE: usize = 6 * 4;

	pub fn read<R: Read + Seek>(reader: &mut Reader<R>) -> io::Result<Self> {
		Ok(Self {
			data: [reader.readNum()?, reader.readNum()?, reader.readNum()?],
			x: reader.readNum()?,
			y: reader.readNum()?,
			data2: reader.readNum()?,
		})
	}
}

/// Reads a 32-bit count followed by that many fixed-size records.
fn readList<R: Read + Seek, T>(
	reader: &mut Reader<R>,
	recordSize: usize,
	mut readRecord: impl FnMut(&mut Reader<R>) -> io::Result<T>,
) -> io::Result<Vec<T>> {
	let count = reader.readNum::<u32>()?;
	ensureRecords(reader, count.into(), recordSize)?;
	let mut records = Vec::with_capacity(count as _);
	for _ in 0..count {
		records.push(readRecord(reader)?);
	}
	Ok(records)
}

fn readEnemies<R: Read + Seek>(reader: &mut Reader<R>, level: &mut LevelData, chunk: u32) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	level.enemies = readList(reader, Enemy::RECORD_SIZE, Enemy::read)?;
	Ok(())
}

fn readEnemyTypes<R: Read + Seek>(reader: &mut Reader<R>, level: &mut LevelData, chunk: u32) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	level.enemyTypes = readList(reader, EnemyType::RECORD_SIZE, EnemyType::read)?;
	Ok(())
}

fn readMusic<R: Read + Seek>(reader: &mut Reader<R>, level: &mut LevelData, chunk: u32) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	reader.seekPointer()?;
	level.musicName = reader.readString()?;
	Ok(())
}

fn readObjects<R: Read + Seek>(reader: &mut Reader<R>, level: &mut LevelData, chunk: u32) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	let (objectsPointer, namesPointer) = (reader.readNum::<u32>()?, reader.readNum::<u32>()?);
	reader.seekTo(objectsPointer.into())?;
	level.objects = readList(reader, MapObject::RECORD_SIZE, MapObject::read)?;
	reader.seekTo(namesPointer.into())?;
	level.objectNames = readList(reader, size_of::<u32>(), Reader::readPointedString)?;
	Ok(())
}

fn readItems<R: Read + Seek>(reader: &mut Reader<R>, level: &mut LevelData, chunk: u32) -> Result<(), DecodeError> {
	reader.seekChunk(chunk)?;
	level.items = readList(reader, Item::RECORD_SIZE, Item::read)?;
	Ok(())
}
