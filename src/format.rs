//! Container header and layout detection.
//!
//! The format has no version field. Which of the three known layouts a file
//! uses is told only by where [`SENTINEL`] sits in the chunk table, so the
//! probes run in a fixed order: A, then B, then C.

use {
	crate::{error::DecodeError, reader::ByteOrder, reader::Reader},
	core::fmt,
	serde::{Deserialize, Serialize},
	std::io::{self, Read, Seek, SeekFrom},
};

pub const MAGIC: &str = "XBIN";
pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x12, 0x34];
pub const SENTINEL: u32 = 0x1234_5678;

const MARKER_OFFSET: u64 = 4;

pub fn checkMagic<R: Read + Seek>(stream: &mut R) -> Result<(), DecodeError> {
	let mut magic = [0; 4];
	stream.seek(SeekFrom::Start(0))?;
	stream.read_exact(&mut magic)?;
	if magic != MAGIC.as_bytes() {
		return Err(DecodeError::BadMagic(magic));
	}
	Ok(())
}

pub fn readByteOrder<R: Read + Seek>(stream: &mut R) -> io::Result<ByteOrder> {
	let mut marker = [0; 2];
	stream.seek(SeekFrom::Start(MARKER_OFFSET))?;
	stream.read_exact(&mut marker)?;
	Ok(ByteOrder::fromMarker(marker))
}

impl ByteOrder {
	pub fn fromMarker(marker: [u8; 2]) -> Self {
		if marker == BIG_ENDIAN_MARKER {
			ByteOrder::Big
		} else {
			ByteOrder::Little
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
	Breakable,
	Collision,
	/// Collision packed into the top byte of each cell, carrying the grid size.
	CollisionAlt,
	Visual,
	Enemies,
	EnemyTypes,
	Music,
	Objects,
	Items,
}

impl fmt::Display for Section {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Section::Breakable => "breakable",
			Section::Collision => "collision",
			Section::CollisionAlt => "collision (alt)",
			Section::Visual => "visual",
			Section::Enemies => "enemies",
			Section::EnemyTypes => "enemy types",
			Section::Music => "music",
			Section::Objects => "objects",
			Section::Items => "items",
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
	A,
	B,
	C,
}

impl Variant {
	/// Sections of this layout with their chunk ids, in decode order.
	pub const fn sections(self) -> &'static [(Section, u32)] {
		match self {
			Variant::A => &[
				(Section::Breakable, 0),
				(Section::Collision, 2),
				(Section::Visual, 3),
				(Section::Enemies, 4),
				(Section::EnemyTypes, 5),
				(Section::Music, 6),
				(Section::Objects, 7),
				(Section::Items, 8),
			],
			Variant::B => &[
				(Section::Breakable, 0),
				(Section::Collision, 1),
				(Section::Visual, 2),
				(Section::Music, 3),
				(Section::Objects, 4),
			],
			Variant::C => &[(Section::CollisionAlt, 2), (Section::Visual, 4)],
		}
	}

	/// Chunk slot holding [`SENTINEL`] in files of this layout.
	pub const fn sentinelSlot(self) -> u32 {
		match self {
			Variant::A | Variant::C => 9,
			Variant::B => 5,
		}
	}

	pub fn detect<R: Read + Seek>(reader: &mut Reader<R>) -> io::Result<Option<Self>> {
		let byteOrder = reader.byteOrder();
		let mut holdsSentinel = |variant: Variant| -> io::Result<bool> {
			Ok(reader.chunkOffset(variant.sentinelSlot())? == SENTINEL)
		};
		Ok(match byteOrder {
			ByteOrder::Little if holdsSentinel(Variant::A)? => Some(Variant::A),
			ByteOrder::Little if holdsSentinel(Variant::B)? => Some(Variant::B),
			ByteOrder::Big if holdsSentinel(Variant::C)? => Some(Variant::C),
			_ => None,
		})
	}
}
