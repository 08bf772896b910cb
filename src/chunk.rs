//! Chunk table: absolute section offsets stored at a fixed place in the header.

use {
	crate::reader::Reader,
	std::io::{self, Read, Seek},
};

pub const CHUNK_TABLE_OFFSET: u64 = 0x14;

impl<R: Read + Seek> Reader<R> {
	pub fn chunkOffset(&mut self, id: u32) -> io::Result<u32> {
		self.seekTo(CHUNK_TABLE_OFFSET + 4 * u64::from(id))?;
		self.readNum()
	}

	pub fn seekChunk(&mut self, id: u32) -> io::Result<u32> {
		let offset = self.chunkOffset(id)?;
		self.seekTo(offset.into())?;
		Ok(offset)
	}

	/// Reads a pointer field and jumps to where it points.
	pub fn seekPointer(&mut self) -> io::Result<u32> {
		let pointer = self.readNum()?;
		self.seekTo(u64::from(pointer))?;
		Ok(pointer)
	}
}
