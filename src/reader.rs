use {
	byteorder::{ReadBytesExt, BE, LE},
	serde::{Deserialize, Serialize},
	std::io::{self, Read, Seek, SeekFrom},
};

/// Byte order of every numeric field in one file, fixed once by its header marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteOrder {
	#[default]
	Little,
	Big,
}

/// Fixed-width integers the format stores.
pub trait Num: Sized {
	fn read<B: byteorder::ByteOrder>(reader: &mut impl Read) -> io::Result<Self>;
}

macro_rules! implNum {
	( $( $type: ty => $method: ident ),* $(,)? ) => {$(
		impl Num for $type {
			#[inline]
			fn read<B: byteorder::ByteOrder>(reader: &mut impl Read) -> io::Result<Self> {
				reader.$method::<B>()
			}
		}
	)*};
}

implNum! { u16 => read_u16, i16 => read_i16, u32 => read_u32, i32 => read_i32 }

/// Seekable cursor over one file, carrying that file's byte order.
pub struct Reader<R> {
	inner: R,
	byteOrder: ByteOrder,
}

impl<R: Read + Seek> Reader<R> {
	pub fn new(inner: R, byteOrder: ByteOrder) -> Self {
		Self { inner, byteOrder }
	}

	pub fn byteOrder(&self) -> ByteOrder {
		self.byteOrder
	}

	#[must_use]
	pub fn withByteOrder(self, byteOrder: ByteOrder) -> Self {
		Self { byteOrder, ..self }
	}

	#[inline]
	pub fn readNum<T: Num>(&mut self) -> io::Result<T> {
		match self.byteOrder {
			ByteOrder::Little => T::read::<LE>(&mut self.inner),
			ByteOrder::Big => T::read::<BE>(&mut self.inner),
		}
	}

	/// Reads exactly `len` bytes. A bogus length fails at the end of the stream
	/// instead of allocating up front.
	pub fn readBytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
		let mut bytes = Vec::new();
		(&mut self.inner).take(len as _).read_to_end(&mut bytes)?;
		if bytes.len() < len {
			return Err(io::Error::new(
				io::ErrorKind::UnexpectedEof,
				format!("{len} bytes requested, {} available", bytes.len()),
			));
		}
		Ok(bytes)
	}

	pub fn position(&mut self) -> io::Result<u64> {
		self.inner.stream_position()
	}

	pub fn seekTo(&mut self, offset: u64) -> io::Result<()> {
		self.inner.seek(SeekFrom::Start(offset)).map(drop)
	}

	/// Fails unless at least `len` bytes follow the cursor.
	pub fn ensureRemaining(&mut self, len: u64) -> io::Result<()> {
		let position = self.position()?;
		let end = self.inner.seek(SeekFrom::End(0))?;
		self.seekTo(position)?;
		let available = end.saturating_sub(position);
		if available < len {
			return Err(io::Error::new(
				io::ErrorKind::UnexpectedEof,
				format!("{len} bytes needed at {position:#X}, {available} available"),
			));
		}
		Ok(())
	}

	/// Runs `f`, then puts the cursor back where it was, whether `f` succeeded or not.
	pub fn restoring<T, E: From<io::Error>>(
		&mut self,
		f: impl FnOnce(&mut Self) -> Result<T, E>,
	) -> Result<T, E> {
		let position = self.position()?;
		let result = f(self);
		let restored = self.seekTo(position);
		let value = result?;
		restored?;
		Ok(value)
	}

	/// Length-prefixed text at the cursor: a 32-bit length, then that many bytes.
	pub fn readString(&mut self) -> io::Result<String> {
		let len = self.readNum::<u32>()?;
		Ok(String::from_utf8_lossy(&self.readBytes(len as _)?).into_owned())
	}

	pub fn readStringAt(&mut self, pointer: u32) -> io::Result<String> {
		self.restoring(|reader| {
			reader.seekTo(pointer.into())?;
			reader.readString()
		})
	}

	/// Reads a pointer field and the string it points to; the cursor ends up
	/// right after the pointer field.
	pub fn readPointedString(&mut self) -> io::Result<String> {
		let pointer = self.readNum::<u32>()?;
		self.readStringAt(pointer)
	}
}
