use {
	crate::{format::Section, reader::ByteOrder},
	std::io,
};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	/// A read or seek ran past the available bytes.
	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("not an XBIN container (magic {0:02X?})")]
	BadMagic([u8; 4]),

	#[error("unrecognized chunk layout ({byteOrder:?} byte order)")]
	UnrecognizedFormat { byteOrder: ByteOrder },

	#[error("{section} size mismatch: expected {expected:?}, found {found:?}")]
	DimensionMismatch { section: Section, expected: (u32, u32), found: (u32, u32) },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error(transparent)]
	Io(#[from] io::Error),

	#[error(transparent)]
	Toml(#[from] toml::de::Error),
}
