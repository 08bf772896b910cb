#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

//! Decoder for the chunk-indexed `XBIN` level files of Kirby: Triple Deluxe.

pub mod chunk;
pub mod coords;
pub mod error;
pub mod format;
pub mod level;
pub mod options;
pub mod reader;
pub mod sections;

pub use {
	error::{ConfigError, DecodeError},
	format::{Section, Variant},
	level::LevelData,
	options::{DecodeOptions, DimensionPolicy},
	reader::{ByteOrder, Reader},
};

use std::{
	fs::File,
	io::{self, Read},
};

pub fn readToVec(mut reader: impl Read) -> io::Result<Vec<u8>> {
	let mut vec = Vec::new();
	reader.read_to_end(&mut vec)?;
	Ok(vec)
}

/// Unbuffered, unlocked stdout.
#[cfg(unix)]
pub fn stdoutRaw() -> File {
	use std::os::unix::io::FromRawFd;
	unsafe { File::from_raw_fd(1) }
}

#[cfg(windows)]
pub fn stdoutRaw() -> File {
	use std::os::windows::io::{AsRawHandle, FromRawHandle};
	unsafe { File::from_raw_handle(io::stdout().as_raw_handle()) }
}
