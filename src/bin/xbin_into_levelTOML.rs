#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	std::{
		error::Error,
		io::{self, Write},
	},
	tristar_xbin::{format, readToVec, stdoutRaw, DecodeOptions, LevelData},
};

fn main() -> Result<(), Box<dyn Error>> {
	#[derive(Parser)]
	struct Args {
		#[clap(long)]
		permissive: bool,
	}
	let Args { permissive } = Args::parse();
	env_logger::init();

	let cursor = &mut io::Cursor::new(readToVec(io::stdin())?);
	format::checkMagic(cursor)?;
	let options = if permissive { DecodeOptions::permissive() } else { DecodeOptions::default() };
	let level = LevelData::read(cursor, &options)?;
	log::info!("{}x{} tiles, {} objects", level.width, level.height, level.objects.len());
	stdoutRaw().write_all(toml::to_string_pretty(&level)?.as_bytes())?;
	Ok(())
}
