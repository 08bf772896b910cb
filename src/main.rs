#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	const_format::concatcp,
	std::{
		error::Error,
		io::{self, BufWriter, Write},
		path::PathBuf,
		process::ExitCode,
	},
	tristar_xbin::{
		format::MAGIC,
		level::INVALID_NAME,
		stdoutRaw, DecodeOptions, DimensionPolicy, LevelData, Variant,
	},
};

#[derive(Parser)]
#[clap(about = concatcp!("Dumps a Kirby: Triple Deluxe ", MAGIC, " level as TOML"))]
struct Args {
	/// Level file to decode.
	path: PathBuf,

	/// Keep decoding when section sizes disagree.
	#[clap(long)]
	permissive: bool,

	/// TOML file with decode options.
	#[clap(long)]
	config: Option<PathBuf>,

	/// Print a short listing instead of the full TOML.
	#[clap(long)]
	summary: bool,
}

fn main() -> ExitCode {
	env_logger::init();
	match run(Args::parse()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			log::error!("{err}");
			ExitCode::FAILURE
		}
	}
}

fn run(Args { path, permissive, config, summary }: Args) -> Result<(), Box<dyn Error>> {
	let mut options = match config {
		Some(config) => DecodeOptions::load(config)?,
		None => DecodeOptions::default(),
	};
	if permissive {
		options.dimensionPolicy = DimensionPolicy::Permissive;
	}

	let mut level = LevelData::default();
	let variant = level.openFile(&path, &options).map_err(|err| format!("{}: {err}", path.display()))?;
	let stdout = &mut BufWriter::new(stdoutRaw());
	if summary {
		writeSummary(stdout, &level, variant)?;
	} else {
		stdout.write_all(toml::to_string_pretty(&level)?.as_bytes())?;
	}
	stdout.flush()?;
	Ok(())
}

fn writeSummary(out: &mut impl Write, level: &LevelData, variant: Variant) -> io::Result<()> {
	let height = level.height;
	writeln!(out, "layout {variant:?}, {}x{height} tiles", level.width)?;
	writeln!(out, "music {:?}", level.musicName)?;
	for enemy in &level.enemies {
		let name = level.enemyType(enemy).map_or(INVALID_NAME, |enemyType| enemyType.name.as_str());
		let at = enemy.tilePosition(height);
		writeln!(out, "enemy {:?} ({name}) at {}, {}", enemy.name, at.x, at.y)?;
	}
	for object in &level.objects {
		let name = level.objectName(object).unwrap_or(INVALID_NAME);
		let at = object.tilePosition(height);
		let state = if object.isEnabled() { "" } else { " (disabled)" };
		writeln!(out, "object {name} at {}, {}{state}", at.x, at.y)?;
	}
	for item in &level.items {
		let at = item.tilePosition(height);
		writeln!(out, "item {:?} at {}, {}", item.data, at.x, at.y)?;
	}
	Ok(())
}
