#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	std::{
		collections::HashMap,
		io::{self, BufRead, BufWriter, Write},
	},
	tristar_xbin::{level::INVALID_NAME, stdoutRaw, DecodeOptions, LevelData},
};

fn main() -> io::Result<()> {
	env_logger::init();
	let (stdin, stdout, path, level, hashMap) = &mut (
		io::stdin().lock(),
		BufWriter::new(stdoutRaw()),
		String::new(),
		LevelData::default(),
		HashMap::<String, usize>::new(),
	);
	let options = DecodeOptions::default();
	while {
		path.clear();
		stdin.read_line(path)? != 0
	} {
		let path = path.trim_end_matches(['\n', '\r']);
		if let Err(err) = level.openFile(path, &options) {
			log::warn!("{path}: {err}");
			continue;
		}
		for object in &level.objects {
			let name = level.objectName(object).unwrap_or(INVALID_NAME);
			*hashMap.entry(name.to_owned()).or_default() += 1;
		}
	}
	let mut names = Vec::from_iter(hashMap.keys()).into_boxed_slice();
	names.sort_by_key(|&name| (hashMap[name], name));
	for &name in names.iter() {
		writeln!(stdout, "{name}\t{}", hashMap[name])?;
	}
	stdout.flush()
}
