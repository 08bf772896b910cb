use {
	crate::error::ConfigError,
	serde::{Deserialize, Serialize},
	std::{fs, path::Path},
};

/// What to do when a section declares a grid size different from the one
/// established by the first grid section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionPolicy {
	/// Fail the decode.
	#[default]
	Strict,

	/// Log a warning and fill the grid with the section's own size; cells
	/// falling outside the grid are read and dropped.
	Permissive,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
	pub dimensionPolicy: DimensionPolicy,
}

impl DecodeOptions {
	pub fn permissive() -> Self {
		Self { dimensionPolicy: DimensionPolicy::Permissive }
	}

	pub fn fromToml(toml: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(toml)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		Self::fromToml(&fs::read_to_string(path)?)
	}
}
