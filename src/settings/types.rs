use crate::build::{BuildOptions, DEFAULT_EXTENSION};
use crate::preprocess::PreprocessMode;
use serde::Deserialize;
use std::path::PathBuf;

/// Contents of a `.fr4metool.toml` file. Unset fields defer to the next
/// file in the cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
	/// Artifact extension, without the leading dot.
	pub extension: Option<String>,

	/// When to run the preprocessor.
	pub preprocess: Option<PreprocessMode>,

	/// If true, ~/.fr4metool.toml is not read.
	#[serde(default)]
	pub no_user_config: bool,
}

/// Settings with the path they were loaded from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
	pub settings: Settings,
	pub path: PathBuf,
}

/// Effective settings after merging the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
	pub extension: String,
	pub preprocess: PreprocessMode,

	/// Files that contributed, most specific first.
	pub sources: Vec<PathBuf>,
}

impl Default for ToolSettings {
	fn default() -> Self {
		ToolSettings {
			extension: DEFAULT_EXTENSION.to_string(),
			preprocess: PreprocessMode::default(),
			sources: Vec::new(),
		}
	}
}

impl ToolSettings {
	pub fn build_options(&self) -> BuildOptions {
		BuildOptions {
			mode: self.preprocess,
			extension: self.extension.clone(),
		}
	}
}
