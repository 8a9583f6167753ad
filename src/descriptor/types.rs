use serde::Deserialize;
use std::path::PathBuf;

/// Top-level contents of a `fr4mebuild.json` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Descriptor {
	/// Module name. Required on every descriptor.
	pub name: Option<String>,

	/// Build instructions. A descriptor without them only groups nested modules.
	pub build: Option<BuildSection>,
}

/// The `build` object of a descriptor. All paths are relative to the
/// descriptor's directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSection {
	/// Source files, concatenated in this order.
	pub files: Option<Vec<PathBuf>>,

	/// Output directory. Required when `files` is set.
	pub builddir: Option<PathBuf>,

	/// Text file written before the concatenated sources.
	pub prepend: Option<PathBuf>,

	/// Text file written after the concatenated sources.
	pub append: Option<PathBuf>,

	/// Directories holding nested descriptors, resolved in this order.
	pub modules: Option<Vec<PathBuf>>,
}

impl Descriptor {
	/// The module name, treating an empty string as missing.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref().filter(|name| !name.is_empty())
	}
}

impl BuildSection {
	/// The build directory, treating an empty path as missing.
	pub fn builddir(&self) -> Option<&PathBuf> {
		self.builddir
			.as_ref()
			.filter(|dir| !dir.as_os_str().is_empty())
	}
}
