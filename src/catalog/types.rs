use crate::files::{FileSet, relative_path};
use std::path::{Component, Path, PathBuf};

/// A module resolved from one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
	/// Name from the descriptor, also the artifact's base name.
	pub name: String,

	/// Absolute directory holding the descriptor.
	pub path: PathBuf,

	/// Absolute build directory.
	pub builddir: Option<PathBuf>,

	/// Source files with absolute paths.
	pub files: Option<FileSet>,

	/// Contents of the prepend file.
	pub prepend: Option<String>,

	/// Contents of the append file.
	pub append: Option<String>,
}

impl Module {
	/// A module can be built when it has both files and a build directory.
	pub fn is_buildable(&self) -> bool {
		self.files.is_some() && self.builddir.is_some()
	}

	/// A copy of this module whose sources are `files`.
	pub fn with_files(&self, files: FileSet) -> Module {
		Module {
			files: Some(files),
			..self.clone()
		}
	}

	/// File name of the artifact produced for this module.
	pub fn artifact_name(&self, extension: &str) -> String {
		format!("{}.{}", self.name, extension)
	}

	/// Path of `file` relative to the module directory, using `/` separators.
	///
	/// `..` and `.` components are resolved lexically. Files outside the
	/// module directory fall back to their file name.
	pub fn relative_file_name(&self, file: &Path) -> String {
		let relative = relative_path(&self.path, file);
		let inside = relative
			.components()
			.all(|c| matches!(c, Component::Normal(_)));

		let relative = if inside {
			relative
		} else {
			file.file_name().map(PathBuf::from).unwrap_or_default()
		};

		relative
			.components()
			.map(|c| c.as_os_str().to_string_lossy())
			.collect::<Vec<_>>()
			.join("/")
	}
}

/// All modules of a descriptor tree, in depth-first pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleCatalog {
	modules: Vec<Module>,
}

impl ModuleCatalog {
	pub fn new(modules: Vec<Module>) -> Self {
		ModuleCatalog { modules }
	}

	/// Every resolved module.
	pub fn all(&self) -> &[Module] {
		&self.modules
	}

	/// Only the modules that can be built, in catalog order.
	pub fn buildable(&self) -> Vec<&Module> {
		self.modules.iter().filter(|m| m.is_buildable()).collect()
	}

	pub fn len(&self) -> usize {
		self.modules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.modules.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn module(name: &str, files: Option<FileSet>, builddir: Option<&str>) -> Module {
		Module {
			name: name.to_string(),
			path: PathBuf::from("/project").join(name),
			builddir: builddir.map(PathBuf::from),
			files,
			prepend: None,
			append: None,
		}
	}

	#[test]
	fn test_buildable_filters_incomplete_modules() {
		let catalog = ModuleCatalog::new(vec![
			module("app", Some(FileSet::default()), Some("/project/app/dist")),
			module("group", None, None),
		]);

		let buildable = catalog.buildable();
		assert_eq!(buildable.len(), 1);
		assert_eq!(buildable[0].name, "app");
		assert_eq!(catalog.all().len(), 2);
	}

	#[test]
	fn test_buildable_requires_builddir() {
		let catalog = ModuleCatalog::new(vec![
			module("a", Some(FileSet::default()), None),
			module("b", None, Some("/project/b/dist")),
		]);

		assert!(catalog.buildable().is_empty());
	}

	#[test]
	fn test_with_files_leaves_original_untouched() {
		let original = module(
			"app",
			Some(FileSet::new(vec![PathBuf::from("/project/app/a.js")])),
			Some("/project/app/dist"),
		);
		let copy = original.with_files(FileSet::new(vec![PathBuf::from("/tmp/a.js")]));

		assert_eq!(
			original.files.as_ref().unwrap().paths(),
			&[PathBuf::from("/project/app/a.js")]
		);
		assert_eq!(copy.files.unwrap().paths(), &[PathBuf::from("/tmp/a.js")]);
		assert_eq!(copy.name, original.name);
	}

	#[test]
	fn test_relative_file_name() {
		let m = module("app", None, None);

		assert_eq!(
			m.relative_file_name(Path::new("/project/app/src/main.js")),
			"src/main.js"
		);
		assert_eq!(m.relative_file_name(Path::new("/elsewhere/util.js")), "util.js");
	}

	#[test]
	fn test_relative_file_name_resolves_parent_components() {
		let m = module("app", None, None);

		assert_eq!(
			m.relative_file_name(Path::new("/project/app/src/../lib/a.js")),
			"lib/a.js"
		);
		assert_eq!(
			m.relative_file_name(Path::new("/project/app/../../../a.js")),
			"a.js"
		);
		assert_eq!(m.relative_file_name(Path::new("/project/shared/b.js")), "b.js");
	}

	#[test]
	fn test_artifact_name() {
		let m = module("app", None, None);
		assert_eq!(m.artifact_name("js"), "app.js");
	}
}
