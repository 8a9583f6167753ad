use crate::catalog::Module;
use crate::error::{IoError, Result};
use crate::files::{Concatenated, FileSet, read_text, relative_path};
use crate::preprocess::engine::preprocess;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Directory under a module's builddir holding per-file preprocessed copies.
pub const PREPROCESSED_DIR: &str = "__preprocessed";

/// Stands in for `..` in the copy path of a file outside the module directory.
pub const PARENT_DIR_COPY: &str = "__parent__";

/// When the preprocessor runs during a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreprocessMode {
	/// No preprocessing.
	Off,

	/// Each source file in its own pass, before concatenation.
	#[default]
	PerFile,

	/// One pass over the concatenated sources.
	WholeModule,
}

impl PreprocessMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			PreprocessMode::Off => "off",
			PreprocessMode::PerFile => "per-file",
			PreprocessMode::WholeModule => "whole-module",
		}
	}
}

/// Preprocess every file of `module` independently.
///
/// Processed copies are written to
/// `<builddir>/__preprocessed/<module name>/<path relative to the module>`.
/// `..` segments become `__parent__`, so copies never leave that directory.
/// Returns a copy of the module whose file list points at those copies; a
/// module that is not buildable is returned unchanged.
pub fn preprocess_module_files(module: &Module) -> Result<Module> {
	let (Some(files), Some(builddir)) = (&module.files, &module.builddir) else {
		return Ok(module.clone());
	};

	let out_root = builddir.join(PREPROCESSED_DIR).join(&module.name);
	let mut processed = Vec::with_capacity(files.len());

	for source in files.paths() {
		let file_name = module.relative_file_name(source);
		let text = read_text(source)?;

		let output = preprocess(&module.name, &file_name, &text)?;
		debug!(
			module = %module.name,
			file = %file_name,
			lines = output.emitted_lines,
			"preprocessed file"
		);

		let target = copy_target(&out_root, module, source);
		write_copy(&target, &output.text)?;
		processed.push(target);
	}

	Ok(module.with_files(FileSet::new(processed)))
}

/// Preprocess the concatenated sources of `module` in a single pass.
///
/// `file_name` is seeded as `__FILE__`, normally the artifact name.
pub fn preprocess_concatenated(
	module: &Module,
	concatenated: &Concatenated,
	file_name: &str,
) -> Result<Concatenated> {
	let output = preprocess(&module.name, file_name, concatenated.text())?;
	debug!(
		module = %module.name,
		lines = output.emitted_lines,
		"preprocessed module"
	);

	Ok(Concatenated::new(&output.text))
}

/// Where the processed copy of `source` goes under `out_root`.
fn copy_target(out_root: &Path, module: &Module, source: &Path) -> PathBuf {
	let mut target = out_root.to_path_buf();

	for component in relative_path(&module.path, source).components() {
		match component {
			Component::ParentDir => target.push(PARENT_DIR_COPY),
			Component::Normal(part) => target.push(part),
			_ => {}
		}
	}

	target
}

fn write_copy(target: &Path, text: &str) -> Result<()> {
	if let Some(parent) = target.parent() {
		std::fs::create_dir_all(parent).map_err(|source| IoError::MkdirFailed {
			path: parent.to_path_buf(),
			source,
		})?;
	}

	std::fs::write(target, text).map_err(|source| IoError::WriteFailed {
		path: target.to_path_buf(),
		source,
	})?;

	Ok(())
}
