use crate::catalog::{Module, ModuleCatalog};
use crate::descriptor::descriptor_path;
use crate::error::{ConfigError, IoError, Result, ToolError};
use crate::preprocess::{PreprocessMode, preprocess_concatenated, preprocess_module_files};
use std::path::PathBuf;
use tracing::{debug, info};

/// Artifact extension used when nothing else is configured.
pub const DEFAULT_EXTENSION: &str = "js";

/// Options for a build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
	pub mode: PreprocessMode,

	/// Extension of the artifact, without the leading dot.
	pub extension: String,
}

impl Default for BuildOptions {
	fn default() -> Self {
		BuildOptions {
			mode: PreprocessMode::default(),
			extension: DEFAULT_EXTENSION.to_string(),
		}
	}
}

/// Artifacts written by [`build`], in build order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
	pub artifacts: Vec<PathBuf>,
}

/// Outcome of [`clean`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
	/// Build directories that were deleted.
	pub removed: Vec<PathBuf>,

	/// Build directories left alone because they hold a descriptor.
	pub skipped: Vec<PathBuf>,
}

/// Build every buildable module of `catalog`, in catalog order.
///
/// The first failure stops the build. Artifacts already written are kept.
pub fn build(catalog: &ModuleCatalog, options: &BuildOptions) -> Result<BuildReport> {
	let mut report = BuildReport::default();

	for module in catalog.buildable() {
		let artifact = build_module(module, options).map_err(|e| e.in_module(&module.name))?;
		report.artifacts.push(artifact);
	}

	Ok(report)
}

/// Build one module and return the path of its artifact,
/// `<builddir>/<name>.<extension>`.
pub fn build_module(module: &Module, options: &BuildOptions) -> Result<PathBuf> {
	let Some(builddir) = module.builddir.as_ref() else {
		return Err(not_buildable(module));
	};

	std::fs::create_dir_all(builddir).map_err(|source| IoError::MkdirFailed {
		path: builddir.clone(),
		source,
	})?;

	let artifact_name = module.artifact_name(&options.extension);
	debug!(module = %module.name, mode = options.mode.as_str(), "building module");

	let module = match options.mode {
		PreprocessMode::PerFile => preprocess_module_files(module)?,
		PreprocessMode::Off | PreprocessMode::WholeModule => module.clone(),
	};

	let Some(files) = module.files.as_ref() else {
		return Err(not_buildable(&module));
	};

	let mut concatenated = files.concat()?;
	if options.mode == PreprocessMode::WholeModule {
		concatenated = preprocess_concatenated(&module, &concatenated, &artifact_name)?;
	}

	if let Some(prepend) = &module.prepend {
		concatenated.set_prepend(prepend);
	}
	if let Some(append) = &module.append {
		concatenated.set_append(append);
	}

	let path = concatenated.save(builddir, &artifact_name)?;
	info!(module = %module.name, artifact = %path.display(), "wrote artifact");

	Ok(path)
}

fn not_buildable(module: &Module) -> ToolError {
	ConfigError::MissingBuildDir {
		dir: module.path.clone(),
	}
	.into()
}

/// Modules to show: every module with `all`, otherwise only buildable ones.
pub fn list(catalog: &ModuleCatalog, all: bool) -> Vec<&Module> {
	if all {
		catalog.all().iter().collect()
	} else {
		catalog.buildable()
	}
}

/// Delete the build directory of every buildable module.
///
/// A build directory that contains a `fr4mebuild.json` is also a module
/// source root and is never deleted.
pub fn clean(catalog: &ModuleCatalog) -> Result<CleanReport> {
	let mut report = CleanReport::default();

	for module in catalog.buildable() {
		let Some(builddir) = module.builddir.as_ref() else {
			continue;
		};
		if !builddir.exists() {
			continue;
		}

		if descriptor_path(builddir).exists() {
			debug!(dir = %builddir.display(), "build directory holds a descriptor, skipped");
			report.skipped.push(builddir.clone());
			continue;
		}

		std::fs::remove_dir_all(builddir).map_err(|source| IoError::RemoveFailed {
			path: builddir.clone(),
			source,
		})?;
		debug!(dir = %builddir.display(), "removed build directory");
		report.removed.push(builddir.clone());
	}

	Ok(report)
}
