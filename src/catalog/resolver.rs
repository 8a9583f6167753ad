use crate::catalog::types::{Module, ModuleCatalog};
use crate::descriptor::{BuildSection, load_descriptor};
use crate::error::{ConfigError, Result};
use crate::files::{FileSet, read_text};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve the descriptor tree rooted at `root_dir` into a module catalog.
///
/// Modules are recorded in depth-first pre-order: a descriptor's own module
/// comes before the modules listed in its `build.modules`, which are visited
/// in the listed order. A directory that is reached again while it is still
/// being resolved is a cycle and fails with
/// [`ConfigError::CyclicModuleReference`].
pub fn resolve(root_dir: &Path) -> Result<ModuleCatalog> {
	let mut modules = Vec::new();
	let mut chain = HashSet::new();

	resolve_dir(root_dir, &mut chain, &mut modules)?;

	Ok(ModuleCatalog::new(modules))
}

fn resolve_dir(dir: &Path, chain: &mut HashSet<PathBuf>, modules: &mut Vec<Module>) -> Result<()> {
	let dir = dir
		.canonicalize()
		.map_err(|source| ConfigError::MissingDescriptor {
			dir: dir.to_path_buf(),
			source,
		})?;

	if !chain.insert(dir.clone()) {
		return Err(ConfigError::CyclicModuleReference { dir }.into());
	}

	let descriptor = load_descriptor(&dir)?;
	let name = descriptor
		.name()
		.ok_or_else(|| ConfigError::MissingName { dir: dir.clone() })?
		.to_string();
	let build = descriptor.build.unwrap_or_default();

	debug!(module = %name, dir = %dir.display(), "resolved descriptor");
	modules.push(build_module(name, &dir, &build)?);

	for nested in build.modules.iter().flatten() {
		resolve_dir(&dir.join(nested), chain, modules)?;
	}

	chain.remove(&dir);
	Ok(())
}

fn build_module(name: String, dir: &Path, build: &BuildSection) -> Result<Module> {
	let builddir = build.builddir().map(|d| dir.join(d));

	let Some(files) = &build.files else {
		return Ok(Module {
			name,
			path: dir.to_path_buf(),
			builddir,
			files: None,
			prepend: None,
			append: None,
		});
	};

	if builddir.is_none() {
		return Err(ConfigError::MissingBuildDir {
			dir: dir.to_path_buf(),
		}
		.into());
	}

	Ok(Module {
		name,
		path: dir.to_path_buf(),
		builddir,
		files: Some(FileSet::new(files.iter().map(|f| dir.join(f)).collect())),
		prepend: build.prepend.as_ref().map(|p| read_text(&dir.join(p))).transpose()?,
		append: build.append.as_ref().map(|p| read_text(&dir.join(p))).transpose()?,
	})
}
