//! Source file sets and artifact assembly.
//!
//! This module handles:
//! - Ordered lists of source files
//! - Concatenation with Unix-style line endings
//! - Prepend/append wrapping and saving the final artifact
//! - Text reads and lexical path helpers shared by the other modules

use crate::error::{IoError, Result};
use std::path::{Component, Path, PathBuf};

/// Replace every CRLF sequence with a single LF.
pub fn normalize_newlines(text: &str) -> String {
	text.replace("\r\n", "\n")
}

/// Read `path` as text, replacing invalid UTF-8 sequences.
pub fn read_text(path: &Path) -> Result<String> {
	let bytes = std::fs::read(path).map_err(|source| IoError::ReadFailed {
		path: path.to_path_buf(),
		source,
	})?;

	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Collapse `.` and `..` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => match normalized.components().next_back() {
				Some(Component::Normal(_)) => {
					normalized.pop();
				}
				// `..` at the root is the root
				Some(Component::RootDir | Component::Prefix(_)) => {}
				_ => normalized.push(".."),
			},
			other => normalized.push(other.as_os_str()),
		}
	}

	normalized
}

/// Path of `path` relative to `base`, walking up with `..` where needed.
///
/// Both paths are normalized lexically first. If they share no root, `path`
/// is returned normalized.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
	let base = normalize_path(base);
	let path = normalize_path(path);
	let base_parts: Vec<Component> = base.components().collect();
	let path_parts: Vec<Component> = path.components().collect();

	let common = base_parts
		.iter()
		.zip(&path_parts)
		.take_while(|(a, b)| a == b)
		.count();
	if common == 0 && (base.has_root() || path.has_root()) {
		return path;
	}

	let mut relative = PathBuf::new();
	for _ in &base_parts[common..] {
		relative.push("..");
	}
	for part in &path_parts[common..] {
		relative.push(part.as_os_str());
	}
	relative
}

/// Ordered list of source file paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
	files: Vec<PathBuf>,
}

impl FileSet {
	pub fn new(files: Vec<PathBuf>) -> Self {
		FileSet { files }
	}

	/// Append paths at the end of the set.
	pub fn add<I>(&mut self, paths: I) -> &mut Self
	where
		I: IntoIterator<Item = PathBuf>,
	{
		self.files.extend(paths);
		self
	}

	pub fn paths(&self) -> &[PathBuf] {
		&self.files
	}

	pub fn len(&self) -> usize {
		self.files.len()
	}

	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}

	/// Read every file in order and join them with a single LF.
	pub fn concat(&self) -> Result<Concatenated> {
		let mut parts = Vec::with_capacity(self.files.len());

		for path in &self.files {
			parts.push(read_text(path)?);
		}

		Ok(Concatenated::new(&parts.join("\n")))
	}
}

/// Text of concatenated files, with optional wrapping text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Concatenated {
	text: String,
	prepend: String,
	append: String,
}

impl Concatenated {
	pub fn new(text: &str) -> Self {
		Concatenated {
			text: normalize_newlines(text),
			prepend: String::new(),
			append: String::new(),
		}
	}

	/// The concatenated body, without prepend/append.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Text written before the body, followed by one LF.
	pub fn set_prepend(&mut self, text: &str) -> &mut Self {
		self.prepend = normalize_newlines(text) + "\n";
		self
	}

	/// Text written after the body, preceded by one LF.
	pub fn set_append(&mut self, text: &str) -> &mut Self {
		self.append = "\n".to_string() + &normalize_newlines(text);
		self
	}

	/// Final artifact contents.
	pub fn contents(&self) -> String {
		format!("{}{}{}", self.prepend, self.text, self.append)
	}

	/// Write the artifact as `dir/filename`, creating `dir` if needed.
	///
	/// An existing file is overwritten. Returns the path written.
	pub fn save(&self, dir: &Path, filename: &str) -> Result<PathBuf> {
		std::fs::create_dir_all(dir).map_err(|source| IoError::MkdirFailed {
			path: dir.to_path_buf(),
			source,
		})?;

		let path = dir.join(filename);
		std::fs::write(&path, self.contents()).map_err(|source| IoError::WriteFailed {
			path: path.clone(),
			source,
		})?;

		Ok(path)
	}
}
