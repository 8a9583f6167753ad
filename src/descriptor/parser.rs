use crate::descriptor::types::Descriptor;
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// File name of the per-directory build descriptor.
pub const DESCRIPTOR_FILE: &str = "fr4mebuild.json";

/// Path of the descriptor file inside `dir`.
pub fn descriptor_path(dir: &Path) -> PathBuf {
	dir.join(DESCRIPTOR_FILE)
}

/// Load the descriptor stored in `dir`.
pub fn load_descriptor(dir: &Path) -> Result<Descriptor> {
	let content = std::fs::read_to_string(descriptor_path(dir)).map_err(|source| {
		ConfigError::MissingDescriptor {
			dir: dir.to_path_buf(),
			source,
		}
	})?;

	parse_descriptor_str(&content, dir)
}

/// Parse a descriptor from a string (useful for testing).
pub fn parse_descriptor_str(content: &str, dir: &Path) -> Result<Descriptor> {
	let descriptor: Descriptor =
		serde_json::from_str(content).map_err(|source| ConfigError::InvalidDescriptor {
			dir: dir.to_path_buf(),
			source,
		})?;

	Ok(descriptor)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ToolError;

	#[test]
	fn test_parse_minimal_descriptor() {
		let dir = PathBuf::from("/project");
		let descriptor = parse_descriptor_str(r#"{ "name": "app" }"#, &dir).unwrap();

		assert_eq!(descriptor.name(), Some("app"));
		assert!(descriptor.build.is_none());
	}

	#[test]
	fn test_parse_full_build_section() {
		let content = r#"
{
    "name": "app",
    "version": "1.2.0",
    "build": {
        "files": ["src/a.js", "src/b.js"],
        "builddir": "dist",
        "prepend": "header.txt",
        "append": "footer.txt",
        "modules": ["lib", "plugins/extra"]
    }
}
"#;
		let dir = PathBuf::from("/project");
		let descriptor = parse_descriptor_str(content, &dir).unwrap();
		let build = descriptor.build.unwrap();

		assert_eq!(
			build.files,
			Some(vec![PathBuf::from("src/a.js"), PathBuf::from("src/b.js")])
		);
		assert_eq!(build.builddir(), Some(&PathBuf::from("dist")));
		assert_eq!(build.prepend, Some(PathBuf::from("header.txt")));
		assert_eq!(build.append, Some(PathBuf::from("footer.txt")));
		assert_eq!(
			build.modules,
			Some(vec![PathBuf::from("lib"), PathBuf::from("plugins/extra")])
		);
	}

	#[test]
	fn test_empty_name_and_builddir_count_as_missing() {
		let content = r#"{ "name": "", "build": { "files": [], "builddir": "" } }"#;
		let dir = PathBuf::from("/project");
		let descriptor = parse_descriptor_str(content, &dir).unwrap();

		assert!(descriptor.name().is_none());
		assert!(descriptor.build.unwrap().builddir().is_none());
	}

	#[test]
	fn test_invalid_json() {
		let dir = PathBuf::from("/project");
		let result = parse_descriptor_str("{ name: ", &dir);

		match result.unwrap_err() {
			ToolError::Config(ConfigError::InvalidDescriptor { dir, .. }) => {
				assert_eq!(dir, PathBuf::from("/project"));
			}
			other => panic!("Expected InvalidDescriptor error, got {other:?}"),
		}
	}

	#[test]
	fn test_load_missing_descriptor() {
		let temp_dir = tempfile::tempdir().unwrap();
		let result = load_descriptor(temp_dir.path());

		assert!(matches!(
			result.unwrap_err(),
			ToolError::Config(ConfigError::MissingDescriptor { .. })
		));
	}
}
