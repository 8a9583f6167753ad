use std::fmt;
use std::path::PathBuf;

/// Descriptor tree resolution failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("No fr4mebuild.json file in directory: {dir}")]
	MissingDescriptor {
		dir: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse fr4mebuild.json in directory: {dir}")]
	InvalidDescriptor {
		dir: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("No \"name\" property in fr4mebuild.json in directory: {dir}")]
	MissingName { dir: PathBuf },

	#[error("No \"build.builddir\" property in fr4mebuild.json in directory: {dir}")]
	MissingBuildDir { dir: PathBuf },

	#[error("Cyclic module reference: {dir} is already being resolved")]
	CyclicModuleReference { dir: PathBuf },
}

/// What went wrong with a preprocessor directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveErrorKind {
	Malformed,
	IllegalName(String),
	DuplicateDefine(String),
	UnmatchedEndif,
	UnterminatedConditional,
}

impl fmt::Display for DirectiveErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DirectiveErrorKind::Malformed => write!(f, "Malformed directive"),
			DirectiveErrorKind::IllegalName(name) => write!(f, "Illegal variable name \"{name}\""),
			DirectiveErrorKind::DuplicateDefine(name) => write!(f, "\"{name}\" is already defined"),
			DirectiveErrorKind::UnmatchedEndif => write!(f, "Too many //#endif"),
			DirectiveErrorKind::UnterminatedConditional => {
				write!(f, "Unterminated //#ifdef or //#ifndef block")
			}
		}
	}
}

/// A directive failure, located in its module and file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (l.{line}, module: {module}, file: {file})")]
pub struct DirectiveError {
	pub kind: DirectiveErrorKind,

	/// Source line number, starting at 1.
	pub line: usize,

	pub module: String,

	pub file: String,
}

/// Filesystem failures, tagged with the path involved.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
	#[error("Failed to read file: {path}")]
	ReadFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to create directory: {path}")]
	MkdirFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to remove directory: {path}")]
	RemoveFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Library-level structured errors for fr4metool.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Directive(#[from] DirectiveError),

	#[error(transparent)]
	Io(#[from] IoError),

	#[error("Failed to build module \"{module}\"")]
	Build {
		module: String,
		#[source]
		source: Box<ToolError>,
	},

	#[error("Failed to read settings file: {path}")]
	SettingsRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

impl ToolError {
	/// Wrap an error with the name of the module being built.
	pub fn in_module(self, module: &str) -> Self {
		ToolError::Build {
			module: module.to_string(),
			source: Box::new(self),
		}
	}
}

/// Result type alias using ToolError.
pub type Result<T> = std::result::Result<T, ToolError>;
