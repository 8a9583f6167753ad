//! fr4metool - build tool for trees of `fr4mebuild.json` modules.
//!
//! This library provides the core functionality for fr4metool, including:
//! - Descriptor loading and recursive module catalog resolution
//! - A line-oriented preprocessor (`//#define`, `//#ifdef`, `@NAME@`, ...)
//! - Source concatenation with prepend/append wrapping
//! - Build, list and clean orchestration
//! - Tool settings cascade
//!
//! # Example
//!
//! ```no_run
//! use fr4metool::build::{BuildOptions, build};
//! use fr4metool::catalog::resolve;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let catalog = resolve(&cwd).unwrap();
//! let report = build(&catalog, &BuildOptions::default()).unwrap();
//!
//! for artifact in &report.artifacts {
//!     println!("Wrote {}", artifact.display());
//! }
//! ```

pub mod build;
pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod files;
pub mod preprocess;
pub mod settings;

pub use error::{ConfigError, DirectiveError, DirectiveErrorKind, IoError, Result, ToolError};
