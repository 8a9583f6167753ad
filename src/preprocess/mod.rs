//! Line-oriented macro preprocessor.
//!
//! This module handles:
//! - The `//#define`, `//#ifdef`, `//#ifndef` and `//#endif` directives
//! - `@NAME@` substitution of defined values
//! - Per-file and whole-module preprocessing of a module's sources
//!
//! Each pass owns a fresh [`DefineTable`] and conditional stack; nothing
//! leaks from one file or module into the next.

pub mod defines;
pub mod directive;
pub mod engine;
pub mod module;

pub use defines::DefineTable;
pub use directive::{Directive, is_identifier, parse_directive};
pub use engine::{PassContext, PassOutput, preprocess, preprocess_text};
pub use module::{
	PREPROCESSED_DIR, PreprocessMode, preprocess_concatenated, preprocess_module_files,
};
