//! Build descriptor loading for fr4metool.
//!
//! This module handles:
//! - The `fr4mebuild.json` data model
//! - Reading and parsing a directory's descriptor

pub mod parser;
pub mod types;

pub use parser::{DESCRIPTOR_FILE, descriptor_path, load_descriptor, parse_descriptor_str};
pub use types::{BuildSection, Descriptor};
