//! Module catalog resolution for fr4metool.
//!
//! This module handles:
//! - Recursive discovery of nested `fr4mebuild.json` descriptors
//! - Descriptor validation
//! - The flat, ordered catalog of resolved modules

pub mod resolver;
pub mod types;

pub use resolver::resolve;
pub use types::{Module, ModuleCatalog};
