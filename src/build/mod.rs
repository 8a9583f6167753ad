//! Build orchestration for fr4metool.
//!
//! This module handles:
//! - Building every buildable module of a catalog into one artifact each
//! - Listing modules
//! - Cleaning build directories

pub mod builder;

pub use builder::{
	BuildOptions, BuildReport, CleanReport, DEFAULT_EXTENSION, build, build_module, clean, list,
};
