//! Tool settings for fr4metool.
//!
//! This module handles:
//! - `.fr4metool.toml` parsing
//! - The user -> project settings cascade

pub mod cascade;
pub mod types;

pub use cascade::{
	NO_USER_SETTINGS_ENV, SETTINGS_FILE, discover_settings, load_settings, merge_settings,
	parse_settings_file, parse_settings_str, user_settings_path,
};
pub use types::{LoadedSettings, Settings, ToolSettings};
