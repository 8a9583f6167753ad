use crate::error::{Result, ToolError};
use crate::settings::types::{LoadedSettings, Settings, ToolSettings};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the tool settings, in the project directory or in $HOME.
pub const SETTINGS_FILE: &str = ".fr4metool.toml";

/// Environment variable that, if truthy, skips ~/.fr4metool.toml lookup.
pub const NO_USER_SETTINGS_ENV: &str = "FR4METOOL_NO_USER_CONFIG";

/// Parse a settings file from the given path.
pub fn parse_settings_file(path: &Path) -> Result<Settings> {
	let content = std::fs::read_to_string(path).map_err(|source| ToolError::SettingsRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_settings_str(&content, path)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(content: &str, path: &Path) -> Result<Settings> {
	toml::from_str(content).map_err(|source| ToolError::SettingsParse {
		path: path.to_path_buf(),
		source,
	})
}

/// Discover the settings files that apply to `project_dir`.
///
/// The cascade order is:
/// 1. `<project_dir>/.fr4metool.toml`
/// 2. `~/.fr4metool.toml`, unless the project file sets `no-user-config`
///    or `FR4METOOL_NO_USER_CONFIG` is truthy
///
/// Returns settings in cascade order (most specific first).
pub fn discover_settings(project_dir: &Path) -> Result<Vec<LoadedSettings>> {
	let mut found = Vec::new();

	let project_path = project_dir.join(SETTINGS_FILE);
	if project_path.exists() {
		found.push(LoadedSettings {
			settings: parse_settings_file(&project_path)?,
			path: project_path.clone(),
		});
	}

	let skip_user = is_env_truthy(NO_USER_SETTINGS_ENV)
		|| found.iter().any(|loaded| loaded.settings.no_user_config);
	if skip_user {
		return Ok(found);
	}

	let user_path = user_settings_path()?;
	// The project directory may be $HOME itself.
	if user_path.exists() && user_path != project_path {
		found.push(LoadedSettings {
			settings: parse_settings_file(&user_path)?,
			path: user_path,
		});
	}

	Ok(found)
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge settings into the effective settings.
///
/// For each field the first file in cascade order that sets it wins.
pub fn merge_settings(loaded: &[LoadedSettings]) -> ToolSettings {
	let mut merged = ToolSettings::default();

	for entry in loaded.iter().rev() {
		if let Some(ref extension) = entry.settings.extension {
			merged.extension = extension.trim_start_matches('.').to_string();
		}
		if let Some(mode) = entry.settings.preprocess {
			merged.preprocess = mode;
		}
	}

	merged.sources = loaded.iter().map(|entry| entry.path.clone()).collect();
	merged
}

/// Convenience function to discover and merge settings for a directory.
pub fn load_settings(project_dir: &Path) -> Result<ToolSettings> {
	let loaded = discover_settings(project_dir)?;
	let merged = merge_settings(&loaded);
	debug!(
		extension = %merged.extension,
		preprocess = merged.preprocess.as_str(),
		files = merged.sources.len(),
		"loaded settings"
	);
	Ok(merged)
}

/// Get the path to the user's settings file.
pub fn user_settings_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(ToolError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(SETTINGS_FILE))
}
