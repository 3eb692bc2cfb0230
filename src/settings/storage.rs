//! Persistence for settings in the user config directory.

use super::Settings;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name for xcart within the config directory.
const XCART_DIR: &str = "xcart";

/// Filename for settings.
const SETTINGS_FILE: &str = "settings.toml";

/// Get the default settings path (`<config_dir>/xcart/settings.toml`).
pub fn default_settings_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(XCART_DIR).join(SETTINGS_FILE))
        .ok_or_else(|| Error::Settings("could not determine config directory".to_string()))
}

/// Load settings from disk.
///
/// Returns default `Settings` if the file doesn't exist.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Settings(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Settings(format!("failed to parse {}: {e}", path.display())))
}

/// Save settings to disk.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.exists()
    {
        fs::create_dir_all(dir)
            .map_err(|e| Error::Settings(format!("failed to create {}: {e}", dir.display())))?;
    }

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::Settings(format!("failed to serialize settings: {e}")))?;

    let content_with_header = format!(
        "# xcart settings\n# Auto-generated - manual edits may be overwritten\n\n{content}"
    );

    fs::write(path, content_with_header)
        .map_err(|e| Error::Settings(format!("failed to write {}: {e}", path.display())))?;

    Ok(())
}
