//! Settings persistence - load and save settings to disk.
//!
//! Settings are stored in the platform-specific application config folder:
//! - macOS: ~/Library/Application Support/dev.datasnail.DataSnail/
//! - Windows: %APPDATA%/datasnail/DataSnail/config/
//! - Linux: ~/.config/datasnail/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::Settings;
use crate::error::{Result, WorkbenchError};

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "datasnail";
const APP_NAME: &str = "DataSnail";
const CONFIG_FILENAME: &str = "settings.toml";

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from the platform config folder.
///
/// Falls back to defaults when the folder cannot be determined.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Settings::default();
    };
    load_settings_from(&path)
}

/// Load settings from an explicit file.
///
/// Returns default settings if the file doesn't exist, can't be read or
/// can't be parsed.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse settings file, using defaults");
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no settings file found, using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings file, using defaults");
            Settings::default()
        }
    }
}

/// Save settings to the platform config folder.
pub fn save_settings(settings: &Settings) -> Result<PathBuf> {
    let Some(path) = settings_path() else {
        return Err(WorkbenchError::Settings {
            reason: "Could not determine settings path".to_string(),
        });
    };
    save_settings_to(&path, settings)?;
    Ok(path)
}

/// Save settings to an explicit file, creating its parent directory.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    let settings_error = |reason: String| WorkbenchError::Settings { reason };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| settings_error(format!("Failed to create config directory: {e}")))?;
    }

    let content = toml::to_string_pretty(settings)
        .map_err(|e| settings_error(format!("Failed to serialize settings: {e}")))?;

    fs::write(path, content)
        .map_err(|e| settings_error(format!("Failed to write settings file: {e}")))?;

    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}
