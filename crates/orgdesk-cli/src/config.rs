//! User settings and store location.
//!
//! Settings are read from `orgdesk.toml` in the platform config directory
//! (or the path given with `--config`). A missing or unreadable file means
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the settings file.
pub const SETTINGS_FILE_NAME: &str = "orgdesk.toml";

/// Store file used when no platform data directory is available.
pub const FALLBACK_STORE_PATH: &str = "orgdesk-store.json";

// =============================================================================
// ROOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Location of the JSON store.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Add an id column to list views.
    pub show_ids: bool,
}

impl Settings {
    /// Load settings from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::config_path().map_or_else(Self::default, |path| Self::load_from(&path)),
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    /// Default settings file path.
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Store path: the explicit flag, then the settings file, then the
    /// platform data directory, then the working directory.
    pub fn store_path(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        if let Some(path) = &self.storage.path {
            return path.clone();
        }
        default_store_path()
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "orgdesk", "orgdesk")
}

/// `<data_dir>/store.json`, or [`FALLBACK_STORE_PATH`].
pub fn default_store_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(FALLBACK_STORE_PATH),
        |dirs| dirs.data_dir().join("store.json"),
    )
}
