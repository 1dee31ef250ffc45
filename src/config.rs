//! Engine settings and file locations.
//!
//! Settings live in `settings.json` inside the config directory and are
//! written atomically like the replacement table itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::replacement::{ReplacementError, Result};
use crate::util::write_atomic;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "textreplace";
/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";
/// Default replacement table file name
pub const STORAGE_FILE_NAME: &str = "text_replacements.csv";

/// Get the engine configuration directory
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR_NAME)))
}

/// Path of the settings file in the default config directory
pub fn default_settings_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE)
}

/// User-adjustable engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Count accepted corrections and show the counter column
    pub counter_enabled: bool,
    /// Replacement table location; `None` uses the config directory
    pub storage_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            counter_enabled: true,
            storage_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    /// `Settings` when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            crate::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| ReplacementError::Settings(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ReplacementError::Settings(e.to_string()))
    }

    /// Persist settings to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ReplacementError::Settings(e.to_string()))?;
        write_atomic(path, content.as_bytes())
            .map_err(|e| ReplacementError::Settings(e.to_string()))?;
        crate::debug!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Flip usage counting and return the new value
    pub fn toggle_counter(&mut self) -> bool {
        self.counter_enabled = !self.counter_enabled;
        self.counter_enabled
    }

    /// Replacement table location, relative to `config_dir` unless overridden
    pub fn storage_path(&self, config_dir: &Path) -> PathBuf {
        self.storage_file
            .clone()
            .unwrap_or_else(|| config_dir.join(STORAGE_FILE_NAME))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
