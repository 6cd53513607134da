//! Application settings management
//!
//! Stores non-sensitive configuration in a plain JSON file, separate from the
//! entry store itself.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

/// Store file used when neither the command line nor the settings name one
pub const DEFAULT_STORE_FILE: &str = "passwords.txt";

const SETTINGS_FILE: &str = "settings.json";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings file version
    pub version: u32,
    /// Path of the entry store file
    pub store_file: Option<PathBuf>,
    /// tracing filter directive (e.g. "warn" or "passbook_core=debug")
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            store_file: None,
            log_filter: None,
        }
    }
}

impl Settings {
    /// Store file named by the settings, or the default in the working directory
    pub fn effective_store_file(&self) -> PathBuf {
        self.store_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }
}

/// Settings manager
pub struct SettingsManager {
    settings_file: PathBuf,
    settings: Settings,
    /// Why the settings file was ignored, if it was
    load_error: Option<String>,
}

impl SettingsManager {
    /// Create a settings manager backed by `settings.json` in `config_dir`
    pub fn new(config_dir: &Path) -> Self {
        let settings_file = config_dir.join(SETTINGS_FILE);
        let (settings, load_error) = match Self::load_from_file(&settings_file) {
            Ok(settings) => (settings, None),
            Err(e) => {
                warn!("Ignoring unreadable settings file {:?}: {}", settings_file, e);
                (Settings::default(), Some(e.to_string()))
            }
        };

        Self {
            settings_file,
            settings,
            load_error,
        }
    }

    /// Get the default configuration directory for this platform
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "passbook", "passbook").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load settings from file
    fn load_from_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.settings)?;

        if let Some(parent) = self.settings_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write atomically using temp file
        let temp_path = self.settings_file.with_extension("tmp");
        std::fs::write(&temp_path, &contents)?;
        std::fs::rename(&temp_path, &self.settings_file)?;

        debug!("Saved settings to {:?}", self.settings_file);
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Get mutable settings
    #[cfg(test)]
    pub(crate) fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Get the reason the settings file was ignored, if it was
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Get the path of the settings file
    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }

    /// Remember a store file and save
    pub fn set_store_file(&mut self, path: PathBuf) -> Result<()> {
        self.settings.store_file = Some(path);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(temp_dir.path());

        let settings = manager.get();
        assert_eq!(settings.version, 1);
        assert!(settings.store_file.is_none());
        assert_eq!(settings.effective_store_file(), PathBuf::from(DEFAULT_STORE_FILE));
    }

    #[test]
    fn test_settings_persistence() {
        let temp_dir = TempDir::new().unwrap();

        // Create and modify settings
        {
            let mut manager = SettingsManager::new(temp_dir.path());
            manager.get_mut().log_filter = Some("debug".to_string());
            manager.set_store_file(PathBuf::from("/tmp/vault.txt")).unwrap();
        }

        // Load and verify
        {
            let manager = SettingsManager::new(temp_dir.path());
            assert_eq!(manager.get().log_filter.as_deref(), Some("debug"));
            assert_eq!(
                manager.get().effective_store_file(),
                PathBuf::from("/tmp/vault.txt")
            );
        }
    }

    #[test]
    fn test_settings_file_uses_camel_case() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());
        manager.set_store_file(PathBuf::from("store.txt")).unwrap();

        let raw = std::fs::read_to_string(manager.settings_file()).unwrap();
        assert!(raw.contains("\"storeFile\""));
        assert!(raw.contains("\"logFilter\""));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE), r#"{"logFilter":"info"}"#).unwrap();

        let manager = SettingsManager::new(temp_dir.path());
        assert_eq!(manager.get().version, 1);
        assert_eq!(manager.get().log_filter.as_deref(), Some("info"));
        assert!(manager.get().store_file.is_none());
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE), "not json").unwrap();

        let manager = SettingsManager::new(temp_dir.path());
        assert_eq!(manager.get(), &Settings::default());
        assert!(manager.load_error().is_some());
    }
}
