//! maintlog configuration file handling
//!
//! Loads and manages the ~/.config/maintlog/config.yaml file.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn config_dir() -> PathBuf {
    // Always use ~/.config for consistency across platforms (macOS, Linux)
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("maintlog");
    path
}

/// Durable key-value storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key
    #[serde(default = "default_storage_dir")]
    pub directory: PathBuf,

    /// Maximum size of a single stored value in bytes (unlimited if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<u64>,
}

fn default_storage_dir() -> PathBuf {
    config_dir().join("storage")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_storage_dir(),
            quota_bytes: None,
        }
    }
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Print transient notifications to the terminal
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Work-order board settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderConfig {
    /// Path of the work-order board JSON document
    #[serde(default = "default_board_path")]
    pub board_path: PathBuf,

    /// Section used when a work order is created without one
    #[serde(default = "default_section")]
    pub default_section: String,
}

fn default_board_path() -> PathBuf {
    config_dir().join("work_orders.json")
}

fn default_section() -> String {
    "preventive".to_string()
}

impl Default for WorkOrderConfig {
    fn default() -> Self {
        Self {
            board_path: default_board_path(),
            default_section: default_section(),
        }
    }
}

/// maintlog configuration
///
/// Represents the complete ~/.config/maintlog/config.yaml file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintlogConfig {
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Work-order board settings
    #[serde(default)]
    pub work_orders: WorkOrderConfig,
}

impl MaintlogConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration rooted in a single directory
    ///
    /// Storage and the work-order board both live under `dir`.
    pub fn rooted_at(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            storage: StorageConfig {
                directory: dir.join("storage"),
                quota_bytes: None,
            },
            notifications: NotificationConfig::default(),
            work_orders: WorkOrderConfig {
                board_path: dir.join("work_orders.json"),
                default_section: default_section(),
            },
        }
    }

    /// Load configuration from the default path (~/.config/maintlog/config.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::MaintlogError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading maintlog configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            storage = %config.storage.directory.display(),
            board = %config.work_orders.board_path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load from the default path, falling back to defaults when no file exists
    pub fn load_default_or_new() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::new())
        }
    }

    /// Save configuration to the default path
    pub fn save_default(&self) -> Result<()> {
        let path = Self::default_path();
        self.save(&path)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving maintlog configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/maintlog/config.yaml)
    pub fn default_path() -> PathBuf {
        config_dir().join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = MaintlogConfig::new();
        assert!(config.notifications.enabled);
        assert!(config.storage.quota_bytes.is_none());
        assert_eq!(config.work_orders.default_section, "preventive");
        assert!(config.storage.directory.ends_with("maintlog/storage"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = MaintlogConfig::rooted_at(temp_dir.path());
        config.storage.quota_bytes = Some(5 * 1024 * 1024);
        config.notifications.enabled = false;
        config.save(&path).unwrap();

        let loaded = MaintlogConfig::load(&path).unwrap();
        assert_eq!(loaded.storage.quota_bytes, Some(5 * 1024 * 1024));
        assert!(!loaded.notifications.enabled);
        assert_eq!(loaded.storage.directory, temp_dir.path().join("storage"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = MaintlogConfig::load(temp_dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(crate::MaintlogError::Config(_))));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "notifications:\n  enabled: false\n").unwrap();

        let config = MaintlogConfig::load(&path).unwrap();
        assert!(!config.notifications.enabled);
        assert_eq!(config.work_orders.default_section, "preventive");
    }
}
