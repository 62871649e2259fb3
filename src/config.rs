//! Configuration management for HairCare+
//!
//! TOML configuration with defaults and validation.
//! Location: ~/.haircare/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ClinicError, Result};
use crate::records::Location;

/// Longest splash screen we are willing to show
const MAX_SPLASH_DELAY_MS: u64 = 10_000;

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub clinic: ClinicConfig,
}

/// Where the session key-value file lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_dir: String,
    pub file_name: String,
}

/// Startup navigation behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub splash_delay_ms: u64,
}

/// Clinic branding and branches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub name: String,
    pub locations: Vec<Location>,
    /// Patient record a patient login is bound to
    pub patient_account: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.haircare".to_string(),
            file_name: "session.json".to_string(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: 2000,
        }
    }
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            name: "HairCare+".to_string(),
            locations: Location::ALL.to_vec(),
            patient_account: "p1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClinicError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ClinicError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, or built-in defaults if absent
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_path();
        if config_path.exists() {
            return Self::load_from_file(&config_path);
        }

        Ok(Config::default())
    }

    pub fn default_path() -> PathBuf {
        Self::expand_path("~/.haircare/config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.state_dir.trim().is_empty() {
            return Err(ClinicError::ConfigError(
                "state_dir must not be empty".to_string(),
            ));
        }

        if self.storage.file_name.trim().is_empty() {
            return Err(ClinicError::ConfigError(
                "file_name must not be empty".to_string(),
            ));
        }

        if self.navigation.splash_delay_ms > MAX_SPLASH_DELAY_MS {
            return Err(ClinicError::ConfigError(format!(
                "splash_delay_ms must be at most {}",
                MAX_SPLASH_DELAY_MS
            )));
        }

        if self.clinic.patient_account.trim().is_empty() {
            return Err(ClinicError::ConfigError(
                "patient_account must not be empty".to_string(),
            ));
        }

        if self.clinic.locations.is_empty() {
            return Err(ClinicError::ConfigError(
                "at least one clinic location is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ClinicError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClinicError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ClinicError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn state_dir(&self) -> PathBuf {
        Self::expand_path(&self.storage.state_dir)
    }

    /// Session key-value file
    pub fn state_file(&self) -> PathBuf {
        self.state_dir().join(&self.storage.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.navigation.splash_delay_ms, 2000);
        assert_eq!(config.clinic.locations.len(), 3);
        assert!(config.state_file().ends_with("session.json"));
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_splash_delay() {
        let mut config = Config::default();
        config.navigation.splash_delay_ms = 60_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_locations() {
        let mut config = Config::default();
        config.clinic.locations.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_patient_account() {
        let mut config = Config::default();
        assert_eq!(config.clinic.patient_account, "p1");
        config.clinic.patient_account = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[navigation]\nsplash_delay_ms = 0\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.navigation.splash_delay_ms, 0);
        assert_eq!(config.storage.file_name, "session.json");
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[storage]\nstate_dir = \"/tmp/haircare\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.state_file(), PathBuf::from("/tmp/haircare/session.json"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cfg").join("config.toml");

        let mut config = Config::default();
        config.clinic.locations = vec![Location::Pune];
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.clinic.locations, vec![Location::Pune]);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.haircare");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let path = "/absolute/path";
        assert_eq!(Config::expand_path(path).to_string_lossy(), path);
    }
}
