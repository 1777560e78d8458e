//! JSON Configuration Management
//!
//! Handles reading and writing the panel configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::models::settings::PanelConfig;
use crate::utils::error::{AppError, AppResult};

/// Configuration service for the panel settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: PanelConfig,
}

impl ConfigService {
    /// Load the config at `path`, writing defaults there when it does not exist
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let config_path = path.as_ref().to_path_buf();
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = PanelConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            info!(path = %config_path.display(), "wrote default panel config");
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<PanelConfig> {
        let content = fs::read_to_string(path)?;
        let config: PanelConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &PanelConfig) -> AppResult<()> {
        config.validate().map_err(AppError::config)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &PanelConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> PanelConfig {
        self.config.clone()
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = PanelConfig::default();
        self.save()?;
        Ok(())
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            config: PanelConfig::default(),
        }
    }
}
