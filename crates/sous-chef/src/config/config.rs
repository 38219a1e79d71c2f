//! Configuration management for sous-chef.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{AssistantConfig, ProviderConfig, SpeechConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Trigger word and listening cadence.
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Speech output settings.
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Recipe provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            info!(config_path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save()?;
            info!(config_path = ?config_path, "Default config created");
            Ok(config)
        }
    }

    /// Read and parse a configuration file.
    #[track_caller]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text. Missing sections and keys
    /// take their defaults.
    #[track_caller]
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Reject settings the assistant cannot run with.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        let invalid = |reason: &str| AppError::ConfigError {
            reason: reason.to_string(),
            location: ErrorLocation::from(Location::caller()),
        };

        if self.assistant.trigger_word.trim().is_empty() {
            return Err(invalid("assistant.trigger_word must not be empty"));
        }
        if self.assistant.command_window_secs == 0 {
            return Err(invalid("assistant.command_window_secs must be at least 1"));
        }
        if self.assistant.listen_timeout_secs == 0 {
            return Err(invalid("assistant.listen_timeout_secs must be at least 1"));
        }
        if self.assistant.phrase_time_limit_secs == 0 {
            return Err(invalid("assistant.phrase_time_limit_secs must be at least 1"));
        }
        if self.assistant.service_backoff_secs == 0 {
            return Err(invalid("assistant.service_backoff_secs must be at least 1"));
        }
        if self.provider.model.trim().is_empty() {
            return Err(invalid("provider.model must not be empty"));
        }
        if self.speech.command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(invalid("speech.command must not be blank; remove it for console only"));
        }

        Ok(())
    }

    /// Save configuration to the platform config directory.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "sous-chef", "Sous-Chef").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }
}
