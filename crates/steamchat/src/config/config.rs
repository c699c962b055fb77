//! Configuration management for steamchat.
//!
//! Handles loading and saving the TOML configuration file with
//! cross-platform paths, defaults for missing keys, and atomic writes.

use crate::{
    AppError, AppResult,
    config::{BehaviourConfig, ChatConfig, PollingConfig},
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
use steamchat_core::{ConfigKey, ConfigStore, CoreResult, ShellError, SyncOptions, TrayPlatform};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Window and process behaviour.
    #[serde(default)]
    pub behaviour: BehaviourConfig,
    /// The wrapped chat application.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Synchronizer timer periods.
    #[serde(default)]
    pub polling: PollingConfig,
    /// File this configuration was loaded from and is saved to.
    #[serde(skip)]
    path: PathBuf,
}

impl Config {
    /// Load configuration from the platform config directory, creating the
    /// default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating the default file if none
    /// exists. Keys missing from an existing file take their defaults and
    /// are written back.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!(config_path = ?path, "No config found, creating default");
            let config = Config {
                path: path.to_path_buf(),
                ..Config::default()
            };
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        config.path = path.to_path_buf();

        if config.serialize()? != contents {
            debug!(config_path = ?path, "Filling in missing config keys");
            config.save()?;
        }

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self), fields(config_path = ?self.path))]
    pub fn save(&self) -> AppResult<()> {
        let contents = self.serialize()?;

        match self.path.parent() {
            Some(config_dir) if !config_dir.as_os_str().is_empty() && !config_dir.exists() => {
                fs::create_dir_all(config_dir)?;
                debug!(config_dir = ?config_dir, "Created config directory");
            }
            _ => {}
        }

        // Atomic write: write to temp file then rename
        let temp_path = self.path.with_extension("toml.tmp");

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

        fs::rename(&temp_path, &self.path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Configuration saved (atomic write)");

        Ok(())
    }

    /// File backing this configuration.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Options for the tray synchronizer.
    pub fn to_sync_options(&self) -> SyncOptions {
        SyncOptions {
            chat_url: self.chat.url.clone(),
            tooltip_suffix: self.chat.tooltip_suffix.clone(),
            intervals: self.polling.intervals(),
            hide_dock: self.behaviour.hide_dock_when_hidden,
            platform: TrayPlatform::current(),
        }
    }

    /// Per-user data directory, for logs.
    #[track_caller]
    pub fn data_dir() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    #[track_caller]
    fn serialize(&self) -> AppResult<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "steamchat", "SteamChat").ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn flag_mut(&mut self, key: ConfigKey) -> &mut bool {
        match key {
            ConfigKey::StartMinimized => &mut self.behaviour.start_minimized,
            ConfigKey::MinimizeOnClose => &mut self.behaviour.minimize_on_close,
            ConfigKey::MinimizeToTray => &mut self.behaviour.minimize_to_tray,
            ConfigKey::LaunchOnStartup => &mut self.behaviour.launch_on_startup,
        }
    }
}

impl ConfigStore for Config {
    fn get(&self, key: ConfigKey) -> bool {
        match key {
            ConfigKey::StartMinimized => self.behaviour.start_minimized,
            ConfigKey::MinimizeOnClose => self.behaviour.minimize_on_close,
            ConfigKey::MinimizeToTray => self.behaviour.minimize_to_tray,
            ConfigKey::LaunchOnStartup => self.behaviour.launch_on_startup,
        }
    }

    /// Update `key` and persist the file immediately. The in-memory value is
    /// rolled back when the write fails.
    fn set(&mut self, key: ConfigKey, value: bool) -> CoreResult<()> {
        let previous = std::mem::replace(self.flag_mut(key), value);

        match self.save() {
            Ok(()) => Ok(()),
            Err(e) => {
                *self.flag_mut(key) = previous;
                Err(ShellError::Config {
                    reason: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}
