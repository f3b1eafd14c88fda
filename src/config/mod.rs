//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! where sessions are stored, the log level, the theme, and the latencies
//! of the simulated backend.

mod error;

pub use error::ConfigError;

use crate::backend::Latency;
use crate::error::AppResult;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DATA_DIRECTORY_NAME: &str = "data";
const DEFAULT_DIRECTORY_PATH: &str = ".config/taskmanager-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub theme_name: String,
    pub splash_delay_ms: u64,
    pub auth_latency_ms: u64,
    pub task_latency_ms: u64,
    pub refresh_latency_ms: u64,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_splash_delay_ms")]
    pub splash_delay_ms: u64,
    #[serde(default = "default_auth_latency_ms")]
    pub auth_latency_ms: u64,
    #[serde(default = "default_task_latency_ms")]
    pub task_latency_ms: u64,
    #[serde(default = "default_refresh_latency_ms")]
    pub refresh_latency_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme_name() -> String {
    "default".to_string()
}

fn default_splash_delay_ms() -> u64 {
    2000
}

fn default_auth_latency_ms() -> u64 {
    1500
}

fn default_task_latency_ms() -> u64 {
    1000
}

fn default_refresh_latency_ms() -> u64 {
    1500
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            data_dir: PathBuf::from(DATA_DIRECTORY_NAME),
            log_level: default_log_level(),
            theme_name: default_theme_name(),
            splash_delay_ms: default_splash_delay_ms(),
            auth_latency_ms: default_auth_latency_ms(),
            task_latency_ms: default_task_latency_ms(),
            refresh_latency_ms: default_refresh_latency_ms(),
            file_path: None,
        }
    }

    /// Load the configuration from the custom directory if provided, or
    /// from the default one. A missing file is created with the defaults.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> AppResult<()> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());
        self.data_dir = dir_path.join(DATA_DIRECTORY_NAME);

        if !file_path.exists() {
            log::info!("Writing default configuration to {}.", file_path.display());
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        if let Some(data_dir) = data.data_dir {
            self.data_dir = data_dir;
        }
        self.log_level = data.log_level;
        self.theme_name = data.theme_name;
        self.splash_delay_ms = data.splash_delay_ms;
        self.auth_latency_ms = data.auth_latency_ms;
        self.task_latency_ms = data.task_latency_ms;
        self.refresh_latency_ms = data.refresh_latency_ms;
        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> AppResult<()> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let default_data_dir = file_path
            .parent()
            .map(|dir| dir.join(DATA_DIRECTORY_NAME));
        let data = FileSpec {
            // Only pin the data directory when it differs from the default.
            data_dir: match default_data_dir {
                Some(default) if default == self.data_dir => None,
                _ => Some(self.data_dir.clone()),
            },
            log_level: self.log_level.clone(),
            theme_name: self.theme_name.clone(),
            splash_delay_ms: self.splash_delay_ms,
            auth_latency_ms: self.auth_latency_ms,
            task_latency_ms: self.task_latency_ms,
            refresh_latency_ms: self.refresh_latency_ms,
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Parse the configured log level.
    ///
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    /// Return the latencies for the simulated backend.
    ///
    pub fn latency(&self) -> Latency {
        Latency {
            auth: Duration::from_millis(self.auth_latency_ms),
            task: Duration::from_millis(self.task_latency_ms),
            refresh: Duration::from_millis(self.refresh_latency_ms),
        }
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> AppResult<PathBuf> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
