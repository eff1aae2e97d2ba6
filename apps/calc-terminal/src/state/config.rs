//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CALC_ERROR_DISPLAY_MS=1500                                         │
//! │     CALC_SHOW_HISTORY=false                                            │
//! │     CALC_LOG_FILTER=debug                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or calc.toml in the platform config dir           │
//! │     ~/.config/desk-calc/calc.toml (Linux)                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # calc.toml
//! error_display_ms = 2000
//! show_history = true
//! log_filter = "info,calc=debug"
//! log_file = "/tmp/calc.log"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Upper bound for how long an error message stays up.
const MAX_ERROR_DISPLAY_MS: u64 = 60_000;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// How long an error message replaces the display (milliseconds).
    /// Default: 2000
    pub error_display_ms: u64,

    /// Show the last three calculations under the display.
    pub show_history: bool,

    /// `tracing-subscriber` filter directive.
    pub log_filter: String,

    /// Where interactive mode writes its log.
    /// Default: `calc.log` in the platform data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            error_display_ms: 2000,
            show_history: true,
            log_filter: "info,calc=debug".to_string(),
            log_file: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (calc.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The default location may not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::InvalidConfig(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading config from file");
                    Self::from_file(&path)?
                }
                path => {
                    debug!(?path, "No config file, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.error_display_ms == 0 || self.error_display_ms > MAX_ERROR_DISPLAY_MS {
            return Err(AppError::InvalidConfig(format!(
                "error_display_ms must be between 1 and {}, got {}",
                MAX_ERROR_DISPLAY_MS, self.error_display_ms
            )));
        }

        if self.log_filter.trim().is_empty() {
            return Err(AppError::InvalidConfig("log_filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `CALC_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = lookup("CALC_ERROR_DISPLAY_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding error display time from environment");
                    self.error_display_ms = ms;
                }
                Err(_) => warn!(value = %ms, "Ignoring invalid CALC_ERROR_DISPLAY_MS"),
            }
        }

        if let Some(show) = lookup("CALC_SHOW_HISTORY") {
            match show.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.show_history = true,
                "0" | "false" | "no" | "off" => self.show_history = false,
                _ => warn!(value = %show, "Ignoring invalid CALC_SHOW_HISTORY"),
            }
        }

        if let Some(filter) = lookup("CALC_LOG_FILTER") {
            self.log_filter = filter;
        }

        if let Some(path) = lookup("CALC_LOG_FILE") {
            self.log_file = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("calc.toml"))
    }

    /// Returns the log file path: configured, or `calc.log` in the data dir.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("calc.log")))
    }

    /// Error flash duration.
    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "desk-calc", "desk-calc")
}
