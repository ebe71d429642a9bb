//! Calculator configuration.
//!
//! ## Load order (later overrides earlier)
//! 1. Default values
//! 2. TOML file (`reckon.toml` in the platform config dir, or an explicit path)
//! 3. Environment variables (`RECKON_DATA_DIR`, `RECKON_FLUSH_DELAY_MS`,
//!    `RECKON_HISTORY_LIMIT`, `RECKON_THEME`)
//!
//! ## File format
//! ```toml
//! theme = "dark"
//!
//! [storage]
//! data_dir = "/home/me/.local/share/reckon"
//! history_key = "calculator_history"
//! theme_key = "calculator_theme"
//! flush_delay_ms = 500
//!
//! [history]
//! limit = 200
//! ```

use crate::store::{Theme, HISTORY_KEY, THEME_KEY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("No config path available")]
    NoConfigPath,

    #[error("Invalid configuration: {}", join_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single rule broken by a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("{field} must not be empty")]
    EmptyKey { field: &'static str },

    #[error("{field} may only contain letters, digits, '_', '-' and '.' (got '{value}')")]
    UnsafeKey { field: &'static str, value: String },

    #[error("history_key and theme_key must differ (both '{0}')")]
    SharedKey(String),

    #[error("history.limit must be greater than 0 (omit it for no limit)")]
    ZeroHistoryLimit,
}

/// Where and how persisted data is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the stored values.
    /// Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Key of the history blob.
    #[serde(default = "default_history_key")]
    pub history_key: String,

    /// Key of the theme preference.
    #[serde(default = "default_theme_key")]
    pub theme_key: String,

    /// Quiet period before history is written (milliseconds).
    #[serde(default = "default_flush_delay")]
    pub flush_delay_ms: u64,
}

fn default_history_key() -> String {
    HISTORY_KEY.to_string()
}

fn default_theme_key() -> String {
    THEME_KEY.to_string()
}

fn default_flush_delay() -> u64 {
    500
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: None,
            history_key: default_history_key(),
            theme_key: default_theme_key(),
            flush_delay_ms: default_flush_delay(),
        }
    }
}

/// History retention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum retained entries. Unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Complete calculator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Theme used until one has been saved.
    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub history: HistorySettings,
}

impl CalculatorConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |name| std::env::var(name).ok())
    }

    /// [`load`](Self::load) with overrides read through `lookup` instead
    /// of the process environment.
    pub fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.check()?;

        Ok(config)
    }

    /// Loads config or returns the default if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        for (field, value) in [
            ("storage.history_key", &self.storage.history_key),
            ("storage.theme_key", &self.storage.theme_key),
        ] {
            checks.push(check_key(field, value));
        }

        checks.push(if self.storage.history_key == self.storage.theme_key {
            Validation::fail(ConfigViolation::SharedKey(
                self.storage.history_key.clone(),
            ))
        } else {
            Validation::success(())
        });

        checks.push(if self.history.limit == Some(0) {
            Validation::fail(ConfigViolation::ZeroHistoryLimit)
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> ConfigResult<()> {
        match self.validate() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// Applies `RECKON_*` overrides.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("RECKON_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(delay) = lookup("RECKON_FLUSH_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.storage.flush_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring invalid RECKON_FLUSH_DELAY_MS"),
            }
        }

        if let Some(limit) = lookup("RECKON_HISTORY_LIMIT") {
            match limit.to_lowercase().as_str() {
                "" | "none" | "unlimited" => self.history.limit = None,
                value => match value.parse::<usize>() {
                    Ok(n) => self.history.limit = Some(n),
                    Err(_) => warn!(value = %limit, "Ignoring invalid RECKON_HISTORY_LIMIT"),
                },
            }
        }

        if let Some(theme) = lookup("RECKON_THEME") {
            match theme.parse() {
                Ok(parsed) => self.theme = parsed,
                Err(e) => warn!(error = %e, "Ignoring invalid RECKON_THEME"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "reckon", "reckon")
            .map(|dirs| dirs.config_dir().join("reckon.toml"))
    }

    /// Directory for persisted values: configured, platform default, or
    /// `.reckon` in the working directory.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("dev", "reckon", "reckon")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from(".reckon"))
    }

    pub fn flush_delay(&self) -> Duration {
        Duration::from_millis(self.storage.flush_delay_ms)
    }
}

fn check_key(field: &'static str, value: &str) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value.is_empty() {
        Validation::fail(ConfigViolation::EmptyKey { field })
    } else if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        || value.starts_with('.')
    {
        Validation::fail(ConfigViolation::UnsafeKey {
            field,
            value: value.to_string(),
        })
    } else {
        Validation::success(())
    }
}
