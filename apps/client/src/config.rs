//! # Client Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MULTICOURSE_API_URL=https://staging.example.com                    │
//! │     MULTICOURSE_API_KEY=...                                            │
//! │     MULTICOURSE_DB_PATH=/tmp/multicourse.db                            │
//! │     MULTICOURSE_LOG=debug                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/multicourse/client.toml (Linux)                          │
//! │     ~/Library/Application Support/ua.multicourse.client/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://pizza32cm.com.ua"
//! timeout_secs = 15
//!
//! [database]
//! path = "/var/lib/multicourse/multicourse.db"
//! max_connections = 4
//!
//! [ui]
//! search_debounce_ms = 500
//! address_debounce_ms = 500
//!
//! [logging]
//! filter = "info,multicourse=debug,sqlx=warn"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use multicourse_api::{ApiConfig, DEFAULT_BASE_URL};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Default tracing filter when neither `RUST_LOG` nor config set one.
pub const DEFAULT_LOG_FILTER: &str = "info,multicourse=debug,sqlx=warn";

const CONFIG_FILE_NAME: &str = "client.toml";
const DATABASE_FILE_NAME: &str = "multicourse.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine platform directories")]
    NoPlatformDirs,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sent as `X-Api-Key`. Prefer `MULTICOURSE_API_KEY` over the file.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Defaults to `multicourse.db` in the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_debounce")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_debounce")]
    pub address_debounce_ms: u64,
}

fn default_debounce() -> u64 {
    500
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            search_debounce_ms: default_debounce(),
            address_debounce_ms: default_debounce(),
        }
    }
}

impl UiSettings {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn address_debounce(&self) -> Duration {
        Duration::from_millis(self.address_debounce_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`client.toml`, or `config_path` when given)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading client config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.api.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got: {}",
                url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }
        if self.ui.search_debounce_ms == 0 || self.ui.address_debounce_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui debounce windows must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// `lookup` abstracts `std::env::var` so overrides are testable.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("MULTICOURSE_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(key) = lookup("MULTICOURSE_API_KEY") {
            self.api.api_key = Some(SecretString::from(key));
        }

        if let Some(path) = lookup("MULTICOURSE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("MULTICOURSE_LOG") {
            self.logging.filter = filter;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("ua", "multicourse", "client")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Configured database path, or the platform data directory.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        let dirs = Self::project_dirs().ok_or(ConfigError::NoPlatformDirs)?;
        Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    pub fn api_config(&self) -> ConfigResult<ApiConfig> {
        let config = ApiConfig::new(self.api.base_url.trim())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(config
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .api_key(self.api.api_key.clone()))
    }
}
