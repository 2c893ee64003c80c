//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides, and
//! validates the result before anything is built from it.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::Endpoints;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_signup_path")]
    pub signup_path: String,

    #[serde(default = "default_stats_path")]
    pub stats_path: String,

    #[serde(default = "default_conversations_path")]
    pub conversations_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    crate::api::DEFAULT_API_BASE.to_string()
}

fn default_login_path() -> String {
    "/api/login".to_string()
}

fn default_signup_path() -> String {
    "/api/signup".to_string()
}

fn default_stats_path() -> String {
    "/api/dashboard/stats".to_string()
}

fn default_conversations_path() -> String {
    "/api/conversations/recent".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            signup_path: default_signup_path(),
            stats_path: default_stats_path(),
            conversations_path: default_conversations_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Validated endpoint set
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Endpoints::with_paths(
            &self.base_url,
            &self.login_path,
            &self.signup_path,
            &self.stats_path,
            &self.conversations_path,
        )
        .map_err(|e| ConfigError::Invalid {
            field: "api",
            reason: e.to_string(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("chatlytics").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./chatlytics_session.json"))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("chatlytics").join("config.toml")),
            Some(PathBuf::from("./chatlytics.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                tracing::debug!("Loading config from {:?}", path);
                return Self::load_with_env(path);
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Ok(Self::from_env())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CHATLYTICS_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(path) = std::env::var("CHATLYTICS_SESSION_PATH") {
            self.session.path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var("CHATLYTICS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CHATLYTICS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Reject settings nothing could be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoints = self.api.endpoints()?;

        reqwest::Url::parse(endpoints.base_url()).map_err(|e| ConfigError::Invalid {
            field: "api.base_url",
            reason: e.to_string(),
        })?;

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "api.request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.session.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "session.path",
                reason: "must not be empty".to_string(),
            });
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            });
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Chatlytics Configuration
#
# Environment variables override these settings:
# - CHATLYTICS_API_URL
# - CHATLYTICS_SESSION_PATH
# - CHATLYTICS_LOG_LEVEL
# - CHATLYTICS_LOG_FORMAT

[api]
# Analytics backend
base_url = "http://localhost:5000"

# Endpoint paths under base_url
login_path = "/api/login"
signup_path = "/api/signup"
stats_path = "/api/dashboard/stats"
conversations_path = "/api/conversations/recent"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Where the signed-in state is kept between invocations
# path = "~/.local/share/chatlytics/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
