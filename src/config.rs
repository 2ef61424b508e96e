//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::session::DashboardConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Upload limits
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Dashboard session settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_kind")]
    pub default_kind: String,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_kind() -> String {
    "bar".to_string()
}

fn default_max_sessions() -> usize {
    1000
}

fn default_event_capacity() -> usize {
    256
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_kind: default_kind(),
            max_sessions: default_max_sessions(),
            event_capacity: default_event_capacity(),
            session_idle_secs: default_session_idle_secs(),
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
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("chartboard").join("config.toml")),
            Some(PathBuf::from("/etc/chartboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CHARTBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("CHARTBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(limit) = std::env::var("CHARTBOARD_MAX_UPLOAD_BYTES") {
            if let Ok(n) = limit.parse() {
                self.upload.max_upload_bytes = n;
            }
        }

        if let Ok(level) = std::env::var("CHARTBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CHARTBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Runtime settings for the HTTP layer
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            cors_origins: self.server.cors_origins.clone(),
            max_upload_bytes: self.upload.max_upload_bytes,
        }
    }

    /// Runtime settings for dashboard sessions
    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            default_kind: self.dashboard.default_kind.clone(),
            max_sessions: self.dashboard.max_sessions,
            event_capacity: self.dashboard.event_capacity.max(1),
            idle_ttl: std::time::Duration::from_secs(self.dashboard.session_idle_secs),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Chartboard Configuration
#
# Environment variables override these settings:
# - CHARTBOARD_HOST
# - CHARTBOARD_PORT
# - CHARTBOARD_MAX_UPLOAD_BYTES
# - CHARTBOARD_LOG_LEVEL
# - CHARTBOARD_LOG_FORMAT

[server]
# Address to bind to
host = "127.0.0.1"

# Port to listen on
port = 8050

# Allowed CORS origins (empty allows any origin)
cors_origins = []

[upload]
# Largest accepted upload request (bytes)
max_upload_bytes = 10485760

[dashboard]
# Chart kind selected in new sessions:
# bar, scatter, pie, line, area, bubble, heatmap
default_kind = "bar"

# Maximum number of live sessions
max_sessions = 1000

# Buffered chart updates per subscriber
event_capacity = 256

# Sessions with no upload or kind change for this long are removed (seconds)
session_idle_secs = 3600

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
