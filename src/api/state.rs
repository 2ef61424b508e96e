//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::session::{Dashboard, DashboardConfig};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dashboard sessions and their chart feed
    pub dashboard: Arc<Dashboard>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState around an existing dashboard
    pub fn new(dashboard: Arc<Dashboard>, config: ApiConfig) -> Self {
        Self {
            dashboard,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with a fresh dashboard
    pub fn with_dashboard_config(config: ApiConfig, dashboard_config: DashboardConfig) -> Self {
        Self::new(Arc::new(Dashboard::new(dashboard_config)), config)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            cors_origins: Vec::new(),
            max_upload_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
