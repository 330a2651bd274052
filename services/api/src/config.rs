//! Service configuration loaded from the environment

use std::fmt;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Which coupon store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// API service configuration
///
/// # Environment Variables
/// - `ADMIN_USERNAME`, `ADMIN_PASSWORD`: admin credentials (required)
/// - `STORE_BACKEND`: `mongo` or `memory` (default: mongo)
/// - `CORS_ORIGINS`: comma-separated origins, `*` for any (default: *)
/// - `HOST`, `PORT`: listen address (default: 0.0.0.0:8000)
/// - `MAX_UPLOAD_BYTES`: logo upload body cap (default: 10 MiB)
/// - `REQUEST_TIMEOUT_SECONDS`: per-request deadline (default: 30)
/// - `LOG_FORMAT`: `text` or `json` (default: text)
///
/// MongoDB settings are read separately by `common::database::DatabaseConfig`.
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub store_backend: StoreBackend,
    pub cors_origins: String,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub request_timeout_seconds: u64,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("store_backend", "mongo")?
            .set_default("cors_origins", "*")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("request_timeout_seconds", 30)?
            .set_default("log_format", "text")?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Explicit origins, or `None` when any origin is allowed
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("store_backend", &self.store_backend)
            .field("cors_origins", &self.cors_origins)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("log_format", &self.log_format)
            .finish()
    }
}
