//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to development defaults:
//! - `PAWSTORE_API_URL` - Base URL of the retailer backend
//!   (default: `http://localhost:8092`)
//! - `PAWSTORE_DATA_DIR` - Directory for locally persisted state such as the
//!   cart and session (default: `.pawstore`)
//! - `PAWSTORE_REQUEST_TIMEOUT_SECS` - HTTP request timeout in seconds
//!   (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the retailer backend.
    pub api_base_url: Url,
    /// Directory for locally persisted state (cart, session).
    pub data_dir: PathBuf,
    /// HTTP request timeout.
    pub request_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_env_or_default(
            "PAWSTORE_API_URL",
            "http://localhost:8092",
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("PAWSTORE_API_URL".to_string(), e))?;

        let data_dir = PathBuf::from(get_env_or_default("PAWSTORE_DATA_DIR", ".pawstore"));

        let request_timeout =
            parse_timeout_secs(&get_env_or_default("PAWSTORE_REQUEST_TIMEOUT_SECS", "10"))
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("PAWSTORE_REQUEST_TIMEOUT_SECS".to_string(), e)
                })?;

        Ok(Self {
            api_base_url,
            data_dir,
            request_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate the backend base URL.
fn parse_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(url)
}

/// Parse a timeout value in whole seconds.
fn parse_timeout_secs(value: &str) -> Result<Duration, String> {
    let secs = value.parse::<u64>().map_err(|e| e.to_string())?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(Duration::from_secs(secs))
}
