//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (auth commands only)
//! - `PAWTRACK_API_URL` - Base URL of the auth API (e.g. `https://api.example.com/v1`)
//!
//! ## Optional
//! - `PAWTRACK_STORAGE_PATH` - Durable session storage file (default: `.pawtrack/storage.json`)
//! - `PAWTRACK_HTTP_TIMEOUT_SECS` - Auth request timeout in seconds (default: 30)
//! - `PAWTRACK_SEED` - Seed for reproducible demo records
//! - `PAWTRACK_LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_PATH: &str = ".pawtrack/storage.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Auth API configuration (absent when `PAWTRACK_API_URL` is unset)
    pub api: Option<ApiConfig>,
    /// File backing the durable key-value storage
    pub storage_path: PathBuf,
    /// Seed for demo record generation
    pub seed: Option<u64>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// Auth API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every `/auth/...` path is appended to
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build an API configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not http(s).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_api_url(base_url)?,
            timeout,
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("PAWTRACK_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("PAWTRACK_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = Duration::from_secs(timeout_secs);

        let api = lookup("PAWTRACK_API_URL")
            .map(|url| ApiConfig::new(&url, timeout))
            .transpose()?;

        let storage_path = lookup("PAWTRACK_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        let seed = lookup("PAWTRACK_SEED")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("PAWTRACK_SEED".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let log_format = match lookup("PAWTRACK_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "PAWTRACK_LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        let sentry_sample_rate = lookup("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api,
            storage_path,
            seed,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Returns the auth API configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `PAWTRACK_API_URL` was not set.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        self.api
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("PAWTRACK_API_URL".to_string()))
    }
}

/// Parse and normalise the API base URL.
///
/// A trailing slash is added so relative joins keep the base path.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("PAWTRACK_API_URL".to_string(), reason);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
