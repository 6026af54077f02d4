//! Application constants and startup configuration.
//!
//! Everything environment-dependent is resolved once through
//! `AnalysisConfig::from_env()` and then passed into the client, so request
//! handling never reads process environment.

use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Take It Right";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the analysis service base address.
pub const API_URL_ENV: &str = "TAKE_IT_RIGHT_API_URL";

/// Optional override for the transport connect timeout, in seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "TAKE_IT_RIGHT_CONNECT_TIMEOUT_SECS";

/// Connect timeout used when no override is configured.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Minimum dose spacing assumed when the service omits `min_spacing`.
pub const DEFAULT_MIN_SPACING_HOURS: f64 = 4.0;

/// Full scale of an organ-load gauge.
pub const DEFAULT_LOAD_MAX: f64 = 10.0;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,take_it_right_lib=debug"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Analysis service address is not configured (set {0})")]
    MissingApiUrl(&'static str),

    #[error("Analysis service address must start with http:// or https://: {0}")]
    InvalidApiUrl(String),

    #[error("Invalid connect timeout {value:?} in {var}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Deployment configuration for reaching the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    base_url: String,
    connect_timeout: Duration,
}

impl AnalysisConfig {
    /// Build a config from an explicit base address.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingApiUrl(API_URL_ENV));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(trimmed.to_string()));
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// Resolve the config from the process environment at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(API_URL_ENV).unwrap_or_default();
        let config = Self::new(&url)?;

        match std::env::var(CONNECT_TIMEOUT_ENV) {
            Ok(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout {
                        var: CONNECT_TIMEOUT_ENV,
                        value: raw.clone(),
                    })?;
                Ok(config.with_connect_timeout(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Endpoint receiving `AnalysisRequest` bodies.
    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// Liveness probe endpoint.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}
