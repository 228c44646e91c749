//! Application configuration module
//!
//! Provides configuration types for the forum client.

use std::time::Duration;
use thiserror::Error;

/// Base URL used when none is configured
pub const DEFAULT_API_BASE_URL: &str = "https://forum-api.dicoding.dev/v1";
/// Default timeout for ordinary API requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Default bound on a vote confirmation round-trip
pub const DEFAULT_VOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API base URL, without trailing slash
    pub api_base_url: String,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Timeout after which a pending vote is reverted
    pub vote_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            vote_timeout: DEFAULT_VOTE_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api_base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.api_base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.api_base_url,
                url.scheme()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "request_timeout",
                "must be positive".to_string(),
            ));
        }
        if self.vote_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("vote_timeout", "must be positive".to_string()));
        }
        Ok(())
    }

    /// Full URL for an API path such as `/threads`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_base_url: Option<String>,
    request_timeout: Option<Duration>,
    vote_timeout: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the API base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn vote_timeout(mut self, timeout: Duration) -> Self {
        self.vote_timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_base_url = self
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let config = AppConfig {
            api_base_url,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            vote_timeout: self.vote_timeout.unwrap_or(DEFAULT_VOTE_TIMEOUT),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
