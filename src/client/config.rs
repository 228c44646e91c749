use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::time::Duration;

/// Environment variable holding the API base URL
pub const API_BASE_URL_VAR: &str = "FORUM_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "FORUM_REQUEST_TIMEOUT_SECS";
pub const VOTE_TIMEOUT_VAR: &str = "FORUM_VOTE_TIMEOUT_SECS";
/// Bearer token handed in from outside (token persistence is not ours)
pub const TOKEN_VAR: &str = "FORUM_TOKEN";

/// Client configuration: validated app settings plus the in-memory token.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
    token: Option<String>,
}

impl Config {
    /// Configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();
        if let Ok(url) = std::env::var(API_BASE_URL_VAR) {
            builder = builder.api_base_url(url);
        }
        if let Some(timeout) = secs_from_env(REQUEST_TIMEOUT_VAR)? {
            builder = builder.request_timeout(timeout);
        }
        if let Some(timeout) = secs_from_env(VOTE_TIMEOUT_VAR)? {
            builder = builder.vote_timeout(timeout);
        }
        let token = std::env::var(TOKEN_VAR).ok().filter(|t| !t.is_empty());
        Ok(Self { app: builder.build()?, token })
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
            token: None,
        })
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Split into the app settings and the start-up token
    pub fn into_parts(self) -> (AppConfig, Option<String>) {
        (self.app, self.token)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        self.app.api_url(path)
    }
}

fn secs_from_env(var: &'static str) -> Result<Option<Duration>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| ConfigError::InvalidValue(var, format!("{}: {}", raw, e))),
        Err(_) => Ok(None),
    }
}
