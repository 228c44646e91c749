//! Client Error Types
//!
//! Errors returned by the [`ForumClient`](crate::client::ForumClient) flows.
//!
//! - `Validation` - a form field was rejected before any request was sent
//! - `Api` - the forum API failed or rejected the request
//! - `Config` - configuration could not be built
//! - `Unauthenticated` - the flow needs a signed-in user

use crate::client::api::ApiError;
use crate::shared::config::ConfigError;
use crate::shared::SharedError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Not signed in")]
    Unauthenticated,
}

impl ClientError {
    /// Message to show the user, `fallback` when there is nothing better
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::Api(e) => e.user_message(fallback),
            ClientError::Config(_) | ClientError::Unauthenticated => fallback.to_string(),
        }
    }
}
