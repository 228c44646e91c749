//! Response Envelopes
//!
//! Every API response is wrapped as `{ status, message, data }` on success
//! and `{ status, message }` on failure.

use serde::{Deserialize, Serialize};

/// Successful response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}
