//! Remote API seam
//!
//! The forum API consumed by the client. `HttpForumApi` talks to the real
//! service; tests substitute their own implementation.

use crate::shared::forum::{
    Comment, LeaderboardEntry, NewThread, Thread, ThreadDetail, User, VoteRecord, VoteType,
};
use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to the forum API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Request failed: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message to show the user: the server's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Forum API contract.
///
/// Implementations inject the bearer token set through [`ForumApi::set_token`]
/// into every request that needs it.
#[async_trait]
pub trait ForumApi: Send + Sync {
    /// Replace the bearer token used for authenticated requests
    fn set_token(&self, token: Option<String>);

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError>;

    /// Returns the access token
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    async fn own_profile(&self) -> Result<User, ApiError>;

    async fn list_threads(&self) -> Result<Vec<Thread>, ApiError>;

    async fn create_thread(&self, thread: &NewThread) -> Result<Thread, ApiError>;

    async fn thread_detail(&self, thread_id: &str) -> Result<ThreadDetail, ApiError>;

    async fn create_comment(&self, thread_id: &str, content: &str) -> Result<Comment, ApiError>;

    async fn vote_thread(&self, thread_id: &str, vote: VoteType) -> Result<VoteRecord, ApiError>;

    async fn vote_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
        vote: VoteType,
    ) -> Result<VoteRecord, ApiError>;

    async fn leaderboards(&self) -> Result<Vec<LeaderboardEntry>, ApiError>;
}
