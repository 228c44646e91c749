//! HTTP Forum API Client
//!
//! `reqwest` implementation of [`ForumApi`]. Every response is unwrapped
//! from its `{ status, message, data }` envelope; non-2xx responses are
//! turned into [`ApiError::Status`] carrying the server's message.

use crate::client::api::{ApiError, ForumApi};
use crate::shared::config::AppConfig;
use crate::shared::forum::{
    ApiEnvelope, Comment, CommentData, ErrorBody, LeaderboardEntry, LeaderboardsData,
    LoginRequest, NewComment, NewThread, RegisterRequest, Thread, ThreadData, ThreadDetail,
    ThreadDetailData, ThreadsData, TokenData, User, UserData, VoteData, VoteRecord, VoteType,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::RwLock;

/// Forum API client over HTTP
#[derive(Debug)]
pub struct HttpForumApi {
    config: AppConfig,
    client: Client,
    token: RwLock<Option<String>>,
}

impl HttpForumApi {
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            client,
            token: RwLock::new(None),
        })
    }

    fn current_token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.api_url(path);
        let mut request = self.client.request(method, url);
        if let Some(token) = self.current_token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map(|body| body.message)
                .unwrap_or(error_text);
            tracing::debug!("[API] {} - {}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ForumApi for HttpForumApi {
    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let data: UserData = self.send(self.request(Method::POST, "/register").json(&body)).await?;
        Ok(data.user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let data: TokenData = self.send(self.request(Method::POST, "/login").json(&body)).await?;
        Ok(data.token)
    }

    async fn own_profile(&self) -> Result<User, ApiError> {
        let data: UserData = self.send(self.request(Method::GET, "/users/me")).await?;
        Ok(data.user)
    }

    async fn list_threads(&self) -> Result<Vec<Thread>, ApiError> {
        let data: ThreadsData = self.send(self.request(Method::GET, "/threads")).await?;
        Ok(data.threads)
    }

    async fn create_thread(&self, thread: &NewThread) -> Result<Thread, ApiError> {
        let data: ThreadData = self
            .send(self.request(Method::POST, "/threads").json(thread))
            .await?;
        Ok(data.thread)
    }

    async fn thread_detail(&self, thread_id: &str) -> Result<ThreadDetail, ApiError> {
        let path = format!("/threads/{}", thread_id);
        let data: ThreadDetailData = self.send(self.request(Method::GET, &path)).await?;
        Ok(data.detail_thread)
    }

    async fn create_comment(&self, thread_id: &str, content: &str) -> Result<Comment, ApiError> {
        let path = format!("/threads/{}/comments", thread_id);
        let body = NewComment {
            content: content.to_string(),
        };
        let data: CommentData = self.send(self.request(Method::POST, &path).json(&body)).await?;
        Ok(data.comment)
    }

    async fn vote_thread(&self, thread_id: &str, vote: VoteType) -> Result<VoteRecord, ApiError> {
        let path = format!("/threads/{}/{}", thread_id, vote.endpoint());
        let data: VoteData = self.send(self.request(Method::POST, &path)).await?;
        Ok(data.vote)
    }

    async fn vote_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
        vote: VoteType,
    ) -> Result<VoteRecord, ApiError> {
        let path = format!(
            "/threads/{}/comments/{}/{}",
            thread_id,
            comment_id,
            vote.endpoint()
        );
        let data: VoteData = self.send(self.request(Method::POST, &path)).await?;
        Ok(data.vote)
    }

    async fn leaderboards(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let data: LeaderboardsData = self.send(self.request(Method::GET, "/leaderboards")).await?;
        Ok(data.leaderboards)
    }
}
