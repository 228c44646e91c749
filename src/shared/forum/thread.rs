//! Thread Data Structures
//!
//! Threads as they appear in the thread list, and the thread detail
//! aggregate carrying its comments.

use super::comment::{Comment, Owner};
use super::vote::{UserId, VoteMembership};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thread as listed by `GET /threads`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: UserId,
    #[serde(flatten)]
    pub votes: VoteMembership,
    #[serde(default)]
    pub total_comments: u32,
}

/// Thread with owner and comments, from `GET /threads/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub owner: Owner,
    #[serde(flatten)]
    pub votes: VoteMembership,
    /// Server order; this client only appends
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl ThreadDetail {
    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    pub fn comment_mut(&mut self, comment_id: &str) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == comment_id)
    }
}

/// Body of `POST /threads`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewThread {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadsData {
    pub threads: Vec<Thread>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadData {
    pub thread: Thread,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDetailData {
    pub detail_thread: ThreadDetail,
}
