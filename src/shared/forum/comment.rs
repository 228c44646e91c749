//! Comment Data Structure
//!
//! Represents a comment inside a thread detail.

use super::vote::{UserId, VoteMembership};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author summary embedded in thread details and comments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub owner: Owner,
    #[serde(flatten)]
    pub votes: VoteMembership,
}

/// Body of `POST /threads/{id}/comments`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentData {
    pub comment: Comment,
}
