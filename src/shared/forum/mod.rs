//! Forum Module
//!
//! Data structures exchanged with the forum API:
//!
//! - `Thread` / `ThreadDetail` - discussion threads
//! - `Comment` - a comment inside a thread detail
//! - `User` / `LeaderboardEntry` - users and their activity score
//! - `VoteMembership` / `VoteIntent` - who voted which way, and vote reconciliation
//!
//! # Usage
//!
//! ```rust
//! use forum_client::shared::forum::{Thread, Comment, VoteMembership, reconcile};
//! ```

pub mod comment;
pub mod envelope;
pub mod thread;
pub mod user;
pub mod vote;

// Re-export all types
pub use comment::{Comment, CommentData, NewComment, Owner};
pub use envelope::{ApiEnvelope, ErrorBody};
pub use thread::{NewThread, Thread, ThreadData, ThreadDetail, ThreadDetailData, ThreadsData};
pub use user::{
    LeaderboardEntry, LeaderboardsData, LoginRequest, RegisterRequest, TokenData, User, UserData,
};
pub use vote::{
    reconcile, UserId, VoteData, VoteDirection, VoteIntent, VoteMembership, VoteRecord, VoteType,
};
