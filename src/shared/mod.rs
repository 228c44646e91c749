//! Shared Module
//!
//! Types that do not depend on any transport or runtime: the forum data
//! model, vote reconciliation, form validation, shared errors and the
//! application configuration.
//!
//! # Overview
//!
//! Everything here is plain data plus pure functions, so it can be used by
//! the stateful client, the CLI, and tests alike.

/// Forum data model (threads, comments, users, votes)
pub mod forum;

/// Form validation rules
pub mod validation;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use forum::{
    reconcile, Comment, LeaderboardEntry, Thread, ThreadDetail, User, VoteDirection, VoteIntent,
    VoteMembership, VoteType,
};
