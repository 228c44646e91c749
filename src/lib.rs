//! Forum Client - Main Library
//!
//! Client for a discussion forum API with instant, optimistic voting on
//! threads and comments.
//!
//! # Overview
//!
//! This library provides:
//! - The forum data model and the pure vote reconciliation function
//! - A confirmed-state store with a subscribe contract
//! - An optimistic vote overlay that reverts on failure
//! - Form validation, authentication and page loading flows
//!
//! # Module Structure
//!
//! - **`shared`** - Transport-independent types
//!   - Threads, comments, users, votes
//!   - Validation rules, shared errors, configuration
//!
//! - **`client`** - Stateful client
//!   - `ForumApi` trait and its HTTP implementation
//!   - `EntityStore`, `OptimisticLayer`, `VoteController`
//!   - `ForumClient` facade
//!
//! # Usage
//!
//! ```rust,no_run
//! use forum_client::client::{Config, ForumClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ForumClient::new(Config::from_env()?)?;
//! client.load_threads().await?;
//! let state = client.state();
//! println!("{} threads", state.threads.threads.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - **Store**: `watch::Sender` holds confirmed state; readers borrow or subscribe
//! - **Overlay**: short `Mutex` sections, never held across an await
//! - **Notifications**: `broadcast::Sender`

/// Shared types and data structures
pub mod shared;

/// Stateful forum client
pub mod client;

/// Debug-build invariant checks
pub mod debug;
