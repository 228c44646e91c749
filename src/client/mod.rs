//! Forum Client Module
//!
//! The stateful side of the forum client: talks to the forum API, holds
//! confirmed state, and layers optimistic votes on top of it.
//!
//! # Architecture
//!
//! - **`config`** - Configuration from the environment plus the session token
//! - **`api`** - The `ForumApi` trait every backend implements
//! - **`http`** - `reqwest` implementation of `ForumApi`
//! - **`store`** - Confirmed state behind a `watch` channel
//! - **`votes`** - Optimistic overlay and per-entity vote controllers
//! - **`notify`** - Success/error notifications
//! - **`forum`** - The `ForumClient` facade running every flow
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs     - Module exports and documentation
//! ├── config.rs  - Configuration management
//! ├── api.rs     - API trait and errors
//! ├── http.rs    - HTTP API client
//! ├── store.rs   - Entity state store
//! ├── votes.rs   - Optimistic voting
//! ├── notify.rs  - Notifications
//! ├── error.rs   - Client errors
//! └── forum.rs   - Facade
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use forum_client::client::{Config, ForumClient};
//! use forum_client::shared::VoteDirection;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ForumClient::new(Config::from_env()?)?;
//! client.load_threads().await?;
//! client.thread_votes("thread-1").vote(Some("user-1"), VoteDirection::Up).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod forum;
pub mod http;
pub mod notify;
pub mod store;
pub mod votes;

// Re-export commonly used types
pub use api::{ApiError, ForumApi};
pub use config::Config;
pub use error::ClientError;
pub use forum::ForumClient;
pub use http::HttpForumApi;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use store::{EntityRef, EntityStore, ForumState};
pub use votes::{OptimisticLayer, PendingConfirmation, VoteController, VoteError};
