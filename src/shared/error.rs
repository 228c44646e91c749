//! Shared Error Types
//!
//! Errors that can occur independently of any transport. Today that is
//! form validation: a rejected field and the message to show next to it.
//!
//! # Usage
//!
//! ```rust
//! use forum_client::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Judul thread minimal 3 karakter.");
//! assert_eq!(error.field(), "title");
//! ```
use thiserror::Error;

/// Errors shared by every client surface
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Form field validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// User-facing message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the rejected field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
