//! Error handling for restack.

use thiserror::Error;

/// Error type used throughout the restack workspace.
///
/// The analysis pipeline itself never fails: unclassifiable files fall back
/// to `FileCategory::Trash` and unparsable sources degrade to an empty import
/// list. These variants cover the boundary layers only (scanner, executor,
/// history log).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RestackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Repository path is not a directory: {path}")]
    InvalidRepoPath { path: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("History log error: {message}")]
    History { message: String },
}

impl RestackError {
    /// Create a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new history log error.
    pub fn history(message: impl Into<String>) -> Self {
        Self::History {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience.
pub type RestackResult<T> = Result<T, RestackError>;
