//! Error types for pomo.

use thiserror::Error;

use crate::features::focus::{Status, Transition};

/// Result alias used throughout the crate.
pub type Result<T, E = PomoError> = std::result::Result<T, E>;

/// Errors produced by pomo.
#[derive(Debug, Error)]
pub enum PomoError {
    /// No session exists with the requested id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested transition is not permitted from the current status.
    #[error("cannot {action} session: status is {status}")]
    InvalidTransition {
        /// The transition that was attempted.
        action: Transition,
        /// The status the session was in.
        status: Status,
    },

    /// Creation input could not be accepted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored or serialized data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PomoError {
    /// Build a `NotFound` error for a session id.
    #[must_use]
    pub fn session_not_found(id: i64) -> Self {
        Self::NotFound(format!("session {id}"))
    }

    /// Whether this error means the session does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for PomoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}
