//! Error types for search session operations

use thiserror::Error;

/// Message shown when a search request fails in transport or on the server.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Search failed. The index may not be built yet or the server is unreachable.";

/// Message shown when `submit` is called with a blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

/// Failures absorbed at the session boundary.
///
/// None of these propagate out of the event loop; they are turned into the
/// session's `Error` loading state and a user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Invalid page size {size}: must be one of 10, 20, 50")]
    InvalidPageSize { size: u32 },

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl SessionError {
    pub fn empty_query() -> Self {
        SessionError::Validation {
            reason: "empty query".to_string(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        SessionError::Transport {
            message: message.into(),
        }
    }

    /// Text suitable for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Validation { .. } => EMPTY_QUERY_MESSAGE.to_string(),
            SessionError::InvalidPageSize { .. } => self.to_string(),
            SessionError::Transport { .. } => SEARCH_FAILED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_per_variant() {
        assert_eq!(SessionError::empty_query().user_message(), EMPTY_QUERY_MESSAGE);
        assert_eq!(
            SessionError::transport("connection refused").user_message(),
            SEARCH_FAILED_MESSAGE
        );
        assert_eq!(
            SessionError::InvalidPageSize { size: 15 }.user_message(),
            "Invalid page size 15: must be one of 10, 20, 50"
        );
    }
}
