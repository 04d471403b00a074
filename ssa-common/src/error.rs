//! Error types for remote scoring-service calls

use thiserror::Error;

/// Result type for remote scoring-service operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failures surfaced by the remote analysis client
///
/// Every failure carries a single human-readable message so the store can
/// record it in its shared error slot, while the variant keeps the
/// transport/server/not-found distinction available to callers that need it.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network unreachable, connection refused, or request timeout
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response with a message extracted from the body
    #[error("Server error {0}: {1}")]
    Server(u16, String),

    /// Identity-not-found variant of a server failure (HTTP 404)
    #[error("{0}")]
    NotFound(String),
}

impl ClientError {
    /// Message form stored in the shared error slot
    pub fn message(&self) -> String {
        match self {
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Server(_, msg) => msg.clone(),
            ClientError::NotFound(msg) => msg.clone(),
        }
    }

    /// HTTP status associated with the failure, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport(_) => None,
            ClientError::Server(status, _) => Some(*status),
            ClientError::NotFound(_) => Some(404),
        }
    }
}
