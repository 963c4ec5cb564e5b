//! Error types for the Ace Studio client.

use ace_core::StudioError;
use thiserror::Error;

/// Errors that can occur when talking to the Ace Studio server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required or token rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Server rejected the request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for StudioError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::AuthRequired => StudioError::AuthRequired,
            ServerClientError::InvalidRequest(msg) => StudioError::Validation(msg),
            ServerClientError::ServerError { status, message } => {
                StudioError::Server { status, message }
            }
            ServerClientError::ParseError(msg) => StudioError::Parse(msg),
            ServerClientError::Request(e) => StudioError::Transport(e.to_string()),
            ServerClientError::ServerUnreachable(msg) | ServerClientError::InvalidUrl(msg) => {
                StudioError::Transport(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_into_core_taxonomy() {
        assert_eq!(
            StudioError::from(ServerClientError::AuthRequired),
            StudioError::AuthRequired
        );
        assert_eq!(
            StudioError::from(ServerClientError::InvalidRequest("title too long".into())),
            StudioError::Validation("title too long".into())
        );
        assert!(StudioError::from(ServerClientError::ServerUnreachable("refused".into()))
            .is_transport());
        assert!(StudioError::from(ServerClientError::ServerError {
            status: 500,
            message: "boom".into()
        })
        .is_transport());
    }
}
