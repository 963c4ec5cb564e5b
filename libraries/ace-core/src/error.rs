/// Core error types for Ace Studio
use thiserror::Error;

/// Result type alias using `StudioError`
pub type Result<T> = std::result::Result<T, StudioError>;

/// Core error type for Ace Studio
///
/// Mirrors the failure taxonomy every layer agrees on: the HTTP client maps
/// its transport errors into these variants, the orchestrator isolates them
/// per job, and the playback controller reports media faults through them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StudioError {
    /// Operation attempted without an authenticated session
    #[error("Authentication required")]
    AuthRequired,

    /// Request rejected as malformed
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Network failure or non-success response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with an error status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Backend reported the generation job as failed
    #[error("Generation failed: {0}")]
    JobFailed(String),

    /// No terminal status observed before the ceiling timer fired
    #[error("Generation timed out")]
    JobTimedOut,

    /// Media asset cannot be played
    #[error("Playback unsupported: {0}")]
    PlaybackUnsupported(String),

    /// Any other media fault
    #[error("Playback error: {0}")]
    PlaybackTransient(String),
}

impl StudioError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error came from the network layer (including error statuses)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Server { .. } | Self::Parse(_))
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
