/// Generation error types
use ace_core::{StudioError, TrackId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error(transparent)]
    Studio(#[from] StudioError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Bulk count must be between 1 and {max}, got {requested}")]
    InvalidBulkCount { requested: u32, max: u32 },

    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    #[error("Orchestrator has been shut down")]
    ShutDown,
}

impl GenerationError {
    /// Whether the caller has to sign in first
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::Studio(StudioError::AuthRequired))
    }
}
