//! Error types for playback control

use ace_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Nothing is playing or selected
    #[error("No track selected")]
    NoTrackSelected,

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// The current track is no longer part of the queue
    #[error("Track not in queue: {0}")]
    TrackNotInQueue(TrackId),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
