//! Playback Events
//!
//! Queued by the controller at each observable change and drained by the
//! UI with [`PlaybackController::drain_events`](crate::PlaybackController::drain_events).

use crate::types::PlaybackState;
use ace_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged { state: PlaybackState },

    /// A different track became current
    TrackChanged {
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
    },

    /// The playhead was moved (immediately or from the seek buffer)
    SeekApplied { position: f64 },

    /// Position reported by the media element
    PositionUpdate { position: f64, duration: Option<f64> },

    /// The active queue was replaced or shrank
    QueueChanged { length: usize },

    /// User-facing message
    Notification { message: String },
}
