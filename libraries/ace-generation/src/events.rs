//! Generation Events
//!
//! Everything the surrounding UI needs to react to, delivered over the
//! channel returned by [`GenerationOrchestrator::new`](crate::GenerationOrchestrator::new).

use ace_core::{GenerationStatus, JobId, StudioError, TrackId};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Events emitted by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// The backend accepted a job and its poller is running
    JobStarted { job_id: JobId, track_id: TrackId },

    /// A poll refreshed the placeholder
    ProgressUpdated {
        job_id: JobId,
        track_id: TrackId,
        status: GenerationStatus,
    },

    /// A job produced its result; its placeholder is gone
    JobSucceeded { job_id: JobId, track_id: TrackId },

    /// The backend reported failure, or polling hit a transport error
    JobFailed {
        job_id: JobId,
        track_id: TrackId,
        message: String,
    },

    /// No terminal status before the ceiling
    JobTimedOut { job_id: JobId, track_id: TrackId },

    /// The initial submission request failed; no job was created
    SubmissionFailed { track_id: TrackId, error: StudioError },

    /// An operation needs a signed-in session
    AuthRequired,

    /// The global "generation in progress" flag flipped
    GeneratingChanged { generating: bool },

    /// The track list was merged with the backend's
    TracksReconciled { count: usize },

    /// Compact layouts should switch to the track list
    RevealTrackList,

    /// Transient message for the user
    Notification {
        message: String,
        level: NotificationLevel,
    },
}

impl GenerationEvent {
    pub(crate) fn notify(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self::Notification {
            message: message.into(),
            level,
        }
    }
}
