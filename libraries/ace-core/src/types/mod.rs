/// Domain and wire types for Ace Studio
mod ids;
mod job;
mod params;
mod remote;
mod track;

pub use ids::{JobId, TrackId};
pub use job::{GenerationResult, JobRecord, JobState, JobStatusResponse, SubmitResponse};
pub use params::GenerationParams;
pub use remote::RemoteTrack;
pub use track::{format_duration, GenerationStatus, Track, TrackMedia};

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a timestamp as sent by the backend.
///
/// Accepts RFC 3339 as well as SQLite's `YYYY-MM-DD HH:MM:SS` (UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
