/// Track domain type
use super::{GenerationParams, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label shown on a placeholder until the user supplied a title
pub const GENERATING_TITLE: &str = "Generating...";

/// Duration label of a placeholder
pub const PENDING_DURATION: &str = "--:--";

/// Progress report of an in-flight generation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationStatus {
    /// Position in the backend queue (only while queued)
    pub queue_position: Option<u32>,

    /// Normalized progress in `0.0..=1.0`
    pub progress: f64,

    /// Backend stage label (e.g. "diffusion")
    pub stage: Option<String>,
}

/// Playable state of a track
///
/// A track is either still generating (no media, status present) or
/// resolved. Resolved tracks normally carry a media URL; a resolved track
/// the backend returned without one is `Unavailable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackMedia {
    /// Placeholder for an in-flight job
    Generating(GenerationStatus),

    /// Resolved track with playable media
    Ready { audio_url: String },

    /// Resolved track without playable media
    Unavailable,
}

/// Generated (or generating) audio track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Lyrics (empty for instrumentals and placeholders)
    pub lyrics: String,

    /// Free-text style description
    pub style: String,

    /// Tags
    pub tags: Vec<String>,

    /// Media reference or generation status
    pub media: TrackMedia,

    /// Duration as display string (`m:ss`, or `--:--` while generating)
    pub duration: String,

    /// Duration in seconds, when known
    pub duration_secs: Option<f64>,

    /// When the track (or its job) was created
    pub created_at: DateTime<Utc>,

    /// Whether the track is public
    pub is_public: bool,

    /// Like counter
    pub like_count: u32,

    /// Play counter
    pub view_count: u32,

    /// Owning user ID
    pub user_id: Option<String>,

    /// Owning user display name
    pub creator: Option<String>,
}

impl Track {
    /// Synthesize a placeholder from the request parameters.
    ///
    /// Resumed jobs pass their stored creation time so the list keeps its
    /// order across reloads.
    pub fn placeholder(
        id: TrackId,
        params: &GenerationParams,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        let title = if params.title.trim().is_empty() {
            GENERATING_TITLE.to_string()
        } else {
            params.title.clone()
        };

        let style = if params.style.trim().is_empty() {
            params.song_description.clone().unwrap_or_default()
        } else {
            params.style.clone()
        };

        let tag = if params.custom_mode { "custom" } else { "simple" };

        Self {
            id,
            title,
            lyrics: String::new(),
            style,
            tags: vec![tag.to_string()],
            media: TrackMedia::Generating(GenerationStatus::default()),
            duration: PENDING_DURATION.to_string(),
            duration_secs: None,
            created_at: created_at.unwrap_or_else(Utc::now),
            is_public: true,
            like_count: 0,
            view_count: 0,
            user_id: None,
            creator: None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.media, TrackMedia::Generating(_))
    }

    /// Playable media URL, if the track is resolved and has one
    pub fn audio_url(&self) -> Option<&str> {
        match &self.media {
            TrackMedia::Ready { audio_url } => Some(audio_url),
            _ => None,
        }
    }

    pub fn generation(&self) -> Option<&GenerationStatus> {
        match &self.media {
            TrackMedia::Generating(status) => Some(status),
            _ => None,
        }
    }

    pub fn generation_mut(&mut self) -> Option<&mut GenerationStatus> {
        match &mut self.media {
            TrackMedia::Generating(status) => Some(status),
            _ => None,
        }
    }
}

/// Render a duration in seconds as `m:ss`
///
/// Missing, non-finite or non-positive durations render as `0:00`.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) if secs.is_finite() && secs > 0.0 => {
            let whole = secs.floor() as u64;
            format!("{}:{:02}", whole / 60, whole % 60)
        }
        _ => "0:00".to_string(),
    }
}
