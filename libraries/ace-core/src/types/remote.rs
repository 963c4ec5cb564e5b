/// Resolved track as returned by the backend
use super::{format_duration, parse_timestamp, Track, TrackId, TrackMedia};
use serde::{Deserialize, Serialize};

/// A track as returned by `GET /api/songs`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteTrack {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub like_count: Option<u32>,
    #[serde(default)]
    pub view_count: Option<u32>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<RemoteTrack> for Track {
    fn from(remote: RemoteTrack) -> Self {
        let media = match remote.audio_url {
            Some(url) if !url.is_empty() => TrackMedia::Ready { audio_url: url },
            _ => TrackMedia::Unavailable,
        };

        let duration_secs = remote.duration.filter(|d| d.is_finite() && *d > 0.0);

        Track {
            id: TrackId::new(remote.id),
            title: remote.title,
            lyrics: remote.lyrics.unwrap_or_default(),
            style: remote.style.unwrap_or_default(),
            tags: remote.tags.unwrap_or_default(),
            media,
            duration: format_duration(duration_secs),
            duration_secs,
            // Unparseable timestamps sort last (epoch)
            created_at: remote
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_default(),
            is_public: remote.is_public,
            like_count: remote.like_count.unwrap_or(0),
            view_count: remote.view_count.unwrap_or(0),
            user_id: remote.user_id,
            creator: remote.creator,
        }
    }
}
