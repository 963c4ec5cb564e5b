//! Song endpoints.

use crate::client::{error_from_response, read_json, send};
use crate::error::Result;
use crate::types::{LikeResponse, PlayResponse, SongsResponse};
use ace_core::types::{RemoteTrack, TrackId};
use reqwest::Client;
use tracing::debug;

/// Client for `/api/songs`.
pub struct SongsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get the caller's resolved tracks.
    pub async fn list_my_songs(&self, token: &str) -> Result<Vec<RemoteTrack>> {
        let url = format!("{}/api/songs", self.base_url);
        debug!(url = %url, "Fetching songs");

        let response = send(self.http.get(&url).bearer_auth(token)).await?;
        let songs: SongsResponse = read_json(response, "songs").await?;

        debug!(tracks = songs.songs.len(), "Fetched songs");
        Ok(songs.songs)
    }

    /// Toggle the caller's like; returns the new state.
    pub async fn toggle_like(&self, track_id: &TrackId, token: &str) -> Result<bool> {
        let url = format!("{}/api/songs/{}/like", self.base_url, track_id);
        debug!(url = %url, track_id = %track_id, "Toggling like");

        let response = send(self.http.post(&url).bearer_auth(token)).await?;
        let like: LikeResponse = read_json(response, "like").await?;
        Ok(like.liked)
    }

    /// Record a play; works signed out too.
    pub async fn track_play(&self, track_id: &TrackId, token: Option<&str>) -> Result<u32> {
        let url = format!("{}/api/songs/{}/play", self.base_url, track_id);
        debug!(url = %url, track_id = %track_id, "Recording play");

        let mut request = self.http.post(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = send(request).await?;
        let play: PlayResponse = read_json(response, "play").await?;
        Ok(play.view_count)
    }

    /// Delete a track.
    pub async fn delete(&self, track_id: &TrackId, token: &str) -> Result<()> {
        let url = format!("{}/api/songs/{}", self.base_url, track_id);
        debug!(url = %url, track_id = %track_id, "Deleting track");

        let response = send(self.http.delete(&url).bearer_auth(token)).await?;
        let status = response.status();

        if status.is_success() {
            debug!(track_id = %track_id, "Track deleted");
            Ok(())
        } else if status.as_u16() == 404 {
            // Already deleted, that's fine
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}
