//! Types for Ace Studio API requests and responses.

use ace_core::types::{JobRecord, RemoteTrack};
use serde::Deserialize;

/// Configuration for connecting to an Ace Studio server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "http://localhost:3001")
    pub url: String,
}

impl ServerConfig {
    /// Create a server config for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

// =============================================================================
// Response envelopes
// =============================================================================

/// Response of `GET /api/generate/history`.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

/// Response of `GET /api/songs`.
#[derive(Debug, Deserialize)]
pub(crate) struct SongsResponse {
    #[serde(default)]
    pub songs: Vec<RemoteTrack>,
}

/// Response of `POST /api/songs/{id}/like`.
#[derive(Debug, Deserialize)]
pub(crate) struct LikeResponse {
    pub liked: bool,
}

/// Response of `POST /api/songs/{id}/play`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayResponse {
    #[serde(default)]
    pub view_count: u32,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
