/// Core traits for Ace Studio
use crate::error::Result;
use crate::types::{
    GenerationParams, JobId, JobRecord, JobStatusResponse, RemoteTrack, SubmitResponse, TrackId,
};
use async_trait::async_trait;

/// Studio backend
///
/// Everything the orchestrator needs from the server. The HTTP client in
/// `ace-server-client` implements it; tests substitute scripted fakes.
///
/// Implementations map their failures into the shared taxonomy: a missing
/// or rejected token is `AuthRequired`, a malformed request is `Validation`,
/// anything else at the network layer is `Transport`/`Server`/`Parse`.
#[async_trait]
pub trait StudioApi: Send + Sync {
    /// Submit one generation request
    async fn submit_generation(
        &self,
        params: &GenerationParams,
        token: &str,
    ) -> Result<SubmitResponse>;

    /// Query the status of a job
    async fn job_status(&self, job_id: &JobId, token: &str) -> Result<JobStatusResponse>;

    /// The caller's recent jobs, newest first
    async fn job_history(&self, token: &str) -> Result<Vec<JobRecord>>;

    /// The caller's resolved tracks (authoritative list for reconciliation)
    async fn list_my_tracks(&self, token: &str) -> Result<Vec<RemoteTrack>>;

    /// Toggle the caller's like on a track; returns the new liked state
    async fn toggle_like(&self, track_id: &TrackId, token: &str) -> Result<bool>;

    /// Record a play; returns the server's view count
    async fn track_play(&self, track_id: &TrackId, token: Option<&str>) -> Result<u32>;

    /// Delete one of the caller's tracks
    async fn delete_track(&self, track_id: &TrackId, token: &str) -> Result<()>;
}
