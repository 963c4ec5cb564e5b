//! Main Ace Studio server client.

use crate::error::{Result, ServerClientError};
use crate::generate::GenerateClient;
use crate::songs::SongsClient;
use crate::types::{ErrorBody, ServerConfig};
use ace_core::types::{
    GenerationParams, JobId, JobRecord, JobStatusResponse, RemoteTrack, SubmitResponse, TrackId,
};
use ace_core::StudioApi;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Main client for interacting with an Ace Studio server.
///
/// Holds the pooled HTTP client and the normalized base URL, and hands
/// out borrowed sub-clients for the generation and songs endpoints.
///
/// # Example
///
/// ```ignore
/// use ace_server_client::{AceServerClient, ServerConfig};
///
/// let client = AceServerClient::new(ServerConfig::new("http://localhost:3001"))?;
/// let history = client.generate().history(&token).await?;
/// println!("{} jobs", history.len());
/// ```
pub struct AceServerClient {
    http: Client,
    base_url: String,
}

impl AceServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("AceStudio/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Client for the generation endpoints.
    pub fn generate(&self) -> GenerateClient<'_> {
        GenerateClient::new(&self.http, &self.base_url)
    }

    /// Client for the songs endpoints.
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(&self.http, &self.base_url)
    }
}

#[async_trait]
impl StudioApi for AceServerClient {
    async fn submit_generation(
        &self,
        params: &GenerationParams,
        token: &str,
    ) -> ace_core::Result<SubmitResponse> {
        Ok(self.generate().submit(params, token).await?)
    }

    async fn job_status(&self, job_id: &JobId, token: &str) -> ace_core::Result<JobStatusResponse> {
        Ok(self.generate().status(job_id, token).await?)
    }

    async fn job_history(&self, token: &str) -> ace_core::Result<Vec<JobRecord>> {
        Ok(self.generate().history(token).await?)
    }

    async fn list_my_tracks(&self, token: &str) -> ace_core::Result<Vec<RemoteTrack>> {
        Ok(self.songs().list_my_songs(token).await?)
    }

    async fn toggle_like(&self, track_id: &TrackId, token: &str) -> ace_core::Result<bool> {
        Ok(self.songs().toggle_like(track_id, token).await?)
    }

    async fn track_play(&self, track_id: &TrackId, token: Option<&str>) -> ace_core::Result<u32> {
        Ok(self.songs().track_play(track_id, token).await?)
    }

    async fn delete_track(&self, track_id: &TrackId, token: &str) -> ace_core::Result<()> {
        Ok(self.songs().delete(track_id, token).await?)
    }
}

/// Send a request, classifying connection failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ServerClientError::ServerUnreachable(e.to_string())
        } else {
            ServerClientError::Request(e)
        }
    })
}

/// Decode a success body, or turn an error status into a client error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if response.status().is_success() {
        response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    } else {
        Err(error_from_response(response).await)
    }
}

/// Build the error for a non-success response.
///
/// The message comes from the `{ error }` or `{ message }` body when present.
pub(crate) async fn error_from_response(response: Response) -> ServerClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = body
        .error
        .or(body.message)
        .unwrap_or_else(|| if text.is_empty() { "Request failed".to_string() } else { text });

    match status {
        401 => ServerClientError::AuthRequired,
        400 | 422 => ServerClientError::InvalidRequest(message),
        _ => ServerClientError::ServerError { status, message },
    }
}
