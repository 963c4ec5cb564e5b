//! Generation job endpoints.

use crate::client::{read_json, send};
use crate::error::Result;
use crate::types::HistoryResponse;
use ace_core::types::{GenerationParams, JobId, JobRecord, JobStatusResponse, SubmitResponse};
use reqwest::Client;
use tracing::debug;

/// Client for `/api/generate`.
pub struct GenerateClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> GenerateClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Submit a generation request.
    pub async fn submit(&self, params: &GenerationParams, token: &str) -> Result<SubmitResponse> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(url = %url, title = %params.title, "Submitting generation");

        let response = send(self.http.post(&url).bearer_auth(token).json(params)).await?;
        let accepted: SubmitResponse = read_json(response, "submit").await?;

        debug!(job_id = %accepted.job_id, "Generation accepted");
        Ok(accepted)
    }

    /// Get the current status of a job.
    pub async fn status(&self, job_id: &JobId, token: &str) -> Result<JobStatusResponse> {
        let url = format!(
            "{}/api/generate/status/{}",
            self.base_url,
            urlencoding::encode(job_id.as_str())
        );
        debug!(url = %url, job_id = %job_id, "Polling job status");

        let response = send(self.http.get(&url).bearer_auth(token)).await?;
        read_json(response, "status").await
    }

    /// Get the caller's recent jobs.
    pub async fn history(&self, token: &str) -> Result<Vec<JobRecord>> {
        let url = format!("{}/api/generate/history", self.base_url);
        debug!(url = %url, "Fetching job history");

        let response = send(self.http.get(&url).bearer_auth(token)).await?;
        let history: HistoryResponse = read_json(response, "history").await?;

        debug!(jobs = history.jobs.len(), "Fetched job history");
        Ok(history.jobs)
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
