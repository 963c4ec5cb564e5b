/// Generation job wire types
use super::{parse_timestamp, GenerationParams, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-reported state of a generation job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Queued,
    Running,
    Succeeded,
    Failed,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Whether a job in this state is still in flight
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Queued | Self::Running)
    }
}

/// Response of `POST /api/generate`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_id: JobId,
    #[serde(default)]
    pub status: Option<JobState>,
    #[serde(default)]
    pub queue_position: Option<u32>,
}

/// Result payload of a succeeded job
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationResult {
    pub audio_urls: Vec<String>,
    pub duration: Option<f64>,
    pub bpm: Option<f64>,
    pub key_scale: Option<String>,
    pub time_signature: Option<String>,
}

/// Response of `GET /api/generate/status/{jobId}`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    #[serde(default)]
    pub job_id: Option<JobId>,
    pub status: JobState,
    #[serde(default)]
    pub queue_position: Option<u32>,
    #[serde(default)]
    pub eta_seconds: Option<f64>,
    /// Raw progress: a fraction, a percentage, or occasionally a numeric string
    #[serde(default)]
    pub progress: Option<serde_json::Value>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub result: Option<GenerationResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl JobStatusResponse {
    /// Progress normalized into a fraction.
    ///
    /// Values above 1 are percentages and get divided by 100. Missing or
    /// non-numeric progress yields `None` so the caller keeps the last value.
    pub fn normalized_progress(&self) -> Option<f64> {
        let raw = match self.progress.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64()?,
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if !raw.is_finite() {
            return None;
        }
        Some(if raw > 1.0 { raw / 100.0 } else { raw })
    }
}

/// One entry of `GET /api/generate/history`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobRecord {
    #[serde(default)]
    pub id: Option<JobId>,
    #[serde(default, rename = "jobId")]
    pub job_id: Option<JobId>,
    pub status: JobState,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl JobRecord {
    /// The job's identity, whichever field carried it
    pub fn job_id(&self) -> Option<&JobId> {
        self.id.as_ref().or(self.job_id.as_ref())
    }

    /// Parameters the job was submitted with (defaults when unreadable)
    pub fn params(&self) -> GenerationParams {
        GenerationParams::from_stored(self.params.as_ref())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}
