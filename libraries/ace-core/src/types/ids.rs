/// ID types for Ace Studio entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const TEMP_PREFIX: &str = "temp_";
const JOB_PREFIX: &str = "job_";

/// Track identifier
///
/// Server-assigned ids are opaque strings. Placeholders for in-flight
/// generations carry a local prefix so they can never collide with them:
/// `temp_` for fresh submissions and `job_` for placeholders rebuilt from
/// the job history (derived from the job id, so rebuilding is idempotent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a track ID from a server-assigned value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, locally-unique placeholder ID
    pub fn placeholder() -> Self {
        Self(format!("{}{}", TEMP_PREFIX, Uuid::new_v4().simple()))
    }

    /// Deterministic placeholder ID for a resumed job
    pub fn for_job(job_id: &JobId) -> Self {
        Self(format!("{}{}", JOB_PREFIX, job_id.as_str()))
    }

    /// Whether this ID was generated locally for an in-flight job
    pub fn is_placeholder(&self) -> bool {
        self.0.starts_with(TEMP_PREFIX) || self.0.starts_with(JOB_PREFIX)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Generation job identifier (server-assigned)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
