//! Orchestrator configuration

use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Orchestrator timing and limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Delay between two status checks of the same job
    pub poll_interval_ms: u64,

    /// Ceiling after which a job without terminal status is torn down
    pub job_timeout_ms: u64,

    /// Narrow layouts reveal the track list once a job succeeds
    pub compact_layout: bool,

    /// Upper bound for a single bulk submission
    pub max_bulk_count: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2_000,
            job_timeout_ms: 600_000,
            compact_layout: false,
            max_bulk_count: 10,
        }
    }
}

impl GenerationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn job_timeout(&self) -> Duration {
        Duration::from_millis(self.job_timeout_ms)
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(GenerationError::InvalidConfig(
                "poll_interval_ms must be greater than 0".into(),
            ));
        }
        if self.job_timeout_ms < self.poll_interval_ms {
            return Err(GenerationError::InvalidConfig(format!(
                "job_timeout_ms ({}) must not be shorter than poll_interval_ms ({})",
                self.job_timeout_ms, self.poll_interval_ms
            )));
        }
        if self.max_bulk_count == 0 {
            return Err(GenerationError::InvalidConfig(
                "max_bulk_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
