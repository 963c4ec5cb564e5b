//! Job Poller
//!
//! Each accepted job runs one poll task: a fixed-interval status check
//! raced against a hard ceiling. Every response goes through [`evaluate`],
//! a pure transition from the placeholder's previous status to the next
//! one plus a verdict, so the loop itself only moves data around.

use crate::orchestrator::Shared;
use ace_core::{
    GenerationResult, GenerationStatus, JobId, JobState, JobStatusResponse, StudioError, TrackId,
};
use std::sync::Arc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Message used when the backend fails a job without saying why
pub const UNKNOWN_FAILURE: &str = "Unknown error";

/// What a single status response means for the job
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Keep polling
    Continue,

    /// Terminal success with its result payload
    Succeeded(GenerationResult),

    /// Terminal failure with the server's message
    Failed(String),
}

/// Result of applying one status response
#[derive(Debug, Clone, PartialEq)]
pub struct PollTick {
    /// Placeholder status after the response
    pub status: GenerationStatus,
    pub verdict: Verdict,
}

/// Apply a status response to the placeholder's previous status.
///
/// - the queue position is only kept while the job is `queued`
/// - progress is normalized; a missing or malformed value keeps the previous one
/// - a missing stage keeps the previous stage
/// - `succeeded` only counts once the result payload is present
pub fn evaluate(previous: &GenerationStatus, response: &JobStatusResponse) -> PollTick {
    let queue_position = if response.status == JobState::Queued {
        response.queue_position
    } else {
        None
    };

    let progress = response
        .normalized_progress()
        .map_or(previous.progress, |p| p.clamp(0.0, 1.0));

    let stage = response.stage.clone().or_else(|| previous.stage.clone());

    let verdict = match response.status {
        JobState::Succeeded => match &response.result {
            Some(result) => Verdict::Succeeded(result.clone()),
            None => Verdict::Continue,
        },
        JobState::Failed => Verdict::Failed(
            response
                .error
                .clone()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
        ),
        _ => Verdict::Continue,
    };

    PollTick {
        status: GenerationStatus {
            queue_position,
            progress,
            stage,
        },
        verdict,
    }
}

/// How a job's lifecycle ended
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum JobOutcome {
    Succeeded(GenerationResult),
    Failed(String),
    /// The status call itself failed
    Unreachable(StudioError),
    TimedOut,
}

/// Poll loop of a single job
pub(crate) struct JobPoller {
    pub(crate) shared: Arc<Shared>,
    pub(crate) job_id: JobId,
    pub(crate) track_id: TrackId,
    pub(crate) token: String,
}

impl JobPoller {
    pub(crate) async fn run(self) {
        let period = self.shared.config.poll_interval();
        let mut ticks = time::interval_at(Instant::now() + period, period);
        // Ticks of one job never overlap
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let ceiling = time::sleep(self.shared.config.job_timeout());
        tokio::pin!(ceiling);

        let outcome = loop {
            tokio::select! {
                biased;
                () = &mut ceiling => break JobOutcome::TimedOut,
                _ = ticks.tick() => {}
            }

            if self.shared.is_closed() {
                return;
            }

            debug!(job_id = %self.job_id, "Polling job status");
            let response = tokio::select! {
                biased;
                () = &mut ceiling => break JobOutcome::TimedOut,
                response = self.shared.api.job_status(&self.job_id, &self.token) => response,
            };

            match response {
                Ok(response) => {
                    let previous = self
                        .shared
                        .generation_status(&self.track_id)
                        .unwrap_or_default();
                    let tick = evaluate(&previous, &response);
                    self.shared
                        .update_progress(&self.job_id, &self.track_id, tick.status);

                    match tick.verdict {
                        Verdict::Continue => {}
                        Verdict::Succeeded(result) => break JobOutcome::Succeeded(result),
                        Verdict::Failed(message) => break JobOutcome::Failed(message),
                    }
                }
                Err(err) => break JobOutcome::Unreachable(err),
            }
        };

        self.shared
            .finish_job(&self.job_id, &self.track_id, outcome)
            .await;
    }
}
