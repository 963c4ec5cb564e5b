//! Job Registry
//!
//! Bookkeeping for in-flight generation jobs. The registry owns every poll
//! task handle and is the only place that cancels them; it does no I/O and
//! no timing of its own.

use ace_core::{JobId, TrackId};
use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a running poll task
///
/// Aborting the task drops its interval and ceiling timers with it, so a
/// cancelled job can never reach the network again.
#[derive(Debug)]
pub struct PollHandle(JoinHandle<()>);

impl PollHandle {
    /// Spawn a poll task on the current runtime
    pub fn spawn<F>(task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(task))
    }

    /// Cancel the task
    pub fn cancel(self) {
        self.0.abort();
    }

    /// Whether the task has stopped (finished or cancelled)
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// A registered job
#[derive(Debug)]
pub struct ActiveJob {
    /// Placeholder track the job reports into
    pub placeholder_id: TrackId,
    handle: PollHandle,
}

/// Set of in-flight jobs keyed by job id
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: HashMap<JobId, ActiveJob>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job and its poll task.
    ///
    /// Returns `false` if the job is already registered. The registered
    /// entry is left untouched and the rejected handle is cancelled, so a
    /// job never has two live pollers.
    pub fn register(&mut self, job_id: JobId, placeholder_id: TrackId, handle: PollHandle) -> bool {
        if self.jobs.contains_key(&job_id) {
            debug!(job_id = %job_id, "Job already registered, ignoring");
            handle.cancel();
            return false;
        }

        self.jobs.insert(
            job_id,
            ActiveJob {
                placeholder_id,
                handle,
            },
        );
        true
    }

    /// Cancel a job's poll task and forget it. Missing jobs are ignored.
    pub fn unregister(&mut self, job_id: &JobId) {
        if let Some(job) = self.jobs.remove(job_id) {
            job.handle.cancel();
        }
    }

    /// Forget a job without cancelling its task.
    ///
    /// Used by a poll task ending its own job, which still has work to do
    /// after leaving the registry. Returns the placeholder id, or `None`
    /// when the job was already gone (a second terminal signal).
    pub fn release(&mut self, job_id: &JobId) -> Option<TrackId> {
        self.jobs.remove(job_id).map(|job| job.placeholder_id)
    }

    pub fn contains(&self, job_id: &JobId) -> bool {
        self.jobs.contains_key(job_id)
    }

    pub fn placeholder_for(&self, job_id: &JobId) -> Option<&TrackId> {
        self.jobs.get(job_id).map(|job| &job.placeholder_id)
    }

    pub fn count(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Visit every registered job
    pub fn for_each<F: FnMut(&JobId, &ActiveJob)>(&self, mut f: F) {
        for (job_id, job) in &self.jobs {
            f(job_id, job);
        }
    }

    /// Cancel every poll task and empty the registry.
    ///
    /// Returns how many jobs were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.jobs.len();
        for (job_id, job) in self.jobs.drain() {
            debug!(job_id = %job_id, "Cancelling poller");
            job.handle.cancel();
        }
        count
    }
}
