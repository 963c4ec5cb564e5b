//! Generation Orchestrator
//!
//! Public entry point for generation: submissions, resumption of jobs that
//! were in flight before a reload, reconciliation after success, and the
//! optimistic track mutations (like, play count, delete).
//!
//! All mutable state sits behind one [`Shared`] value that the poll tasks
//! hold on to. Locks are only ever held for synchronous bookkeeping, never
//! across a network call.

use crate::batch::plan_batch;
use crate::config::GenerationConfig;
use crate::error::{GenerationError, Result};
use crate::events::{GenerationEvent, NotificationLevel};
use crate::library::TrackLibrary;
use crate::poller::{JobOutcome, JobPoller};
use crate::registry::{JobRegistry, PollHandle};
use ace_core::{GenerationParams, GenerationStatus, JobId, StudioApi, StudioError, Track, TrackId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Outcome of a multi-track delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<TrackId>,
    pub failed: Vec<TrackId>,
}

impl DeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// State shared between the orchestrator and its poll tasks
pub(crate) struct Shared {
    pub(crate) api: Arc<dyn StudioApi>,
    pub(crate) config: GenerationConfig,
    registry: Mutex<JobRegistry>,
    library: Mutex<TrackLibrary>,
    token: RwLock<Option<String>>,
    generating: AtomicBool,
    closed: AtomicBool,
    events: mpsc::UnboundedSender<GenerationEvent>,
}

impl Shared {
    fn registry(&self) -> MutexGuard<'_, JobRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn library(&self) -> MutexGuard<'_, TrackLibrary> {
        self.library.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn require_token(&self) -> Result<String> {
        self.token().ok_or_else(|| {
            self.emit(GenerationEvent::AuthRequired);
            GenerationError::Studio(StudioError::AuthRequired)
        })
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn emit(&self, event: GenerationEvent) {
        // Nobody listening is fine
        let _ = self.events.send(event);
    }

    fn set_generating(&self, generating: bool) {
        if self.generating.swap(generating, Ordering::SeqCst) != generating {
            self.emit(GenerationEvent::GeneratingChanged { generating });
        }
    }

    /// Clear the in-progress flag once no job is left
    fn settle_generating(&self) {
        if self.registry().is_empty() {
            self.set_generating(false);
        }
    }

    pub(crate) fn generation_status(&self, track_id: &TrackId) -> Option<GenerationStatus> {
        self.library().generation_status(track_id).cloned()
    }

    pub(crate) fn update_progress(&self, job_id: &JobId, track_id: &TrackId, status: GenerationStatus) {
        if self.library().update_generation(track_id, status.clone()) {
            debug!(
                job_id = %job_id,
                progress = status.progress,
                stage = status.stage.as_deref().unwrap_or("-"),
                "Job progress"
            );
            self.emit(GenerationEvent::ProgressUpdated {
                job_id: job_id.clone(),
                track_id: track_id.clone(),
                status,
            });
        }
    }

    /// Spawn and register a poller; `false` if the job is already polled
    /// or the orchestrator is shut down.
    ///
    /// `placeholder` is inserted only when the poller actually starts, so a
    /// job that is already tracked never gains a second visible entry.
    fn start_polling(
        self: &Arc<Self>,
        job_id: JobId,
        track_id: TrackId,
        token: String,
        placeholder: Option<Track>,
    ) -> bool {
        let started = {
            let mut registry = self.registry();
            if self.is_closed() || registry.contains(&job_id) {
                false
            } else {
                if let Some(placeholder) = placeholder {
                    self.library().insert_placeholder(placeholder);
                }
                let poller = JobPoller {
                    shared: Arc::clone(self),
                    job_id: job_id.clone(),
                    track_id: track_id.clone(),
                    token,
                };
                registry.register(job_id.clone(), track_id.clone(), PollHandle::spawn(poller.run()))
            }
        };

        if started {
            info!(job_id = %job_id, track_id = %track_id, "Polling generation job");
            self.emit(GenerationEvent::JobStarted { job_id, track_id });
        } else {
            debug!(job_id = %job_id, "Job already polled, not starting another poller");
        }
        started
    }

    /// Tear a job down after its first terminal outcome
    pub(crate) async fn finish_job(&self, job_id: &JobId, track_id: &TrackId, outcome: JobOutcome) {
        if self.registry().release(job_id).is_none() {
            return;
        }

        self.library().remove(track_id);
        self.settle_generating();

        let (job_id, track_id) = (job_id.clone(), track_id.clone());
        match outcome {
            JobOutcome::Succeeded(result) => {
                info!(job_id = %job_id, files = result.audio_urls.len(), "Generation succeeded");
                self.emit(GenerationEvent::JobSucceeded { job_id, track_id });

                if let Err(err) = self.reconcile().await {
                    warn!(error = %err, "Failed to refresh tracks after generation");
                }
                if self.config.compact_layout {
                    self.emit(GenerationEvent::RevealTrackList);
                }
            }
            JobOutcome::Failed(message) => {
                warn!(job_id = %job_id, error = %message, "Generation failed");
                self.emit(GenerationEvent::notify(
                    format!("Generation failed: {message}"),
                    NotificationLevel::Error,
                ));
                self.emit(GenerationEvent::JobFailed {
                    job_id,
                    track_id,
                    message,
                });
            }
            JobOutcome::Unreachable(err) => {
                warn!(job_id = %job_id, error = %err, "Polling failed, dropping job");
                if err == StudioError::AuthRequired {
                    self.emit(GenerationEvent::AuthRequired);
                }
                self.emit(GenerationEvent::notify(
                    format!("Generation failed: {err}"),
                    NotificationLevel::Error,
                ));
                self.emit(GenerationEvent::JobFailed {
                    job_id,
                    track_id,
                    message: err.to_string(),
                });
            }
            JobOutcome::TimedOut => {
                warn!(job_id = %job_id, "Generation timed out");
                self.emit(GenerationEvent::notify(
                    "Generation timed out",
                    NotificationLevel::Error,
                ));
                self.emit(GenerationEvent::JobTimedOut { job_id, track_id });
            }
        }
    }

    async fn reconcile(&self) -> Result<usize> {
        if self.is_closed() {
            return Err(GenerationError::ShutDown);
        }
        let token = self.token().ok_or(StudioError::AuthRequired)?;

        let resolved: Vec<Track> = self
            .api
            .list_my_tracks(&token)
            .await?
            .into_iter()
            .map(Track::from)
            .collect();

        let count = {
            let mut library = self.library();
            library.reconcile(resolved);
            library.len()
        };

        debug!(tracks = count, "Reconciled track list");
        self.emit(GenerationEvent::TracksReconciled { count });
        Ok(count)
    }
}

/// Orchestrates generation jobs against a [`StudioApi`] backend.
///
/// Dropping the orchestrator cancels every poll task.
pub struct GenerationOrchestrator {
    shared: Arc<Shared>,
}

impl GenerationOrchestrator {
    /// Create an orchestrator and the receiver for its events
    pub fn new(
        api: Arc<dyn StudioApi>,
        config: GenerationConfig,
    ) -> (Self, mpsc::UnboundedReceiver<GenerationEvent>) {
        let (events, rx) = mpsc::unbounded_channel();

        let shared = Arc::new(Shared {
            api,
            config,
            registry: Mutex::new(JobRegistry::new()),
            library: Mutex::new(TrackLibrary::new()),
            token: RwLock::new(None),
            generating: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            events,
        });

        (Self { shared }, rx)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.shared.config
    }

    /// Store the session token without resuming anything
    pub fn set_token(&self, token: Option<String>) {
        *self
            .shared
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Start a session and resume the caller's active jobs.
    ///
    /// Returns the number of jobs resumed.
    pub async fn sign_in(&self, token: impl Into<String>) -> Result<usize> {
        self.set_token(Some(token.into()));
        self.resume().await
    }

    /// Forget the session. Running pollers keep their own token.
    pub fn sign_out(&self) {
        self.set_token(None);
    }

    pub fn is_signed_in(&self) -> bool {
        self.shared.token().is_some()
    }

    /// Submit one generation request.
    ///
    /// A placeholder is inserted (and selected) before the request goes
    /// out. If the request fails the placeholder is removed again and no
    /// job is created.
    pub async fn submit(&self, params: GenerationParams) -> Result<JobId> {
        if self.shared.is_closed() {
            return Err(GenerationError::ShutDown);
        }
        let token = self.shared.require_token()?;

        let track_id = TrackId::placeholder();
        {
            let mut library = self.shared.library();
            library.insert_placeholder(Track::placeholder(track_id.clone(), &params, None));
            library.select(Some(track_id.clone()));
        }
        self.shared.set_generating(true);

        debug!(track_id = %track_id, title = %params.title, "Submitting generation");
        match self.shared.api.submit_generation(&params, &token).await {
            Ok(accepted) => {
                info!(job_id = %accepted.job_id, track_id = %track_id, "Generation accepted");
                let job_id = accepted.job_id;
                if self
                    .shared
                    .start_polling(job_id.clone(), track_id.clone(), token, None)
                {
                    return Ok(job_id);
                }

                self.shared.library().remove(&track_id);
                self.shared.settle_generating();
                if self.shared.is_closed() {
                    debug!(job_id = %job_id, "Shut down during submission, job not tracked");
                    return Err(GenerationError::ShutDown);
                }
                // Already tracked under another placeholder
                Ok(job_id)
            }
            Err(err) => {
                warn!(track_id = %track_id, error = %err, "Generation submission failed");
                self.shared.library().remove(&track_id);
                self.shared.settle_generating();

                if err == StudioError::AuthRequired {
                    self.shared.emit(GenerationEvent::AuthRequired);
                }
                self.shared.emit(GenerationEvent::notify(
                    format!("Generation failed: {err}"),
                    NotificationLevel::Error,
                ));
                self.shared.emit(GenerationEvent::SubmissionFailed {
                    track_id,
                    error: err.clone(),
                });
                Err(err.into())
            }
        }
    }

    /// Submit `count` independent jobs for one request.
    ///
    /// See [`plan_batch`] for how titles and seeds vary across the batch.
    /// Individual submission failures are reported through events and
    /// skipped; the ids of the accepted jobs are returned.
    pub async fn submit_batch(&self, params: &GenerationParams, count: u32) -> Result<Vec<JobId>> {
        let max = self.shared.config.max_bulk_count;
        if count == 0 || count > max {
            return Err(GenerationError::InvalidBulkCount {
                requested: count,
                max,
            });
        }
        self.shared.require_token()?;

        let mut accepted = Vec::with_capacity(count as usize);
        for job in plan_batch(params, count) {
            match self.submit(job).await {
                Ok(job_id) => accepted.push(job_id),
                Err(err) => debug!(error = %err, "Batch job not submitted"),
            }
        }

        info!(requested = count, accepted = accepted.len(), "Batch submitted");
        Ok(accepted)
    }

    /// Resume polling of the caller's active jobs from the job history.
    ///
    /// Placeholder ids are derived from job ids, so repeated calls never
    /// duplicate entries or pollers. Returns the number of pollers started.
    pub async fn resume(&self) -> Result<usize> {
        let token = self.shared.token().ok_or(StudioError::AuthRequired)?;

        let history = self.shared.api.job_history(&token).await.map_err(|err| {
            warn!(error = %err, "Failed to load job history");
            err
        })?;

        let mut started = 0;
        for record in history.iter().filter(|record| record.status.is_active()) {
            let Some(job_id) = record.job_id() else {
                continue;
            };

            let track_id = TrackId::for_job(job_id);
            let placeholder = Track::placeholder(track_id.clone(), &record.params(), record.created_at());

            if self
                .shared
                .start_polling(job_id.clone(), track_id, token.clone(), Some(placeholder))
            {
                started += 1;
            }
        }

        if started > 0 {
            self.shared.set_generating(true);
            info!(jobs = started, "Resumed active generation jobs");
        }
        Ok(started)
    }

    /// Start polling an already accepted job. `false` if it is already
    /// polled, no session exists, or the orchestrator is shut down.
    pub fn start_polling(&self, job_id: JobId, placeholder_id: TrackId) -> bool {
        match self.shared.token() {
            Some(token) => self.shared.start_polling(job_id, placeholder_id, token, None),
            None => false,
        }
    }

    /// Merge the backend's track list into the local one
    pub async fn reconcile(&self) -> Result<usize> {
        self.shared.reconcile().await
    }

    /// Toggle the like on a track, optimistically.
    ///
    /// The local state flips immediately and is reverted if the backend
    /// rejects the change. Returns the confirmed state.
    pub async fn toggle_like(&self, track_id: &TrackId) -> Result<bool> {
        let token = self.shared.require_token()?;
        let liked = self.shared.library().toggle_like(track_id);

        match self.shared.api.toggle_like(track_id, &token).await {
            Ok(confirmed) => {
                if confirmed != liked {
                    self.shared.library().set_liked(track_id, confirmed);
                }
                Ok(confirmed)
            }
            Err(err) => {
                warn!(track_id = %track_id, error = %err, "Failed to toggle like");
                self.shared.library().toggle_like(track_id);
                Err(err.into())
            }
        }
    }

    /// Count a play of a track, optimistically. Works signed out.
    pub async fn record_play(&self, track_id: &TrackId) -> Result<u32> {
        let previous = self
            .shared
            .library()
            .increment_views(track_id)
            .ok_or_else(|| GenerationError::TrackNotFound(track_id.clone()))?;

        let token = self.shared.token();
        match self.shared.api.track_play(track_id, token.as_deref()).await {
            Ok(views) => {
                let views = views.max(previous.saturating_add(1));
                self.shared.library().set_views(track_id, views);
                Ok(views)
            }
            Err(err) => {
                warn!(track_id = %track_id, error = %err, "Failed to record play");
                self.shared.library().set_views(track_id, previous);
                Err(err.into())
            }
        }
    }

    /// Delete tracks one by one.
    ///
    /// Only the ids the backend confirmed are removed locally; the rest
    /// are listed in the report.
    pub async fn delete_tracks(&self, ids: &[TrackId]) -> Result<DeleteReport> {
        if ids.is_empty() {
            return Ok(DeleteReport::default());
        }
        let token = self.shared.require_token()?;

        let mut report = DeleteReport::default();
        for id in ids {
            match self.shared.api.delete_track(id, &token).await {
                Ok(()) => report.deleted.push(id.clone()),
                Err(err) => {
                    warn!(track_id = %id, error = %err, "Failed to delete track");
                    report.failed.push(id.clone());
                }
            }
        }

        if !report.deleted.is_empty() {
            self.shared.library().remove_deleted(&report.deleted);
        }

        let (message, level) = if !report.is_complete() {
            (
                format!("Deleted {} of {} tracks", report.deleted.len(), ids.len()),
                NotificationLevel::Error,
            )
        } else if ids.len() == 1 {
            ("Track deleted".to_string(), NotificationLevel::Success)
        } else {
            (format!("Deleted {} tracks", ids.len()), NotificationLevel::Success)
        };
        self.shared.emit(GenerationEvent::notify(message, level));

        Ok(report)
    }

    /// Number of jobs being polled
    pub fn job_count(&self) -> usize {
        self.shared.registry().count()
    }

    pub fn is_generating(&self) -> bool {
        self.shared.generating.load(Ordering::SeqCst)
    }

    /// Snapshot of the visible track list
    pub fn tracks(&self) -> Vec<Track> {
        self.shared.library().tracks().to_vec()
    }

    pub fn track(&self, id: &TrackId) -> Option<Track> {
        self.shared.library().get(id).cloned()
    }

    pub fn selected(&self) -> Option<Track> {
        self.shared.library().selected().cloned()
    }

    pub fn select(&self, id: Option<TrackId>) {
        self.shared.library().select(id);
    }

    pub fn is_liked(&self, id: &TrackId) -> bool {
        self.shared.library().is_liked(id)
    }

    /// Cancel every poller and refuse new work. Returns how many jobs
    /// were cancelled.
    pub fn shutdown(&self) -> usize {
        let cancelled = {
            let mut registry = self.shared.registry();
            self.shared.closed.store(true, Ordering::SeqCst);
            registry.cancel_all()
        };

        if cancelled > 0 {
            info!(jobs = cancelled, "Cancelled active generation jobs");
        }
        cancelled
    }
}

impl Drop for GenerationOrchestrator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
