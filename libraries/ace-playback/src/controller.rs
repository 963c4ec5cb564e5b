//! Playback controller
//!
//! Reconciles "what should be playing" (current track, play/pause intent,
//! volume, rate) against the imperative media element, and drives the
//! queue and the seek buffer.
//!
//! Media is reloaded only when the current track's id differs from the
//! id of the loaded media; any other update is a play/pause toggle.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::media::{MediaElement, MediaErrorKind, MediaEvent};
use crate::queue::{Advance, Direction, PlaybackQueue};
use crate::seek::{clamp_seek, SeekBuffer};
use crate::types::{PlaybackConfig, PlaybackState, RepeatMode, PREVIOUS_RESTART_THRESHOLD};
use ace_core::{StudioError, Track, TrackId};
use tracing::{debug, error, warn};

/// Shown when a track cannot be played at all
pub const UNAVAILABLE_MESSAGE: &str = "This track is not available";

/// Shown when selecting a track that has no media yet
pub const NOT_READY_MESSAGE: &str = "This track is still generating";

/// Read-only view of the controller
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub current: Option<Track>,
    pub state: PlaybackState,
    pub is_playing: bool,
    pub queue: Vec<TrackId>,
    pub queue_index: Option<usize>,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub pending_seek: Option<f64>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub volume: f64,
    pub playback_rate: f64,
    pub last_error: Option<StudioError>,
}

/// Playback controller over a media element
pub struct PlaybackController<M: MediaElement> {
    media: M,
    queue: PlaybackQueue,
    seek: SeekBuffer,

    current: Option<Track>,
    /// Id of the track whose media is loaded
    loaded_id: Option<TrackId>,
    is_playing: bool,
    state: PlaybackState,

    current_time: f64,
    duration: Option<f64>,

    shuffle: bool,
    repeat: RepeatMode,
    volume: f64,
    playback_rate: f64,

    last_error: Option<StudioError>,
    pending_events: Vec<PlaybackEvent>,
}

impl<M: MediaElement> PlaybackController<M> {
    /// Take ownership of the media element and apply the initial settings
    pub fn new(mut media: M, config: PlaybackConfig) -> Self {
        let volume = config.volume.clamp(0.0, 1.0);
        media.set_volume(volume);
        media.set_playback_rate(config.playback_rate);

        Self {
            media,
            queue: PlaybackQueue::new(),
            seek: SeekBuffer::new(),
            current: None,
            loaded_id: None,
            is_playing: false,
            state: PlaybackState::Idle,
            current_time: 0.0,
            duration: None,
            shuffle: config.shuffle,
            repeat: config.repeat,
            volume,
            playback_rate: config.playback_rate,
            last_error: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Play `track`, optionally as part of the list it was picked from.
    ///
    /// Picking the current track again toggles play/pause. Returns `true`
    /// when a different track started (the caller counts the play).
    pub fn play_track(&mut self, track: &Track, list: Option<&[Track]>, visible: &[Track]) -> bool {
        if self.queue.select_queue_for(list, track, visible) {
            self.emit(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }

        if self.current.as_ref().is_some_and(|c| c.id == track.id) {
            self.toggle_play();
            return false;
        }

        self.set_current(track.clone());
        true
    }

    /// Flip play/pause; no-op without a current track
    pub fn toggle_play(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.is_playing = !self.is_playing;
        self.sync();
    }

    /// Seek to `time` seconds.
    ///
    /// If the media cannot seek yet the target is buffered and applied on
    /// the next metadata, can-play or progress event.
    pub fn seek(&mut self, time: f64) {
        if self.loaded_id.is_none() || !time.is_finite() {
            return;
        }

        if self.media.duration().is_none() || !self.media.is_seekable() {
            debug!(target_secs = time, "Media not seekable yet, buffering seek");
            self.seek.request(time);
            return;
        }

        self.apply_seek(clamp_seek(time, self.media.duration()));
    }

    /// Skip to the next track
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        self.advance(Direction::Forward, self.repeat)
    }

    /// Go to the previous track.
    ///
    /// More than [`PREVIOUS_RESTART_THRESHOLD`] seconds in, the current
    /// track restarts instead.
    pub fn previous(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(PlaybackError::NoTrackSelected);
        }
        if self.loaded_id.is_some() && self.media.current_time() > PREVIOUS_RESTART_THRESHOLD {
            self.apply_seek(0.0);
            return Ok(());
        }
        self.advance(Direction::Backward, RepeatMode::Off)
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    /// Cycle `Off → All → One → Off`
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        self.repeat
    }

    /// Set the volume (0.0-1.0); applied only when it changes
    pub fn set_volume(&mut self, volume: f64) {
        let volume = volume.clamp(0.0, 1.0);
        if volume != self.volume {
            self.volume = volume;
            self.media.set_volume(volume);
        }
    }

    /// Set the playback rate; applied only when it changes
    pub fn set_playback_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 && rate != self.playback_rate {
            self.playback_rate = rate;
            self.media.set_playback_rate(rate);
        }
    }

    /// Forget deleted tracks; stops playback if the current one is among them
    pub fn remove_tracks(&mut self, ids: &[TrackId]) {
        let current_id = self.current.as_ref().map(|t| t.id.clone());
        if self.queue.remove(ids, current_id.as_ref()) > 0 {
            self.emit(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }

        if current_id.is_some_and(|id| ids.contains(&id)) {
            self.stop();
        }
    }

    // ===== Media Events =====

    /// Feed a notification from the media element
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata => {
                self.duration = self.media.duration();
                self.mark_ready();
                self.flush_seek();
            }
            MediaEvent::CanPlay => {
                self.mark_ready();
                self.flush_seek();
            }
            MediaEvent::Progress => self.flush_seek(),
            MediaEvent::TimeUpdate(position) => {
                self.current_time = position;
                self.emit(PlaybackEvent::PositionUpdate {
                    position,
                    duration: self.duration,
                });
            }
            MediaEvent::Ended => {
                self.set_state(PlaybackState::Ended);
                if let Err(e) = self.next() {
                    debug!(error = %e, "Nothing to play after end of track");
                }
            }
            MediaEvent::Error(kind) => self.handle_media_error(kind),
        }
    }

    // ===== State =====

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access for platform glue (e.g. updating a fake's clock).
    /// Source, playhead and play state must still go through the controller.
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current: self.current.clone(),
            state: self.state,
            is_playing: self.is_playing,
            queue: self.queue.tracks().iter().map(|t| t.id.clone()).collect(),
            queue_index: self
                .current
                .as_ref()
                .and_then(|t| self.queue.current_index(&t.id)),
            current_time: self.current_time,
            duration: self.duration,
            pending_seek: self.seek.pending(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            volume: self.volume,
            playback_rate: self.playback_rate,
            last_error: self.last_error.clone(),
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn advance(&mut self, direction: Direction, repeat: RepeatMode) -> Result<()> {
        let current_id = self
            .current
            .as_ref()
            .map(|t| t.id.clone())
            .ok_or(PlaybackError::NoTrackSelected)?;
        if self.queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }

        match self
            .queue
            .advance(&current_id, direction, self.shuffle, repeat)
        {
            Advance::Restart => {
                self.apply_seek(0.0);
                self.is_playing = true;
                self.sync();
                Ok(())
            }
            Advance::Moved { track, .. } => {
                if track.id == current_id {
                    // Single-entry queue
                    self.apply_seek(0.0);
                    self.is_playing = true;
                    self.sync();
                } else {
                    self.set_current(track);
                }
                Ok(())
            }
            Advance::NoOp => Err(PlaybackError::TrackNotInQueue(current_id)),
        }
    }

    fn set_current(&mut self, track: Track) {
        let previous_track_id = self.current.as_ref().map(|t| t.id.clone());
        self.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });

        self.current = Some(track);
        self.is_playing = true;
        self.last_error = None;
        self.sync();
    }

    /// Bring the media element in line with the current track and intent
    fn sync(&mut self) {
        let Some(track) = self.current.as_ref() else {
            return;
        };

        let Some(url) = track.audio_url().map(str::to_owned) else {
            // Placeholder or resolved without media: nothing to load
            if self.loaded_id.take().is_some() {
                self.media.pause();
                self.media.clear_source();
            }
            self.seek.clear();
            self.duration = None;
            self.current_time = 0.0;
            self.is_playing = false;
            let message = if track.is_generating() {
                NOT_READY_MESSAGE
            } else {
                UNAVAILABLE_MESSAGE
            };
            self.emit(PlaybackEvent::Notification {
                message: message.to_string(),
            });
            self.set_state(PlaybackState::Idle);
            return;
        };

        if self.loaded_id.as_ref() != Some(&track.id) {
            debug!(track_id = %track.id, "Loading media");
            self.loaded_id = Some(track.id.clone());
            self.seek.clear();
            self.duration = None;
            self.current_time = 0.0;

            self.media.set_source(&url);
            self.media.load();
            self.set_state(PlaybackState::Loading);

            if self.is_playing {
                self.start_media();
            }
        } else if self.is_playing {
            self.start_media();
        } else {
            self.media.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    fn start_media(&mut self) {
        match self.media.play() {
            Ok(()) => self.set_state(PlaybackState::Playing),
            Err(kind) => self.handle_media_error(kind),
        }
    }

    fn stop(&mut self) {
        self.media.pause();
        self.media.clear_source();
        self.current = None;
        self.loaded_id = None;
        self.is_playing = false;
        self.seek.clear();
        self.duration = None;
        self.current_time = 0.0;
        self.set_state(PlaybackState::Idle);
    }

    fn handle_media_error(&mut self, kind: MediaErrorKind) {
        let Some(err) = kind.to_error() else {
            // A newer load replaced the request
            debug!("Media request aborted");
            return;
        };

        match &err {
            StudioError::PlaybackUnsupported(_) => {
                warn!(error = %err, "Track cannot be played");
                self.emit(PlaybackEvent::Notification {
                    message: UNAVAILABLE_MESSAGE.to_string(),
                });
            }
            _ => error!(error = %err, "Playback failed"),
        }

        self.media.pause();
        self.is_playing = false;
        self.last_error = Some(err);
        self.set_state(PlaybackState::Errored);
    }

    fn mark_ready(&mut self) {
        if self.state == PlaybackState::Loading {
            self.set_state(PlaybackState::Ready);
        }
    }

    fn flush_seek(&mut self) {
        if self.seek.pending().is_none()
            || self.media.duration().is_none()
            || !self.media.is_seekable()
        {
            return;
        }
        if let Some(target) = self.seek.take(self.media.duration()) {
            self.apply_seek(target);
        }
    }

    fn apply_seek(&mut self, position: f64) {
        self.media.set_current_time(position);
        self.current_time = position;
        self.emit(PlaybackEvent::SeekApplied { position });
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}
