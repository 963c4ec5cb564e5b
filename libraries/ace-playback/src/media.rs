//! Platform-agnostic media element trait
//!
//! Abstracts the imperative playback primitive (an HTML audio element, a
//! native player, ...). Calls are fire-and-forget; readiness and errors
//! come back as [`MediaEvent`]s.

use ace_core::StudioError;

/// Error codes reported by a media element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaErrorKind {
    /// Fetch aborted, usually by a newer load
    Aborted,

    /// Network failure while fetching
    Network,

    /// The data could not be decoded
    Decode,

    /// The source is unsupported or unavailable
    NotSupported,
}

impl MediaErrorKind {
    /// Map into the shared error taxonomy; aborts are not errors
    pub fn to_error(self) -> Option<StudioError> {
        match self {
            Self::Aborted => None,
            Self::NotSupported => Some(StudioError::PlaybackUnsupported(
                "media source not supported".into(),
            )),
            Self::Network => Some(StudioError::PlaybackTransient("network error".into())),
            Self::Decode => Some(StudioError::PlaybackTransient("decode error".into())),
        }
    }
}

/// Notifications from the media element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Duration and dimensions are known
    LoadedMetadata,

    /// Enough data to start playing
    CanPlay,

    /// More bytes arrived
    Progress,

    /// Playhead moved (seconds)
    TimeUpdate(f64),

    /// Reached the end of the media
    Ended,

    /// The element failed
    Error(MediaErrorKind),
}

/// Media playback primitive
///
/// Implementors wrap one platform player. Only the playback controller
/// holds it.
pub trait MediaElement {
    /// Point the element at a new source
    fn set_source(&mut self, url: &str);

    /// Drop the current source
    fn clear_source(&mut self);

    /// Start fetching the current source
    fn load(&mut self);

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback requested
    /// * `Err(kind)` - The element refused to play
    fn play(&mut self) -> Result<(), MediaErrorKind>;

    fn pause(&mut self);

    /// Current playhead (seconds)
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Total duration once metadata is known
    fn duration(&self) -> Option<f64>;

    /// Whether a seekable range exists yet.
    ///
    /// Must only turn true once metadata is loaded, i.e. once
    /// [`duration`](Self::duration) is known.
    fn is_seekable(&self) -> bool;

    fn set_volume(&mut self, volume: f64);

    fn set_playback_rate(&mut self, rate: f64);
}
