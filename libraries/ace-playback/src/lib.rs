//! Ace Studio - Playback Control
//!
//! Platform-agnostic playback for generated tracks.
//!
//! This crate provides:
//! - A play queue resolved by track identity, with shuffle and repeat
//! - A seek buffer for seeks issued before the media can honor them
//! - A controller driving a single media element through its
//!   `Idle → Loading → Ready → Playing/Paused` lifecycle
//!
//! # Architecture
//!
//! The actual media primitive (an audio element, a desktop decoder, ...)
//! is provided through the [`MediaElement`] trait. The controller owns it
//! exclusively: nothing else changes its source, playhead or play state.
//! Readiness and errors flow back in through
//! [`PlaybackController::handle_media_event`].
//!
//! # Example
//!
//! ```rust,ignore
//! use ace_playback::{MediaEvent, PlaybackConfig, PlaybackController};
//!
//! let mut player = PlaybackController::new(media, PlaybackConfig::default());
//!
//! player.play_track(&track, None, &visible_tracks);
//! player.seek(30.0); // buffered until metadata arrives
//! player.handle_media_event(MediaEvent::LoadedMetadata);
//!
//! for event in player.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod events;
pub mod media;
pub mod queue;
pub mod seek;
pub mod types;

pub use controller::{PlaybackController, PlaybackSnapshot};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use media::{MediaElement, MediaErrorKind, MediaEvent};
pub use queue::{Advance, Direction, PlaybackQueue};
pub use seek::SeekBuffer;
pub use types::{PlaybackConfig, PlaybackState, RepeatMode, PREVIOUS_RESTART_THRESHOLD};
