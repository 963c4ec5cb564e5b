//! Core types for playback control

use serde::{Deserialize, Serialize};

/// Elapsed time after which "previous" restarts the current track
/// instead of moving back in the queue (seconds)
pub const PREVIOUS_RESTART_THRESHOLD: f64 = 3.0;

/// Playback state of the active track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No media loaded
    Idle,

    /// Source set, waiting for metadata
    Loading,

    /// Metadata known, can play
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Reached the end of the track
    Ended,

    /// The media element reported an error
    Errored,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Queue-level wrap only
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `Off → All → One → Off` cycle
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    pub volume: f64,

    /// Initial playback rate (default: 1.0)
    pub playback_rate: f64,

    /// Initial shuffle (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.8,
            playback_rate: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 0.8);
        assert_eq!(config.playback_rate, 1.0);
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::Off);
    }

    #[test]
    fn repeat_cycles_back_to_off() {
        let mut mode = RepeatMode::Off;
        let mut seen = Vec::new();
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(seen, vec![RepeatMode::All, RepeatMode::One, RepeatMode::Off]);
    }
}
