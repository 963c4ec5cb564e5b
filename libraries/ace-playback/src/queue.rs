//! Play queue
//!
//! Ordered list of tracks plus the position of the current one. The
//! stored index is only a hint: every lookup re-resolves the current
//! track by id, since the list can change underneath.

use crate::types::RepeatMode;
use ace_core::{Track, TrackId};
use rand::Rng;

/// Queue navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of advancing the queue
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Play the current track again from the start
    Restart,

    /// Move to another entry
    Moved { index: usize, track: Track },

    /// Empty queue or current track not found
    NoOp,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackQueue {
    tracks: Vec<Track>,
    index: Option<usize>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Pick the queue for playing `track`.
    ///
    /// In order of preference: the explicitly requested list (if it holds
    /// the track), the current queue (if it holds the track), the visible
    /// list (if it holds the track), or a queue of just that track.
    /// Returns `true` when the queue was replaced.
    pub fn select_queue_for(
        &mut self,
        requested: Option<&[Track]>,
        track: &Track,
        visible: &[Track],
    ) -> bool {
        let holds = |list: &[Track]| list.iter().any(|t| t.id == track.id);

        let replacement = match requested {
            Some(list) if !list.is_empty() && holds(list) => Some(list.to_vec()),
            _ if holds(&self.tracks) => None,
            _ if holds(visible) => Some(visible.to_vec()),
            _ => Some(vec![track.clone()]),
        };

        let replaced = replacement.is_some();
        if let Some(tracks) = replacement {
            self.tracks = tracks;
        }
        self.index = self.position_of(&track.id);
        replaced
    }

    /// Index of the current track, trusting the stored index only if it
    /// still points at that track
    pub fn current_index(&self, current: &TrackId) -> Option<usize> {
        match self.index {
            Some(i) if self.tracks.get(i).is_some_and(|t| &t.id == current) => Some(i),
            _ => self.position_of(current),
        }
    }

    /// Move away from the current track.
    ///
    /// `repeat == One` restarts the current track. With shuffle, a uniformly
    /// random other entry is picked (a single-entry queue repeats itself).
    /// Otherwise the index moves by one and wraps at both ends.
    pub fn advance(
        &mut self,
        current: &TrackId,
        direction: Direction,
        shuffle: bool,
        repeat: RepeatMode,
    ) -> Advance {
        self.advance_with(current, direction, shuffle, repeat, &mut rand::thread_rng())
    }

    pub fn advance_with<R: Rng>(
        &mut self,
        current: &TrackId,
        direction: Direction,
        shuffle: bool,
        repeat: RepeatMode,
        rng: &mut R,
    ) -> Advance {
        let len = self.tracks.len();
        let Some(index) = self.current_index(current) else {
            return Advance::NoOp;
        };

        if repeat == RepeatMode::One {
            return Advance::Restart;
        }

        let next = if shuffle {
            if len > 1 {
                // Draw from the other len-1 entries
                let pick = rng.gen_range(0..len - 1);
                if pick >= index {
                    pick + 1
                } else {
                    pick
                }
            } else {
                index
            }
        } else {
            match direction {
                Direction::Forward => (index + 1) % len,
                Direction::Backward => (index + len - 1) % len,
            }
        };

        self.index = Some(next);
        Advance::Moved {
            index: next,
            track: self.tracks[next].clone(),
        }
    }

    /// Drop tracks by id, keeping the current position by identity.
    /// Returns how many entries were removed.
    pub fn remove(&mut self, ids: &[TrackId], current: Option<&TrackId>) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| !ids.contains(&t.id));
        self.index = current.and_then(|id| self.position_of(id));
        before - self.tracks.len()
    }

    fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }
}
