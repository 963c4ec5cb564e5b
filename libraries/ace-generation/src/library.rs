//! Track library
//!
//! The visible track list: placeholders for in-flight jobs, resolved
//! tracks from the backend, the liked set and the detail-view selection.

use ace_core::{GenerationStatus, Track, TrackId};
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct TrackLibrary {
    tracks: Vec<Track>,
    liked: HashSet<TrackId>,
    selected: Option<TrackId>,
}

impl TrackLibrary {
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

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.get(id).is_some()
    }

    /// Placeholders still waiting for their job
    pub fn placeholders(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_generating())
    }

    /// Insert a placeholder at the head of the list.
    ///
    /// Returns `false` (and changes nothing) if a track with that id exists.
    pub fn insert_placeholder(&mut self, track: Track) -> bool {
        if self.contains(&track.id) {
            return false;
        }
        self.tracks.insert(0, track);
        true
    }

    /// Remove a track, dropping the selection if it pointed there
    pub fn remove(&mut self, id: &TrackId) -> Option<Track> {
        let index = self.tracks.iter().position(|t| &t.id == id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(self.tracks.remove(index))
    }

    /// Store a placeholder's latest status; resolved tracks are left alone
    pub fn update_generation(&mut self, id: &TrackId, status: GenerationStatus) -> bool {
        match self
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .and_then(Track::generation_mut)
        {
            Some(current) => {
                *current = status;
                true
            }
            None => false,
        }
    }

    pub fn generation_status(&self, id: &TrackId) -> Option<&GenerationStatus> {
        self.get(id).and_then(Track::generation)
    }

    /// Merge a freshly fetched list of resolved tracks.
    ///
    /// Placeholders are kept, the fetched list replaces every resolved
    /// track (first occurrence per id wins) and the result is sorted
    /// newest first. A selection that pointed at a placeholder or at a
    /// track that no longer exists moves to the newest resolved track.
    pub fn reconcile(&mut self, resolved: Vec<Track>) {
        let mut merged: Vec<Track> = self.tracks.drain(..).filter(Track::is_generating).collect();
        let mut seen: HashSet<TrackId> = merged.iter().map(|t| t.id.clone()).collect();

        for track in resolved {
            if seen.insert(track.id.clone()) {
                merged.push(track);
            }
        }

        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.tracks = merged;

        let keep_selection = self
            .selected()
            .is_some_and(|track| !track.is_generating());
        if !keep_selection {
            self.selected = self
                .tracks
                .iter()
                .find(|t| !t.is_generating())
                .map(|t| t.id.clone());
        }
    }

    pub fn select(&mut self, id: Option<TrackId>) {
        self.selected = id;
    }

    /// The detail-view track, if it still exists
    pub fn selected(&self) -> Option<&Track> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn is_liked(&self, id: &TrackId) -> bool {
        self.liked.contains(id)
    }

    pub fn liked(&self) -> &HashSet<TrackId> {
        &self.liked
    }

    /// Flip the like state and adjust the counter; returns the new state
    pub fn toggle_like(&mut self, id: &TrackId) -> bool {
        let liked = if self.liked.remove(id) {
            false
        } else {
            self.liked.insert(id.clone());
            true
        };

        if let Some(track) = self.tracks.iter_mut().find(|t| &t.id == id) {
            track.like_count = if liked {
                track.like_count.saturating_add(1)
            } else {
                track.like_count.saturating_sub(1)
            };
        }
        liked
    }

    /// Set the like state without touching counters
    pub fn set_liked(&mut self, id: &TrackId, liked: bool) {
        if liked {
            self.liked.insert(id.clone());
        } else {
            self.liked.remove(id);
        }
    }

    /// Bump the play counter; returns the previous value
    pub fn increment_views(&mut self, id: &TrackId) -> Option<u32> {
        let track = self.tracks.iter_mut().find(|t| &t.id == id)?;
        let previous = track.view_count;
        track.view_count = previous.saturating_add(1);
        Some(previous)
    }

    pub fn set_views(&mut self, id: &TrackId, views: u32) {
        if let Some(track) = self.tracks.iter_mut().find(|t| &t.id == id) {
            track.view_count = views;
        }
    }

    /// Drop deleted tracks from the list, the liked set and the selection
    pub fn remove_deleted(&mut self, ids: &[TrackId]) {
        self.tracks.retain(|t| !ids.contains(&t.id));
        for id in ids {
            self.liked.remove(id);
        }
        if self.selected.as_ref().is_some_and(|id| ids.contains(id)) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_core::{GenerationParams, TrackMedia};
    use chrono::{TimeZone, Utc};

    fn resolved(id: &str, day: u32) -> Track {
        let mut track = Track::placeholder(
            TrackId::new(id),
            &GenerationParams::default(),
            Some(Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()),
        );
        track.media = TrackMedia::Ready {
            audio_url: format!("/audio/{id}.mp3"),
        };
        track
    }

    fn placeholder(id: &str, day: u32) -> Track {
        Track::placeholder(
            TrackId::new(id),
            &GenerationParams::default(),
            Some(Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()),
        )
    }

    #[test]
    fn reconcile_keeps_placeholders_and_sorts_newest_first() {
        let mut library = TrackLibrary::new();
        library.insert_placeholder(placeholder("temp_x", 5));
        library.insert_placeholder(resolved("old", 1));

        library.reconcile(vec![resolved("b", 3), resolved("a", 2), resolved("b", 9)]);

        let ids: Vec<&str> = library.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["temp_x", "b", "a"]);
    }

    #[test]
    fn reconcile_moves_selection_off_placeholder() {
        let mut library = TrackLibrary::new();
        library.insert_placeholder(placeholder("temp_x", 5));
        library.select(Some(TrackId::new("temp_x")));

        library.reconcile(vec![resolved("a", 2), resolved("b", 3)]);
        assert_eq!(library.selected().unwrap().id.as_str(), "b");
    }

    #[test]
    fn reconcile_keeps_valid_selection() {
        let mut library = TrackLibrary::new();
        library.reconcile(vec![resolved("a", 2), resolved("b", 3)]);
        library.select(Some(TrackId::new("a")));

        library.reconcile(vec![resolved("a", 2), resolved("b", 3), resolved("c", 4)]);
        assert_eq!(library.selected().unwrap().id.as_str(), "a");
    }

    #[test]
    fn update_generation_ignores_resolved_tracks() {
        let mut library = TrackLibrary::new();
        library.insert_placeholder(placeholder("temp_x", 1));
        library.reconcile(vec![resolved("a", 2)]);

        let status = GenerationStatus {
            progress: 0.5,
            ..GenerationStatus::default()
        };
        assert!(library.update_generation(&TrackId::new("temp_x"), status.clone()));
        assert!(!library.update_generation(&TrackId::new("a"), status));
        assert_eq!(
            library.generation_status(&TrackId::new("temp_x")).unwrap().progress,
            0.5
        );
    }

    #[test]
    fn like_counter_never_goes_negative() {
        let mut library = TrackLibrary::new();
        library.reconcile(vec![resolved("a", 1)]);
        let id = TrackId::new("a");

        assert!(library.toggle_like(&id));
        assert_eq!(library.get(&id).unwrap().like_count, 1);
        assert!(!library.toggle_like(&id));
        assert_eq!(library.get(&id).unwrap().like_count, 0);

        // Liked elsewhere, counter not yet refreshed
        library.set_liked(&id, true);
        assert!(!library.toggle_like(&id));
        assert_eq!(library.get(&id).unwrap().like_count, 0);
    }

    #[test]
    fn remove_deleted_cleans_every_reference() {
        let mut library = TrackLibrary::new();
        library.reconcile(vec![resolved("a", 1), resolved("b", 2)]);
        library.set_liked(&TrackId::new("a"), true);
        library.select(Some(TrackId::new("a")));

        library.remove_deleted(&[TrackId::new("a")]);

        assert!(!library.contains(&TrackId::new("a")));
        assert!(!library.is_liked(&TrackId::new("a")));
        assert!(library.selected().is_none());
        assert_eq!(library.len(), 1);
    }
}
