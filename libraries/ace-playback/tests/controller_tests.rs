//! Controller tests against a recording media element
//!
//! The fake records every call the controller makes so each test can
//! assert on exactly what reached the media primitive.

use ace_core::{GenerationParams, StudioError, Track, TrackId, TrackMedia};
use ace_playback::controller::{NOT_READY_MESSAGE, UNAVAILABLE_MESSAGE};
use ace_playback::{
    MediaElement, MediaErrorKind, MediaEvent, PlaybackConfig, PlaybackController, PlaybackError,
    PlaybackEvent, PlaybackState, RepeatMode,
};

// ===== Helpers =====

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetSource(String),
    ClearSource,
    Load,
    Play,
    Pause,
    SetTime(f64),
    Volume(f64),
    Rate(f64),
}

#[derive(Debug)]
struct RecordingMedia {
    calls: Vec<Call>,
    time: f64,
    duration: Option<f64>,
    seekable: bool,
    play_result: Result<(), MediaErrorKind>,
}

impl RecordingMedia {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            time: 0.0,
            duration: None,
            seekable: false,
            play_result: Ok(()),
        }
    }

    /// Simulate metadata arriving for the loaded source
    fn make_ready(&mut self, duration: f64) {
        self.duration = Some(duration);
        self.seekable = true;
    }

    fn count(&self, wanted: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| wanted(c)).count()
    }

    fn seeks(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetTime(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl MediaElement for RecordingMedia {
    fn set_source(&mut self, url: &str) {
        self.duration = None;
        self.seekable = false;
        self.time = 0.0;
        self.calls.push(Call::SetSource(url.to_string()));
    }

    fn clear_source(&mut self) {
        self.duration = None;
        self.seekable = false;
        self.calls.push(Call::ClearSource);
    }

    fn load(&mut self) {
        self.calls.push(Call::Load);
    }

    fn play(&mut self) -> Result<(), MediaErrorKind> {
        self.calls.push(Call::Play);
        self.play_result
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
        self.calls.push(Call::SetTime(seconds));
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_seekable(&self) -> bool {
        self.seekable
    }

    fn set_volume(&mut self, volume: f64) {
        self.calls.push(Call::Volume(volume));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.calls.push(Call::Rate(rate));
    }
}

fn ready(id: &str) -> Track {
    let mut track = Track::placeholder(TrackId::new(id), &GenerationParams::default(), None);
    track.media = TrackMedia::Ready {
        audio_url: format!("/audio/{id}.mp3"),
    };
    track
}

fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| ready(id)).collect()
}

fn controller() -> PlaybackController<RecordingMedia> {
    PlaybackController::new(RecordingMedia::new(), PlaybackConfig::default())
}

fn current_id(player: &PlaybackController<RecordingMedia>) -> String {
    player
        .current_track()
        .map(|t| t.id.as_str().to_string())
        .unwrap_or_default()
}

fn notifications(events: &[PlaybackEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::Notification { message } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

// ===== Seeking =====

#[test]
fn seek_before_metadata_is_applied_exactly_once() {
    let mut player = controller();
    let list = tracks(&["a", "b"]);
    player.play_track(&list[0], None, &list);

    player.seek(30.0);
    assert!(player.media().seeks().is_empty());
    assert_eq!(player.snapshot().pending_seek, Some(30.0));

    player.media_mut().make_ready(120.0);
    player.handle_media_event(MediaEvent::LoadedMetadata);
    player.handle_media_event(MediaEvent::CanPlay);
    player.handle_media_event(MediaEvent::Progress);

    assert_eq!(player.media().seeks(), vec![30.0]);
    let snapshot = player.snapshot();
    assert_eq!(snapshot.pending_seek, None);
    assert_eq!(snapshot.duration, Some(120.0));
    assert_eq!(snapshot.state, PlaybackState::Playing);
}

#[test]
fn latest_buffered_seek_wins_and_is_clamped() {
    let mut player = controller();
    let list = tracks(&["a"]);
    player.play_track(&list[0], None, &list);

    player.seek(10.0);
    player.seek(500.0);

    // Progress before the element is seekable keeps the target
    player.handle_media_event(MediaEvent::Progress);
    assert!(player.media().seeks().is_empty());

    player.media_mut().make_ready(120.0);
    player.handle_media_event(MediaEvent::Progress);
    assert_eq!(player.media().seeks(), vec![120.0]);
}

#[test]
fn seek_waits_for_both_duration_and_seekable_range() {
    let mut player = controller();
    let list = tracks(&["a"]);
    player.play_track(&list[0], None, &list);

    // Seekable range reported before metadata
    player.media_mut().seekable = true;
    player.seek(40.0);
    player.handle_media_event(MediaEvent::Progress);
    assert!(player.media().seeks().is_empty());

    // Metadata without a seekable range
    player.media_mut().seekable = false;
    player.media_mut().duration = Some(90.0);
    player.handle_media_event(MediaEvent::LoadedMetadata);
    assert!(player.media().seeks().is_empty());
    assert_eq!(player.snapshot().pending_seek, Some(40.0));

    player.media_mut().seekable = true;
    player.handle_media_event(MediaEvent::CanPlay);
    player.handle_media_event(MediaEvent::Progress);
    assert_eq!(player.media().seeks(), vec![40.0]);
    assert_eq!(player.snapshot().pending_seek, None);
}

#[test]
fn seek_on_ready_media_is_clamped_immediately() {
    let mut player = controller();
    let list = tracks(&["a"]);
    player.play_track(&list[0], None, &list);
    player.media_mut().make_ready(120.0);
    player.handle_media_event(MediaEvent::LoadedMetadata);

    player.seek(9999.0);
    player.seek(-5.0);

    assert_eq!(player.media().seeks(), vec![120.0, 0.0]);
    let applied: Vec<_> = player
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PlaybackEvent::SeekApplied { .. }))
        .collect();
    assert_eq!(applied.len(), 2);
}

#[test]
fn pending_seek_is_dropped_on_track_change() {
    let mut player = controller();
    let list = tracks(&["a", "b"]);
    player.play_track(&list[0], None, &list);
    player.seek(30.0);

    player.play_track(&list[1], None, &list);
    assert_eq!(player.snapshot().pending_seek, None);

    player.media_mut().make_ready(120.0);
    player.handle_media_event(MediaEvent::LoadedMetadata);
    assert!(player.media().seeks().is_empty());
}

// ===== Track Selection =====

#[test]
fn same_track_toggles_instead_of_reloading() {
    let mut player = controller();
    let list = tracks(&["a", "b"]);

    assert!(player.play_track(&list[0], None, &list));
    assert!(player.is_playing());
    assert_eq!(player.state(), PlaybackState::Playing);

    // A fresh copy with the same id is still the same track
    let copy = list[0].clone();
    assert!(!player.play_track(&copy, None, &list));
    assert!(!player.is_playing());
    assert_eq!(player.state(), PlaybackState::Paused);

    player.toggle_play();
    assert!(player.is_playing());

    let media = player.media();
    assert_eq!(media.count(|c| matches!(c, Call::SetSource(_))), 1);
    assert_eq!(media.count(|c| matches!(c, Call::Load)), 1);
    assert_eq!(media.count(|c| matches!(c, Call::Pause)), 1);
}

#[test]
fn toggle_without_track_does_nothing() {
    let mut player = controller();
    player.toggle_play();

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(player.drain_events().is_empty());
}

#[test]
fn explicit_list_becomes_the_queue() {
    let mut player = controller();
    let visible = tracks(&["a", "b", "c", "d"]);
    let filtered = tracks(&["b", "d"]);

    player.play_track(&filtered[1], Some(&filtered), &visible);
    let snapshot = player.snapshot();
    assert_eq!(
        snapshot.queue,
        vec![TrackId::new("b"), TrackId::new("d")]
    );
    assert_eq!(snapshot.queue_index, Some(1));

    player.next().unwrap();
    assert_eq!(current_id(&player), "b");
}

#[test]
fn placeholder_is_selected_but_not_loaded() {
    let mut player = controller();
    let generating = Track::placeholder(
        TrackId::placeholder(),
        &GenerationParams::default(),
        None,
    );

    player.play_track(&generating, None, &[]);

    assert!(player.current_track().is_some());
    assert!(!player.is_playing());
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.media().count(|c| matches!(c, Call::SetSource(_))), 0);
    assert_eq!(notifications(&player.drain_events()), vec![NOT_READY_MESSAGE]);
}

#[test]
fn track_changes_are_announced() {
    let mut player = controller();
    let list = tracks(&["a", "b"]);
    player.play_track(&list[0], None, &list);
    player.drain_events();

    player.play_track(&list[1], None, &list);
    let events = player.drain_events();
    assert!(events.contains(&PlaybackEvent::TrackChanged {
        track_id: TrackId::new("b"),
        previous_track_id: Some(TrackId::new("a")),
    }));
    assert!(events.contains(&PlaybackEvent::StateChanged {
        state: PlaybackState::Loading,
    }));
}

// ===== Navigation =====

#[test]
fn next_walks_the_queue_and_wraps() {
    let mut player = controller();
    let list = tracks(&["a", "b", "c"]);
    player.play_track(&list[1], None, &list);

    player.next().unwrap();
    assert_eq!(current_id(&player), "c");
    player.next().unwrap();
    assert_eq!(current_id(&player), "a");
    assert_eq!(
        player.media().calls.last(),
        Some(&Call::Play),
        "Advancing keeps playing"
    );
}

#[test]
fn previous_restarts_after_threshold() {
    let mut player = controller();
    let list = tracks(&["a", "b", "c"]);
    player.play_track(&list[0], None, &list);
    player.media_mut().make_ready(120.0);
    player.handle_media_event(MediaEvent::LoadedMetadata);

    player.media_mut().time = 10.0;
    player.previous().unwrap();
    assert_eq!(current_id(&player), "a");
    assert_eq!(player.media().seeks(), vec![0.0]);

    // Back at the start, previous moves (and wraps) backwards
    player.previous().unwrap();
    assert_eq!(current_id(&player), "c");
}

#[test]
fn previous_within_threshold_moves_back() {
    let mut player = controller();
    let list = tracks(&["a", "b", "c"]);
    player.play_track(&list[1], None, &list);
    player.media_mut().time = 2.5;

    player.previous().unwrap();
    assert_eq!(current_id(&player), "a");
}

#[test]
fn navigation_without_track_is_an_error() {
    let mut player = controller();
    assert_eq!(player.next(), Err(PlaybackError::NoTrackSelected));
    assert_eq!(player.previous(), Err(PlaybackError::NoTrackSelected));
}

#[test]
fn shuffle_always_leaves_the_current_track() {
    let mut player = controller();
    let list = tracks(&["a", "b", "c", "d"]);
    player.play_track(&list[0], None, &list);
    assert!(player.toggle_shuffle());

    for _ in 0..50 {
        let before = current_id(&player);
        player.next().unwrap();
        assert_ne!(current_id(&player), before);
    }
}

#[test]
fn repeat_one_restarts_on_end() {
    let mut player = controller();
    let list = tracks(&["a", "b"]);
    player.play_track(&list[0], None, &list);
    player.cycle_repeat();
    assert_eq!(player.cycle_repeat(), RepeatMode::One);

    player.media_mut().time = 119.0;
    player.handle_media_event(MediaEvent::Ended);

    assert_eq!(current_id(&player), "a");
    assert_eq!(player.media().seeks(), vec![0.0]);
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.media().count(|c| matches!(c, Call::SetSource(_))), 1);
}

#[test]
fn end_of_track_advances() {
    let mut player = controller();
    let list = tracks(&["a", "b"]);
    player.play_track(&list[0], None, &list);

    player.handle_media_event(MediaEvent::Ended);

    assert_eq!(current_id(&player), "b");
    assert_eq!(
        player.media().calls.iter().rev().find(|c| matches!(c, Call::SetSource(_))),
        Some(&Call::SetSource("/audio/b.mp3".into()))
    );
}

#[test]
fn single_track_queue_restarts_itself() {
    let mut player = controller();
    let only = ready("solo");
    player.play_track(&only, None, &[]);

    player.handle_media_event(MediaEvent::Ended);

    assert_eq!(current_id(&player), "solo");
    assert_eq!(player.media().seeks(), vec![0.0]);
    assert!(player.is_playing());
}

// ===== Media Errors =====

#[test]
fn aborted_load_is_swallowed() {
    let mut player = controller();
    let list = tracks(&["a"]);
    player.play_track(&list[0], None, &list);
    player.drain_events();

    player.handle_media_event(MediaEvent::Error(MediaErrorKind::Aborted));

    assert!(player.is_playing());
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.media().count(|c| matches!(c, Call::Pause)), 0);
    assert!(player.drain_events().is_empty());
    assert_eq!(player.snapshot().last_error, None);
}

#[test]
fn unsupported_media_pauses_and_notifies() {
    let mut player = controller();
    let list = tracks(&["a"]);
    player.play_track(&list[0], None, &list);
    player.drain_events();

    player.handle_media_event(MediaEvent::Error(MediaErrorKind::NotSupported));

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlaybackState::Errored);
    assert_eq!(player.media().count(|c| matches!(c, Call::Pause)), 1);
    assert_eq!(notifications(&player.drain_events()), vec![UNAVAILABLE_MESSAGE]);
    assert!(matches!(
        player.snapshot().last_error,
        Some(StudioError::PlaybackUnsupported(_))
    ));
}

#[test]
fn transient_media_error_pauses_silently() {
    let mut player = controller();
    let list = tracks(&["a"]);
    player.play_track(&list[0], None, &list);
    player.drain_events();

    player.handle_media_event(MediaEvent::Error(MediaErrorKind::Network));

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlaybackState::Errored);
    assert!(notifications(&player.drain_events()).is_empty());
    assert!(matches!(
        player.snapshot().last_error,
        Some(StudioError::PlaybackTransient(_))
    ));

    // Picking the track again recovers
    player.toggle_play();
    assert!(player.is_playing());
    assert_eq!(player.state(), PlaybackState::Playing);
}

#[test]
fn refused_play_is_handled_like_a_media_error() {
    let mut media = RecordingMedia::new();
    media.play_result = Err(MediaErrorKind::NotSupported);
    let mut player = PlaybackController::new(media, PlaybackConfig::default());
    let list = tracks(&["a"]);

    player.play_track(&list[0], None, &list);

    assert!(!player.is_playing());
    assert_eq!(player.state(), PlaybackState::Errored);
}

// ===== Settings =====

#[test]
fn volume_and_rate_are_applied_only_on_change() {
    let mut player = controller();
    assert_eq!(
        player.media().calls,
        vec![Call::Volume(0.8), Call::Rate(1.0)]
    );

    player.set_volume(0.8);
    player.set_playback_rate(1.0);
    assert_eq!(player.media().calls.len(), 2);

    player.set_volume(2.0);
    player.set_playback_rate(1.5);
    player.set_playback_rate(-1.0);
    assert_eq!(
        player.media().calls[2..],
        [Call::Volume(1.0), Call::Rate(1.5)]
    );

    // Track changes do not reapply either
    let list = tracks(&["a", "b"]);
    player.play_track(&list[0], None, &list);
    player.play_track(&list[1], None, &list);
    assert_eq!(player.media().count(|c| matches!(c, Call::Volume(_))), 2);
}

#[test]
fn cycle_repeat_goes_round() {
    let mut player = controller();
    assert_eq!(player.cycle_repeat(), RepeatMode::All);
    assert_eq!(player.cycle_repeat(), RepeatMode::One);
    assert_eq!(player.cycle_repeat(), RepeatMode::Off);
}

// ===== Deletion =====

#[test]
fn deleting_the_current_track_stops_playback() {
    let mut player = controller();
    let list = tracks(&["a", "b", "c"]);
    player.play_track(&list[1], None, &list);

    player.remove_tracks(&[TrackId::new("a")]);
    let snapshot = player.snapshot();
    assert_eq!(current_id(&player), "b");
    assert_eq!(snapshot.queue_index, Some(0));
    assert!(player.is_playing());

    player.remove_tracks(&[TrackId::new("b")]);
    assert!(player.current_track().is_none());
    assert!(!player.is_playing());
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.media().calls.last(), Some(&Call::ClearSource));
    assert_eq!(player.snapshot().queue, vec![TrackId::new("c")]);
}
