use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use super::*;
use crate::audio::{AudioEngine, MetadataReader};
use crate::config::LibrarySettings;
use crate::error::{EngineError, IngestError, MetadataError, PersistenceError};
use crate::queue::LoadReport;

const fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[derive(Debug, Clone, PartialEq)]
enum EngineCall {
    Load(PathBuf),
    Play(Duration),
    Pause,
    Unpause,
    Stop,
    Volume(f32),
}

#[derive(Default)]
struct EngineLog {
    calls: Vec<EngineCall>,
    busy: bool,
    failing: HashSet<PathBuf>,
}

#[derive(Clone, Default)]
struct FakeEngine(Rc<RefCell<EngineLog>>);

impl FakeEngine {
    fn calls(&self) -> Vec<EngineCall> {
        self.0.borrow().calls.clone()
    }

    fn loads(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::Load(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn finish_track(&self) {
        self.0.borrow_mut().busy = false;
    }
}

impl AudioEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut log = self.0.borrow_mut();
        if log.failing.contains(path) {
            return Err(EngineError::Decode {
                path: path.to_path_buf(),
                reason: "corrupt".into(),
            });
        }
        log.calls.push(EngineCall::Load(path.to_path_buf()));
        Ok(())
    }

    fn play(&mut self, start: Duration) -> Result<(), EngineError> {
        let mut log = self.0.borrow_mut();
        log.calls.push(EngineCall::Play(start));
        log.busy = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().calls.push(EngineCall::Pause);
    }

    fn unpause(&mut self) {
        self.0.borrow_mut().calls.push(EngineCall::Unpause);
    }

    fn stop(&mut self) {
        let mut log = self.0.borrow_mut();
        log.calls.push(EngineCall::Stop);
        log.busy = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().calls.push(EngineCall::Volume(volume));
    }

    fn is_busy(&self) -> bool {
        self.0.borrow().busy
    }
}

struct FakeMetadata(HashMap<PathBuf, Duration>);

impl MetadataReader for FakeMetadata {
    fn duration(&self, path: &Path) -> Result<Duration, MetadataError> {
        self.0.get(path).copied().ok_or_else(|| MetadataError::Unknown {
            path: path.to_path_buf(),
        })
    }
}

#[derive(Clone)]
struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

struct Harness {
    player: Player<FakeEngine, FakeMetadata>,
    engine: FakeEngine,
    clock: ManualClock,
    events: Receiver<PlayerEvent>,
    dir: TempDir,
}

impl Harness {
    /// Player with an empty queue; `tracks` exist on disk with the given lengths
    /// (0 means unknown) and `failing` ones are rejected by the engine.
    fn idle(tracks: &[(&str, u64)], failing: &[&str], options: PlayerOptions) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut lengths = HashMap::new();
        for (name, length) in tracks {
            let path = dir.path().join(name);
            std::fs::write(&path, b"x").unwrap();
            if *length > 0 {
                lengths.insert(path, secs(*length));
            }
        }

        let engine = FakeEngine::default();
        engine.0.borrow_mut().failing = failing.iter().map(|n| dir.path().join(n)).collect();
        let clock = ManualClock(Rc::new(Cell::new(Instant::now())));
        let (tx, rx) = mpsc::channel();

        let player = Player::with_clock(
            engine.clone(),
            FakeMetadata(lengths),
            Box::new(clock.clone()),
            options,
            Box::new(tx),
        );

        Self {
            player,
            engine,
            clock,
            events: rx,
            dir,
        }
    }

    /// Player that opened the folder holding `tracks` and is playing the first.
    fn playing(tracks: &[(&str, u64)]) -> Self {
        Self::playing_with(tracks, &[], PlayerOptions::default())
    }

    fn playing_with(tracks: &[(&str, u64)], failing: &[&str], options: PlayerOptions) -> Self {
        let mut h = Self::idle(tracks, failing, options);
        let dir = h.dir.path().to_path_buf();
        h.player
            .open_folder(&dir, &LibrarySettings::default())
            .unwrap();
        h
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn drain(&self) -> Vec<PlayerEvent> {
        self.events.try_iter().collect()
    }

    fn last_progress(&self) -> Option<Duration> {
        self.drain().into_iter().rev().find_map(|e| match e {
            PlayerEvent::Progress { elapsed, .. } => Some(elapsed),
            _ => None,
        })
    }

    /// Let the current track run out and deliver the tick that notices.
    fn finish_current(&mut self, played: Duration) {
        self.clock.advance(played);
        self.engine.finish_track();
        self.player.poll();
    }
}

#[test]
fn opening_a_folder_plays_the_first_track() {
    let h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert_eq!(h.player.queue().current_index(), Some(0));
    assert_eq!(h.player.now_playing(), Some(h.path("a.mp3").as_path()));
    assert_eq!(h.player.total(), Some(secs(30)));
    assert_eq!(h.engine.loads(), vec![h.path("a.mp3")]);

    let events = h.drain();
    assert!(events.contains(&PlayerEvent::StatusChanged {
        state: PlaybackState::Playing,
        track: Some(h.path("a.mp3")),
    }));
    assert!(events.contains(&PlayerEvent::QueueChanged {
        tracks: vec![h.path("a.mp3"), h.path("b.mp3")],
        current: Some(0),
    }));
}

#[test]
fn tick_publishes_elapsed_time() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.drain();
    h.clock.advance(Duration::from_millis(1500));
    h.player.poll();
    assert_eq!(h.last_progress(), Some(Duration::from_millis(1500)));
    assert!(h.player.time_until_tick().is_some());
}

#[test]
fn poll_before_due_does_nothing() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.drain();
    h.clock.advance(Duration::from_millis(40));
    h.player.poll();
    assert_eq!(h.last_progress(), None);
    assert_eq!(h.player.time_until_tick(), Some(Duration::from_millis(60)));
}

#[test]
fn seek_then_tick_shows_the_target() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.clock.advance(secs(2));
    h.player.seek(secs(10));

    let calls = h.engine.calls();
    assert_eq!(
        calls[calls.len() - 4..],
        [
            EngineCall::Stop,
            EngineCall::Load(h.path("a.mp3")),
            EngineCall::Play(secs(10)),
            EngineCall::Volume(1.0),
        ]
    );

    h.drain();
    h.player.tick();
    assert_eq!(h.last_progress(), Some(secs(10)));
    assert_eq!(h.player.elapsed(), secs(10));

    h.clock.advance(secs(3));
    assert_eq!(h.player.elapsed(), secs(13));
}

#[test]
fn seek_clamps_to_track_length() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.player.seek(secs(100));
    assert_eq!(h.engine.calls().last(), Some(&EngineCall::Volume(1.0)));
    assert!(h.engine.calls().contains(&EngineCall::Play(secs(30))));
    assert_eq!(h.player.elapsed(), secs(30));
}

#[test]
fn seek_is_ignored_when_length_is_unknown() {
    let mut h = Harness::playing(&[("a.mp3", 0)]);
    assert_eq!(h.player.total(), None);
    let before = h.engine.calls();
    h.player.seek(secs(5));
    assert_eq!(h.engine.calls(), before);
}

#[test]
fn seek_by_moves_relative_to_elapsed() {
    let mut h = Harness::playing(&[("a.mp3", 60)]);
    h.clock.advance(secs(20));
    h.player.seek_by(5);
    assert_eq!(h.player.elapsed(), secs(25));
    h.player.seek_by(-30);
    assert_eq!(h.player.elapsed(), Duration::ZERO);
}

#[test]
fn seek_by_extreme_offsets_clamps_to_track_bounds() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.clock.advance(secs(5));
    h.player.seek_by(i64::MAX);
    assert!(h.engine.calls().contains(&EngineCall::Play(secs(30))));
    assert_eq!(h.player.elapsed(), secs(30));

    h.player.seek_by(i64::MIN);
    assert_eq!(h.player.elapsed(), Duration::ZERO);
}

#[test]
fn seeking_while_paused_resumes_playback() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.clock.advance(secs(4));
    h.player.toggle_pause();
    h.player.seek(secs(12));
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert!(h.player.time_until_tick().is_some());
    h.clock.advance(secs(1));
    assert_eq!(h.player.elapsed(), secs(13));
}

#[test]
fn pause_freezes_elapsed_and_resume_continues() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.clock.advance(secs(5));

    h.player.toggle_pause();
    assert_eq!(h.player.state(), PlaybackState::Paused);
    assert_eq!(h.engine.calls().last(), Some(&EngineCall::Pause));
    assert_eq!(h.player.time_until_tick(), None);
    assert_eq!(h.player.elapsed(), secs(5));

    h.clock.advance(secs(60));
    h.player.poll();
    assert_eq!(h.player.elapsed(), secs(5));

    h.player.toggle_pause();
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert_eq!(h.engine.calls().last(), Some(&EngineCall::Unpause));
    assert_eq!(h.player.elapsed(), secs(5));

    h.clock.advance(secs(2));
    assert_eq!(h.player.elapsed(), secs(7));
}

#[test]
fn toggle_pause_without_a_track_does_nothing() {
    let mut h = Harness::idle(&[], &[], PlayerOptions::default());
    h.player.toggle_pause();
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert!(h.engine.calls().iter().all(|c| matches!(c, EngineCall::Volume(_))));
    assert!(h.drain().is_empty());
}

#[test]
fn finished_track_advances_to_the_next() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.finish_current(secs(30));

    assert_eq!(h.player.queue().current_index(), Some(1));
    assert_eq!(h.player.now_playing(), Some(h.path("b.mp3").as_path()));
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert_eq!(h.player.total(), Some(secs(20)));
    assert_eq!(h.player.elapsed(), Duration::ZERO);
}

#[test]
fn media_loop_replays_the_same_track() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.player.set_loop_mode(LoopMode::Media);
    h.finish_current(secs(30));

    assert_eq!(h.player.queue().current_index(), Some(0));
    assert_eq!(h.engine.loads(), vec![h.path("a.mp3"), h.path("a.mp3")]);
    assert_eq!(h.player.elapsed(), Duration::ZERO);
}

#[test]
fn end_of_queue_stops_without_looping() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.finish_current(secs(30));

    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.player.now_playing(), None);
    assert_eq!(h.player.time_until_tick(), None);
    assert_eq!(h.player.queue().current_index(), Some(0));
}

#[test]
fn queue_loop_wraps_to_the_first_track() {
    let options = PlayerOptions {
        loop_mode: LoopMode::Queue,
        ..PlayerOptions::default()
    };
    let mut h = Harness::playing_with(&[("a.mp3", 30), ("b.mp3", 20)], &[], options);
    h.player.next();
    assert_eq!(h.player.queue().current_index(), Some(1));
    h.finish_current(secs(20));
    assert_eq!(h.player.queue().current_index(), Some(0));
    assert_eq!(h.player.state(), PlaybackState::Playing);
}

#[test]
fn next_at_last_track_stays_put() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.player.next();
    let loads = h.engine.loads().len();
    h.player.next();
    assert_eq!(h.player.queue().current_index(), Some(1));
    assert_eq!(h.engine.loads().len(), loads);
}

#[test]
fn previous_early_in_a_track_goes_back() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.player.next();
    h.clock.advance(secs(1));
    h.player.previous();
    assert_eq!(h.player.queue().current_index(), Some(0));
    assert_eq!(h.player.now_playing(), Some(h.path("a.mp3").as_path()));
}

#[test]
fn previous_late_in_a_track_restarts_it() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.player.next();
    h.clock.advance(secs(10));
    h.player.previous();
    assert_eq!(h.player.queue().current_index(), Some(1));
    assert_eq!(
        h.engine.loads(),
        vec![h.path("a.mp3"), h.path("b.mp3"), h.path("b.mp3")]
    );
    assert_eq!(h.player.elapsed(), Duration::ZERO);
}

#[test]
fn previous_on_first_track_restarts_it() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.player.previous();
    assert_eq!(h.player.queue().current_index(), Some(0));
    assert_eq!(h.engine.loads(), vec![h.path("a.mp3"), h.path("a.mp3")]);
}

#[test]
fn unplayable_track_is_skipped() {
    let h = Harness::playing_with(
        &[("a.mp3", 30), ("b.mp3", 20)],
        &["a.mp3"],
        PlayerOptions::default(),
    );
    assert_eq!(h.player.queue().current_index(), Some(1));
    assert_eq!(h.player.now_playing(), Some(h.path("b.mp3").as_path()));
    assert_eq!(h.player.state(), PlaybackState::Playing);
}

#[test]
fn unplayable_track_is_not_retried_in_media_loop() {
    let options = PlayerOptions {
        loop_mode: LoopMode::Media,
        ..PlayerOptions::default()
    };
    let h = Harness::playing_with(&[("a.mp3", 30), ("b.mp3", 20)], &["a.mp3"], options);
    assert_eq!(h.player.now_playing(), Some(h.path("b.mp3").as_path()));
}

#[test]
fn queue_of_unplayable_tracks_stops_even_when_looping() {
    let options = PlayerOptions {
        loop_mode: LoopMode::Queue,
        ..PlayerOptions::default()
    };
    let h = Harness::playing_with(
        &[("a.mp3", 30), ("b.mp3", 20), ("c.mp3", 10)],
        &["a.mp3", "b.mp3", "c.mp3"],
        options,
    );
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.player.now_playing(), None);
    assert_eq!(h.player.time_until_tick(), None);
    assert!(h.engine.loads().is_empty());
}

#[test]
fn play_at_jumps_and_plays() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20), ("c.mp3", 10)]);
    h.player.play_at(2);
    assert_eq!(h.player.now_playing(), Some(h.path("c.mp3").as_path()));

    h.player.play_at(7);
    assert_eq!(h.player.queue().current_index(), Some(2));
}

#[test]
fn add_file_starts_playback_only_when_stopped() {
    let mut h = Harness::idle(&[("a.mp3", 30), ("b.mp3", 20)], &[], PlayerOptions::default());
    h.player.add_file(h.path("a.mp3")).unwrap();
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert_eq!(h.player.queue().current_index(), Some(0));

    h.player.add_file(h.path("b.mp3")).unwrap();
    assert_eq!(h.player.queue().len(), 2);
    assert_eq!(h.player.now_playing(), Some(h.path("a.mp3").as_path()));
}

#[test]
fn video_and_missing_files_are_rejected() {
    let mut h = Harness::idle(&[("clip.mp4", 0)], &[], PlayerOptions::default());
    assert!(matches!(
        h.player.open_file(h.path("clip.mp4")),
        Err(IngestError::VideoNotSupported(_))
    ));
    assert!(matches!(
        h.player.add_file(h.path("nope.mp3")),
        Err(IngestError::NotFound(_))
    ));
    assert!(h.player.queue().is_empty());
}

#[test]
fn folder_without_audio_is_rejected() {
    let mut h = Harness::idle(&[("notes.txt", 0)], &[], PlayerOptions::default());
    let dir = h.dir.path().to_path_buf();
    assert!(matches!(
        h.player.open_folder(&dir, &LibrarySettings::default()),
        Err(IngestError::NoAudioFiles(_))
    ));
    assert_eq!(h.player.state(), PlaybackState::Stopped);
}

#[test]
fn add_folder_while_playing_keeps_current_track() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    let extra = tempfile::tempdir().unwrap();
    std::fs::write(extra.path().join("x.flac"), b"x").unwrap();
    std::fs::write(extra.path().join("y.ogg"), b"x").unwrap();

    let added = h
        .player
        .add_folder(extra.path(), &LibrarySettings::default())
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(h.player.queue().len(), 3);
    assert_eq!(h.player.queue().current_index(), Some(0));
    assert_eq!(h.engine.loads().len(), 1);
}

#[test]
fn removing_the_playing_entry_keeps_it_audible() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20), ("c.mp3", 10)]);
    h.drain();
    let removed = h.player.remove(0).unwrap();
    assert_eq!(removed, h.path("a.mp3"));
    assert_eq!(h.player.now_playing(), Some(h.path("a.mp3").as_path()));
    assert_eq!(h.player.queue().current(), Some(h.path("b.mp3").as_path()));
    assert_eq!(h.player.playing_index(), None);
    assert!(h.drain().contains(&PlayerEvent::QueueChanged {
        tracks: vec![h.path("b.mp3"), h.path("c.mp3")],
        current: None,
    }));
    assert!(h.player.remove(5).is_err());

    h.finish_current(secs(30));
    assert_eq!(h.player.now_playing(), Some(h.path("b.mp3").as_path()));
    assert_eq!(h.player.playing_index(), Some(0));
    assert_eq!(h.engine.loads(), vec![h.path("a.mp3"), h.path("b.mp3")]);
}

#[test]
fn removed_track_is_not_looped_in_media_mode() {
    let options = PlayerOptions {
        loop_mode: LoopMode::Media,
        ..PlayerOptions::default()
    };
    let mut h = Harness::playing_with(&[("a.mp3", 30), ("b.mp3", 20), ("c.mp3", 10)], &[], options);
    h.player.remove(0).unwrap();
    h.finish_current(secs(30));
    assert_eq!(h.player.now_playing(), Some(h.path("b.mp3").as_path()));
    assert_eq!(h.player.queue().current_index(), Some(0));
}

#[test]
fn next_after_removing_the_playing_entry_plays_its_successor() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20), ("c.mp3", 10)]);
    h.player.remove(0).unwrap();
    h.player.next();
    assert_eq!(h.player.now_playing(), Some(h.path("b.mp3").as_path()));
}

#[test]
fn removing_the_playing_last_entry_ends_the_queue_after_it() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.player.next();
    h.player.remove(1).unwrap();
    assert_eq!(h.player.queue().current_index(), Some(0));

    h.finish_current(secs(20));
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.engine.loads(), vec![h.path("a.mp3"), h.path("b.mp3")]);
}

#[test]
fn previous_after_removing_the_playing_entry_goes_before_it() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20), ("c.mp3", 10)]);
    h.player.next();
    h.player.remove(1).unwrap();
    h.clock.advance(secs(10));
    h.player.previous();
    assert_eq!(h.player.now_playing(), Some(h.path("a.mp3").as_path()));
    assert_eq!(h.player.queue().current_index(), Some(0));
}

#[test]
fn moving_and_shuffling_keep_the_current_track() {
    let mut h = Harness::playing(&[("a.mp3", 1), ("b.mp3", 1), ("c.mp3", 1), ("d.mp3", 1)]);
    h.player.move_track(0, 3).unwrap();
    assert_eq!(h.player.queue().current_index(), Some(3));
    assert!(h.player.move_track(0, 9).is_err());

    h.player.shuffle();
    assert_eq!(h.player.queue().current(), Some(h.path("a.mp3").as_path()));
    assert_eq!(h.player.queue().len(), 4);
}

#[test]
fn loop_mode_cycles_and_is_announced() {
    let mut h = Harness::idle(&[], &[], PlayerOptions::default());
    h.player.cycle_loop_mode();
    h.player.cycle_loop_mode();
    assert_eq!(h.player.loop_mode(), LoopMode::Queue);
    h.player.cycle_loop_mode();
    assert_eq!(h.player.loop_mode(), LoopMode::None);
    assert_eq!(
        h.drain(),
        vec![
            PlayerEvent::LoopModeChanged(LoopMode::Media),
            PlayerEvent::LoopModeChanged(LoopMode::Queue),
            PlayerEvent::LoopModeChanged(LoopMode::None),
        ]
    );
}

#[test]
fn volume_is_clamped_and_reapplied_on_load() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    h.player.set_volume(150);
    assert_eq!(h.player.volume(), 100);
    h.player.set_volume(40);
    assert_eq!(h.engine.calls().last(), Some(&EngineCall::Volume(0.4)));
    assert!(h.drain().contains(&PlayerEvent::VolumeChanged(40)));

    h.player.next();
    assert_eq!(h.engine.calls().last(), Some(&EngineCall::Volume(0.4)));
}

#[test]
fn stop_unloads_the_track() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    h.player.stop();
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.player.now_playing(), None);
    assert_eq!(h.engine.calls().last(), Some(&EngineCall::Stop));
}

#[test]
fn loading_a_document_filters_and_plays_the_first_entry() {
    let mut h = Harness::idle(
        &[("song.mp3", 30), ("clip.mp4", 0)],
        &[],
        PlayerOptions::default(),
    );
    let doc = h.path("saved.lukyland");
    let json = serde_json::json!({
        "queue": [h.path("gone.mp3"), h.path("clip.mp4"), h.path("song.mp3")],
        "current_index": 2,
    });
    std::fs::write(&doc, json.to_string()).unwrap();

    let report = h.player.load_queue(&doc).unwrap();
    assert_eq!(
        report,
        LoadReport {
            loaded: 1,
            missing: 1,
            video: 1
        }
    );
    assert_eq!(h.player.queue().tracks(), [h.path("song.mp3")].as_slice());
    assert_eq!(h.player.queue().current_index(), Some(0));
    assert_eq!(h.player.state(), PlaybackState::Playing);
}

#[test]
fn failed_load_leaves_the_queue_alone() {
    let mut h = Harness::playing(&[("a.mp3", 30)]);
    let doc = h.path("bad.lukyland");
    std::fs::write(&doc, b"{ nope").unwrap();

    assert!(matches!(
        h.player.load_queue(&doc),
        Err(PersistenceError::Json(_))
    ));
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert_eq!(h.player.queue().len(), 1);
}

#[test]
fn save_then_load_restores_the_queue() {
    let mut h = Harness::playing(&[("a.mp3", 30), ("b.mp3", 20)]);
    let doc = h.path("q.lukyland");
    h.player.save_queue(&doc).unwrap();

    h.player.remove(1).unwrap();
    h.player.load_queue(&doc).unwrap();
    assert_eq!(
        h.player.queue().tracks(),
        [h.path("a.mp3"), h.path("b.mp3")].as_slice()
    );
    assert_eq!(h.player.now_playing(), Some(h.path("a.mp3").as_path()));
}

#[test]
fn saving_an_empty_queue_is_refused() {
    let h = Harness::idle(&[], &[], PlayerOptions::default());
    assert!(matches!(
        h.player.save_queue(&h.path("q.lukyland")),
        Err(PersistenceError::EmptyQueue)
    ));
}
