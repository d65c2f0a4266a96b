use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{AudioEngine, MetadataReader};
use crate::config::{LibrarySettings, PlaybackSettings};
use crate::error::{EngineError, IngestError, PersistenceError, QueueError};
use crate::library::{display_name, format_mmss, is_video_file, scan_folder};
use crate::queue::{self, LoadReport, Queue};

use super::events::PlayerObserver;
use super::progress::{Clock, ProgressAnchor, SystemClock, Ticker};
use super::types::{LoopMode, PlaybackState};

/// Startup knobs for a `Player`.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Progress tick period.
    pub tick: Duration,
    /// "Previous" restarts the current track once this much of it has played.
    pub restart_threshold: Duration,
    /// Volume in percent.
    pub volume: u8,
    pub loop_mode: LoopMode,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            restart_threshold: Duration::from_secs(3),
            volume: 100,
            loop_mode: LoopMode::None,
        }
    }
}

impl From<&PlaybackSettings> for PlayerOptions {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            tick: Duration::from_millis(settings.tick_ms.max(1)),
            restart_threshold: Duration::from_millis(settings.restart_threshold_ms),
            volume: settings.volume.min(100),
            loop_mode: settings.loop_mode.into(),
        }
    }
}

/// Where the queue stands after the loaded track's entry was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detached {
    /// The following entry slid into the removed slot and is `current`.
    SlidIn,
    /// The removed entry was last; `current` is the one before it.
    WasLast,
}

/// Queue and playback controller.
///
/// Owns the queue, drives the engine, and keeps the displayed elapsed time
/// consistent across play, pause, seek and track changes. All methods run on
/// one thread; the caller drives `poll` from its event loop.
pub struct Player<E, M> {
    engine: E,
    metadata: M,
    clock: Box<dyn Clock>,
    observer: Box<dyn PlayerObserver>,

    queue: Queue,
    state: PlaybackState,
    loop_mode: LoopMode,
    volume: u8,
    restart_threshold: Duration,

    /// Track the engine currently has loaded.
    loaded: Option<PathBuf>,
    total: Option<Duration>,
    anchor: Option<ProgressAnchor>,
    /// Last published elapsed time; frozen while paused.
    shown: Duration,
    ticker: Ticker,
    /// Set while the loaded track is no longer in the queue.
    detached: Option<Detached>,
}

impl<E: AudioEngine, M: MetadataReader> Player<E, M> {
    pub fn new(
        engine: E,
        metadata: M,
        options: PlayerOptions,
        observer: Box<dyn PlayerObserver>,
    ) -> Self {
        Self::with_clock(engine, metadata, Box::new(SystemClock), options, observer)
    }

    pub fn with_clock(
        mut engine: E,
        metadata: M,
        clock: Box<dyn Clock>,
        options: PlayerOptions,
        observer: Box<dyn PlayerObserver>,
    ) -> Self {
        let volume = options.volume.min(100);
        engine.set_volume(gain(volume));

        Self {
            engine,
            metadata,
            clock,
            observer,
            queue: Queue::new(),
            state: PlaybackState::Stopped,
            loop_mode: options.loop_mode,
            volume,
            restart_threshold: options.restart_threshold,
            loaded: None,
            total: None,
            anchor: None,
            shown: Duration::ZERO,
            ticker: Ticker::new(options.tick),
            detached: None,
        }
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn now_playing(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    /// Length of the loaded track, `None` when it could not be determined.
    pub fn total(&self) -> Option<Duration> {
        self.total
    }

    /// Queue entry being played; `None` once the loaded track was removed.
    pub fn playing_index(&self) -> Option<usize> {
        match self.detached {
            Some(_) => None,
            None => self.queue.current_index(),
        }
    }

    /// Elapsed time of the loaded track right now.
    pub fn elapsed(&self) -> Duration {
        match (self.state, self.anchor) {
            (PlaybackState::Playing, Some(anchor)) => anchor.elapsed(self.clock.now()),
            _ => self.shown,
        }
    }

    // Adding tracks.

    /// Replace the queue with a single file and play it.
    pub fn open_file(&mut self, path: PathBuf) -> Result<(), IngestError> {
        check_playable(&path)?;
        self.replace_queue(vec![path]);
        self.load_and_play();
        Ok(())
    }

    /// Replace the queue with the audio files of `dir` and play the first one.
    pub fn open_folder(&mut self, dir: &Path, settings: &LibrarySettings) -> Result<usize, IngestError> {
        let files = read_folder(dir, settings)?;
        let count = files.len();
        info!(dir = %dir.display(), count, "opened folder");
        self.replace_queue(files);
        self.load_and_play();
        Ok(count)
    }

    /// Append a file; it starts playing when nothing else is.
    pub fn add_file(&mut self, path: PathBuf) -> Result<(), IngestError> {
        check_playable(&path)?;
        info!(track = %display_name(&path), "added to queue");
        self.queue.append(path);

        if self.state == PlaybackState::Stopped {
            self.jump_and_play(self.queue.len() - 1);
        } else {
            self.publish_queue();
        }
        Ok(())
    }

    /// Append the audio files of `dir`; playback starts only if the queue was empty and idle.
    pub fn add_folder(&mut self, dir: &Path, settings: &LibrarySettings) -> Result<usize, IngestError> {
        let files = read_folder(dir, settings)?;
        let count = files.len();
        let start_playing = self.state == PlaybackState::Stopped && self.queue.is_empty();

        self.queue.append_all(files);
        info!(dir = %dir.display(), count, "added folder to queue");

        if start_playing {
            self.jump_and_play(0);
        } else {
            self.publish_queue();
        }
        Ok(count)
    }

    // Queue edits.

    /// Make `index` current and play it.
    pub fn play_at(&mut self, index: usize) {
        self.jump_and_play(index);
    }

    pub fn move_track(&mut self, from: usize, to: usize) -> Result<(), QueueError> {
        self.queue.move_track(from, to).inspect_err(|e| {
            warn!(error = %e, from, to, "move ignored");
        })?;
        debug!(from, to, "moved queue entry");
        self.publish_queue();
        Ok(())
    }

    /// Remove an entry. Playback of the loaded track is not interrupted.
    ///
    /// When the playing entry goes, the next advance lands on whatever took
    /// its place instead of skipping past it.
    pub fn remove(&mut self, index: usize) -> Result<PathBuf, QueueError> {
        let was_current = self.queue.current_index() == Some(index);
        let removed = self.queue.remove(index).inspect_err(|e| {
            warn!(error = %e, index, "remove ignored");
        })?;
        if was_current && self.loaded.is_some() {
            self.detached = match self.queue.len() {
                0 => None,
                len if index < len => Some(Detached::SlidIn),
                _ => Some(Detached::WasLast),
            };
        }
        info!(track = %display_name(&removed), "removed from queue");
        self.publish_queue();
        Ok(removed)
    }

    pub fn shuffle(&mut self) {
        if self.queue.len() <= 1 {
            debug!("nothing to shuffle");
            return;
        }
        self.queue.shuffle();
        info!(items = self.queue.len(), "queue shuffled");
        self.publish_queue();
    }

    // Transport.

    pub fn toggle_pause(&mut self) {
        if self.loaded.is_none() {
            return;
        }

        let now = self.clock.now();
        match self.state {
            PlaybackState::Stopped => return,
            PlaybackState::Paused => {
                self.engine.unpause();
                if let Some(anchor) = self.anchor.as_mut() {
                    anchor.resume_from(now, self.shown);
                }
                self.state = PlaybackState::Playing;
                self.ticker.schedule(now);
                info!("resumed");
            }
            PlaybackState::Playing => {
                self.engine.pause();
                if let Some(anchor) = self.anchor {
                    self.shown = anchor.elapsed(now);
                }
                self.state = PlaybackState::Paused;
                self.ticker.cancel();
                info!("paused");
            }
        }

        self.publish_status();
        self.publish_progress();
    }

    /// Restart the loaded track at `target`, clamped to its length.
    ///
    /// Ignored while nothing is loaded or the length is unknown.
    pub fn seek(&mut self, target: Duration) {
        let Some(path) = self.loaded.clone() else {
            debug!("seek ignored: nothing loaded");
            return;
        };
        let Some(total) = self.total else {
            debug!("seek ignored: track length unknown");
            return;
        };
        let target = target.min(total);

        // No native seek: reload and start at the offset.
        self.engine.stop();
        let started = self
            .engine
            .load(&path)
            .and_then(|()| self.engine.play(target));
        if let Err(e) = started {
            warn!(track = %display_name(&path), error = %e, "seek reload failed, skipping");
            self.loaded = None;
            self.skip_failed(1);
            return;
        }
        self.engine.set_volume(gain(self.volume));

        let now = self.clock.now();
        self.anchor = Some(ProgressAnchor::new(now, target, self.total));
        self.shown = target;
        self.state = PlaybackState::Playing;
        if !self.ticker.is_active() {
            self.ticker.schedule(now);
        }
        info!(to = %format_mmss(target), "seeked");

        self.publish_status();
        self.publish_progress();
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let current = self.elapsed();
        let delta = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs < 0 {
            current.saturating_sub(delta)
        } else {
            current.saturating_add(delta)
        };
        self.seek(target);
    }

    /// Skip forward; at the last track only wraps when looping the queue.
    pub fn next(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if self.step_forward() {
            self.load_and_play();
        } else {
            info!("already at last track");
        }
    }

    /// Go back one track, or restart the current one once it has played a while.
    ///
    /// With the loaded track removed from the queue, goes to the entry that
    /// preceded it.
    pub fn previous(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        match (self.detached.take(), self.queue.current_index()) {
            (Some(Detached::SlidIn), Some(current)) if current > 0 => {
                self.jump_and_play(current - 1);
                return;
            }
            (Some(_), _) => {
                self.load_and_play();
                return;
            }
            (None, _) => {}
        }

        match self.queue.current_index() {
            Some(current) if self.queue.has_previous() && self.elapsed() < self.restart_threshold => {
                self.jump_and_play(current - 1);
            }
            Some(_) => {
                debug!("restarting current track");
                self.load_and_play();
            }
            None => self.jump_and_play(0),
        }
    }

    /// Stop playback and unload the track.
    pub fn stop(&mut self) {
        if self.loaded.is_none() && self.state == PlaybackState::Stopped {
            return;
        }
        self.halt();
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
        info!(mode = mode.label(), "loop mode");
        self.observer.on_loop_mode_changed(mode);
    }

    pub fn cycle_loop_mode(&mut self) {
        self.set_loop_mode(self.loop_mode.cycled());
    }

    /// Set the volume in percent; values above 100 are clamped.
    pub fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
        self.engine.set_volume(gain(self.volume));
        self.observer.on_volume_changed(self.volume);
    }

    // Persistence.

    pub fn save_queue(&self, path: &Path) -> Result<(), PersistenceError> {
        queue::save_queue(&self.queue, path)
    }

    /// Replace the queue with a saved one and play its first playable entry.
    ///
    /// On error the current queue and playback are left untouched.
    pub fn load_queue(&mut self, path: &Path) -> Result<LoadReport, PersistenceError> {
        let (tracks, report) = queue::read_queue_document(path)?.into_playable()?;

        self.stop();
        self.replace_queue(tracks);
        info!(path = %path.display(), loaded = report.loaded, "queue loaded");
        self.load_and_play();
        Ok(report)
    }

    // Progress tracking.

    /// Run the pending tick if it is due.
    pub fn poll(&mut self) {
        if self.ticker.take_due(self.clock.now()) {
            self.tick();
        }
    }

    /// How long until the next tick, `None` when the tracker is dormant.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.ticker.time_until_due(self.clock.now())
    }

    /// One progress step: publish elapsed time, or detect the end of the track.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            self.ticker.cancel();
            return;
        }

        let now = self.clock.now();
        if self.engine.is_busy() {
            if let Some(anchor) = self.anchor {
                self.shown = anchor.elapsed(now);
            }
            self.publish_progress();
            self.ticker.schedule(now);
        } else {
            self.ticker.cancel();
            self.on_engine_finished();
        }
    }

    /// The engine ran out of audio for the current track.
    pub fn on_engine_finished(&mut self) {
        // A removed track is not looped; the queue moves on instead.
        if self.loop_mode == LoopMode::Media
            && self.detached.is_none()
            && self.queue.current().is_some()
        {
            debug!("looping current track");
            self.load_and_play();
        } else if self.step_forward() {
            self.load_and_play();
        } else {
            info!("end of queue");
            self.halt();
        }
    }

    // Internals.

    fn replace_queue(&mut self, tracks: Vec<PathBuf>) {
        self.detached = None;
        let start = (!tracks.is_empty()).then_some(0);
        if let Err(e) = self.queue.set_queue(tracks, start) {
            warn!(error = %e, "queue not replaced");
        }
    }

    fn jump_and_play(&mut self, index: usize) {
        match self.queue.jump_to(index) {
            Ok(()) => {
                self.detached = None;
                self.load_and_play();
            }
            Err(e) => warn!(error = %e, "jump ignored"),
        }
    }

    /// Move `current` on by one, wrapping only in queue-loop mode.
    ///
    /// Right after the loaded track was removed, the entry that slid into its
    /// slot is already next.
    fn step_forward(&mut self) -> bool {
        if self.detached.take() == Some(Detached::SlidIn) {
            return self.queue.current().is_some();
        }
        match self.queue.next_index(self.loop_mode == LoopMode::Queue) {
            Some(index) => self.queue.jump_to(index).is_ok(),
            None => false,
        }
    }

    /// Play the current queue entry, skipping entries the engine rejects.
    fn load_and_play(&mut self) {
        self.play_from_current(0);
    }

    fn skip_failed(&mut self, failures: usize) {
        if failures < self.queue.len() && self.step_forward() {
            self.play_from_current(failures);
        } else {
            self.halt();
        }
    }

    fn play_from_current(&mut self, mut failures: usize) {
        while let Some(path) = self.queue.current().map(Path::to_path_buf) {
            match self.start_track(&path) {
                Ok(()) => {
                    info!(track = %display_name(&path), "now playing");
                    self.publish_queue();
                    return;
                }
                Err(e) => {
                    warn!(track = %display_name(&path), error = %e, "could not play track, skipping");
                    failures += 1;
                    // Every entry failed once in a row: give up instead of cycling.
                    if failures >= self.queue.len() || !self.step_forward() {
                        break;
                    }
                }
            }
        }
        self.halt();
    }

    fn start_track(&mut self, path: &Path) -> Result<(), EngineError> {
        let total = match self.metadata.duration(path) {
            Ok(d) => Some(d),
            Err(e) => {
                debug!(error = %e, "track length unavailable");
                None
            }
        };

        self.engine.stop();
        self.loaded = None;
        self.engine.load(path)?;
        self.engine.play(Duration::ZERO)?;
        self.engine.set_volume(gain(self.volume));

        let now = self.clock.now();
        self.loaded = Some(path.to_path_buf());
        self.total = total;
        self.anchor = Some(ProgressAnchor::new(now, Duration::ZERO, total));
        self.shown = Duration::ZERO;
        self.state = PlaybackState::Playing;
        self.detached = None;
        self.ticker.schedule(now);

        self.publish_status();
        self.publish_progress();
        Ok(())
    }

    fn halt(&mut self) {
        self.engine.stop();
        self.loaded = None;
        self.detached = None;
        self.anchor = None;
        self.state = PlaybackState::Stopped;
        self.ticker.cancel();

        self.publish_status();
        self.publish_queue();
    }

    fn publish_status(&mut self) {
        self.observer
            .on_playback_status_changed(self.state, self.loaded.as_deref());
    }

    fn publish_queue(&mut self) {
        let playing = self.playing_index();
        self.observer.on_queue_changed(&self.queue, playing);
    }

    fn publish_progress(&mut self) {
        self.observer.on_progress_updated(self.shown, self.total);
    }
}

fn gain(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

fn check_playable(path: &Path) -> Result<(), IngestError> {
    if is_video_file(path) {
        return Err(IngestError::VideoNotSupported(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

fn read_folder(dir: &Path, settings: &LibrarySettings) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::NotFound(dir.to_path_buf()));
    }
    let files = scan_folder(dir, settings);
    if files.is_empty() {
        return Err(IngestError::NoAudioFiles(dir.to_path_buf()));
    }
    Ok(files)
}
