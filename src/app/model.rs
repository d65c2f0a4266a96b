//! View model fed by `PlayerEvent`s.

use std::path::PathBuf;
use std::time::Duration;

use crate::library::{display_name, format_mmss, format_total};
use crate::player::{LoopMode, PlaybackState, PlayerEvent};
use crate::queue::LoadReport;

/// Snapshot of player state as last reported, plus the list cursor.
#[derive(Debug, Default)]
pub struct App {
    pub tracks: Vec<PathBuf>,
    pub current: Option<usize>,
    pub selected: usize,

    pub state: PlaybackState,
    pub now_playing: Option<PathBuf>,
    pub elapsed: Duration,
    pub total: Option<Duration>,

    pub loop_mode: LoopMode,
    pub volume: u8,

    /// One-line message for the status bar (last save/load result, errors).
    pub notice: Option<String>,
}

impl App {
    pub fn new(loop_mode: LoopMode, volume: u8) -> Self {
        Self {
            loop_mode,
            volume,
            ..Self::default()
        }
    }

    /// Fold one player event into the snapshot.
    pub fn apply(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Progress { elapsed, total } => {
                self.elapsed = elapsed;
                self.total = total;
            }
            PlayerEvent::QueueChanged { tracks, current } => {
                self.tracks = tracks;
                self.current = current;
                self.clamp_selection();
            }
            PlayerEvent::StatusChanged { state, track } => {
                self.state = state;
                self.now_playing = track;
            }
            PlayerEvent::LoopModeChanged(mode) => self.loop_mode = mode,
            PlayerEvent::VolumeChanged(volume) => self.volume = volume,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Move the cursor down, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if self.has_tracks() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.tracks.len() - 1);
        }
    }

    pub fn set_selected(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tracks.len().saturating_sub(1));
    }

    pub fn now_playing_text(&self) -> String {
        match &self.now_playing {
            Some(path) => display_name(path),
            None => "Nothing playing".to_string(),
        }
    }

    /// `MM:SS / MM:SS`, with `--:--` for an unknown length.
    pub fn time_text(&self) -> String {
        format!("{} / {}", format_mmss(self.elapsed), format_total(self.total))
    }

    /// Progress in `0.0..=1.0`; zero when the length is unknown.
    pub fn progress_ratio(&self) -> f64 {
        match self.total {
            Some(total) if !total.is_zero() => {
                (self.elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

/// Status line for a finished queue load.
pub fn describe_load(report: &LoadReport) -> String {
    let mut text = format!("Loaded {} tracks", report.loaded);
    if report.missing > 0 {
        text.push_str(&format!(", {} missing", report.missing));
    }
    if report.video > 0 {
        text.push_str(&format!(", {} video skipped", report.video));
    }
    text
}
