//! Output ports: how the player tells the outside world what changed.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::queue::Queue;

use super::types::{LoopMode, PlaybackState};

/// Receives state changes from the `Player`.
///
/// The player never touches presentation objects; it only calls these.
pub trait PlayerObserver {
    fn on_progress_updated(&mut self, elapsed: Duration, total: Option<Duration>);

    /// `playing` is the entry being heard, which differs from the queue's
    /// current entry once the loaded track has been removed.
    fn on_queue_changed(&mut self, queue: &Queue, playing: Option<usize>);

    fn on_playback_status_changed(&mut self, state: PlaybackState, track: Option<&Path>);

    fn on_loop_mode_changed(&mut self, _mode: LoopMode) {}

    fn on_volume_changed(&mut self, _percent: u8) {}
}

/// Owned copy of one observer callback, for sending across a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Progress {
        elapsed: Duration,
        total: Option<Duration>,
    },
    QueueChanged {
        tracks: Vec<PathBuf>,
        /// Entry being played, if it is still queued.
        current: Option<usize>,
    },
    StatusChanged {
        state: PlaybackState,
        track: Option<PathBuf>,
    },
    LoopModeChanged(LoopMode),
    VolumeChanged(u8),
}

// A closed receiver just means nobody is listening any more.
impl PlayerObserver for Sender<PlayerEvent> {
    fn on_progress_updated(&mut self, elapsed: Duration, total: Option<Duration>) {
        let _ = self.send(PlayerEvent::Progress { elapsed, total });
    }

    fn on_queue_changed(&mut self, queue: &Queue, playing: Option<usize>) {
        let _ = self.send(PlayerEvent::QueueChanged {
            tracks: queue.tracks().to_vec(),
            current: playing,
        });
    }

    fn on_playback_status_changed(&mut self, state: PlaybackState, track: Option<&Path>) {
        let _ = self.send(PlayerEvent::StatusChanged {
            state,
            track: track.map(Path::to_path_buf),
        });
    }

    fn on_loop_mode_changed(&mut self, mode: LoopMode) {
        let _ = self.send(PlayerEvent::LoopModeChanged(mode));
    }

    fn on_volume_changed(&mut self, percent: u8) {
        let _ = self.send(PlayerEvent::VolumeChanged(percent));
    }
}
