//! Queue and playback controller.
//!
//! `Player` is the single owner of the queue and the playback state. It drives
//! an `AudioEngine`, rebuilds elapsed time from a wall-clock anchor, and reports
//! every change through a `PlayerObserver`.

mod controller;
mod events;
mod progress;
mod types;

pub use controller::{Player, PlayerOptions};
pub use events::{PlayerEvent, PlayerObserver};
pub use progress::Clock;
pub use types::{LoopMode, PlaybackState};

#[cfg(test)]
mod tests;
