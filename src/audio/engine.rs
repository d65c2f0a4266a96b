use std::path::Path;
use std::time::Duration;

use crate::error::EngineError;

/// Output side of the player: decodes one track at a time and plays it.
///
/// The engine has no position query and no native seek. Callers rebuild
/// playback with `load` + `play(start)` and infer the end of a track from
/// `is_busy` turning false.
pub trait AudioEngine {
    /// Open and decode `path`, replacing whatever was loaded. Nothing plays yet.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Start the loaded track at `start`.
    fn play(&mut self, start: Duration) -> Result<(), EngineError>;

    fn pause(&mut self);

    fn unpause(&mut self);

    /// Stop and drop the loaded track.
    fn stop(&mut self);

    /// Set output gain in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    /// Whether there is still audio queued for output (true while paused mid-track).
    fn is_busy(&self) -> bool;
}
