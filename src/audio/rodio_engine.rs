use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::error::EngineError;

use super::engine::AudioEngine;
use super::sink::create_sink_at;

/// `AudioEngine` backed by the default `rodio` output device.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    loaded: Option<PathBuf>,
    volume: f32,
}

impl RodioEngine {
    pub fn open_default() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the terminal UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            volume: 1.0,
        })
    }

    fn install(&mut self, sink: Sink) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        sink.set_volume(self.volume);
        self.sink = Some(sink);
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let sink = create_sink_at(&self.stream, path, Duration::ZERO)?;
        self.install(sink);
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self, start: Duration) -> Result<(), EngineError> {
        let Some(path) = self.loaded.clone() else {
            return Err(EngineError::NothingLoaded);
        };

        if !start.is_zero() {
            // Freshly decoded source skipped forward; the sink from `load` starts at zero.
            debug!(path = %path.display(), ?start, "rebuilding sink at offset");
            let sink = create_sink_at(&self.stream, &path, start)?;
            self.install(sink);
        }

        match self.sink.as_ref() {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => Err(EngineError::NothingLoaded),
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.loaded = None;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
    }

    fn is_busy(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }
}
