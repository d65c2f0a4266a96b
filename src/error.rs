//! Error types shared across the player.
//!
//! None of these are fatal: the controller turns engine failures into queue
//! advances, and only persistence problems are surfaced to the user.

use std::path::PathBuf;

use thiserror::Error;

/// The audio engine could not open, decode or output a track.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No output device could be opened.
    #[error("no audio output device: {0}")]
    Device(String),

    /// The file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but is not a decodable audio stream.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// `play` was called before anything was loaded.
    #[error("nothing is loaded")]
    NothingLoaded,
}

/// The duration of a track could not be determined.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("could not read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("duration of {} is unknown", path.display())]
    Unknown { path: PathBuf },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("index {index} is out of bounds for a queue of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A queue document could not be written or read back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("queue file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed queue document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("queue is empty, nothing to save")]
    EmptyQueue,

    #[error("no playable tracks in queue document ({missing} missing, {video} video)")]
    NoValidTracks { missing: usize, video: usize },
}

/// A file or folder could not be added to the queue.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{} is a video file; only audio is supported", .0.display())]
    VideoNotSupported(PathBuf),

    #[error("no audio files found in {}", .0.display())]
    NoAudioFiles(PathBuf),

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
}
