//! `.lukyland` queue documents.
//!
//! A document is a JSON object `{ "queue": [paths...], "current_index": n }`
//! where `n` is `-1` when nothing is current.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::library::is_video_file;

use super::store::Queue;

/// File extension used for saved queues.
pub const QUEUE_FILE_EXTENSION: &str = "lukyland";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDocument {
    #[serde(default)]
    pub queue: Vec<PathBuf>,
    #[serde(default = "no_current")]
    pub current_index: i64,
}

fn no_current() -> i64 {
    -1
}

/// Outcome of filtering a loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Entries whose file no longer exists.
    pub missing: usize,
    /// Entries skipped for being video containers.
    pub video: usize,
}

impl QueueDocument {
    pub fn from_queue(queue: &Queue) -> Self {
        Self {
            queue: queue.tracks().to_vec(),
            current_index: queue.current_index().map_or(-1, |i| i as i64),
        }
    }

    /// Keep only entries that exist now and are not video files.
    ///
    /// Fails when nothing playable is left.
    pub fn into_playable(self) -> Result<(Vec<PathBuf>, LoadReport), PersistenceError> {
        let mut valid = Vec::with_capacity(self.queue.len());
        let mut missing = 0;
        let mut video = 0;

        for path in self.queue {
            if !path.exists() {
                missing += 1;
            } else if is_video_file(&path) {
                video += 1;
            } else {
                valid.push(path);
            }
        }

        if missing > 0 {
            warn!(missing, "queue entries not found and skipped");
        }
        if video > 0 {
            warn!(video, "video entries skipped (audio only)");
        }
        if valid.is_empty() {
            return Err(PersistenceError::NoValidTracks { missing, video });
        }

        let report = LoadReport {
            loaded: valid.len(),
            missing,
            video,
        };
        Ok((valid, report))
    }
}

/// Write `queue` to `path` as pretty-printed JSON.
pub fn save_queue(queue: &Queue, path: &Path) -> Result<(), PersistenceError> {
    if queue.is_empty() {
        return Err(PersistenceError::EmptyQueue);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &QueueDocument::from_queue(queue))?;
    writer.flush()?;

    info!(path = %path.display(), items = queue.len(), "queue saved");
    Ok(())
}

/// Read a queue document without validating its entries.
pub fn read_queue_document(path: &Path) -> Result<QueueDocument, PersistenceError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
