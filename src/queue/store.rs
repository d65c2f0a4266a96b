use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QueueError;

/// Ordered track paths plus a pointer to the current one.
///
/// Paths are compared as given, without canonicalisation: two spellings of the
/// same file are two distinct entries.
///
/// Every mutation keeps `current` on the same entry it pointed at before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    tracks: Vec<PathBuf>,
    current: Option<usize>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[PathBuf] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.tracks.get(index).map(PathBuf::as_path)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.and_then(|i| self.get(i))
    }

    fn check(&self, index: usize) -> Result<(), QueueError> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(QueueError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            })
        }
    }

    /// Replace the whole queue. `start` must index into `tracks` when given.
    pub fn set_queue(&mut self, tracks: Vec<PathBuf>, start: Option<usize>) -> Result<(), QueueError> {
        if let Some(index) = start {
            if index >= tracks.len() {
                return Err(QueueError::IndexOutOfBounds {
                    index,
                    len: tracks.len(),
                });
            }
        }
        self.tracks = tracks;
        self.current = start;
        Ok(())
    }

    pub fn append(&mut self, track: PathBuf) {
        self.tracks.push(track);
    }

    pub fn append_all<I>(&mut self, tracks: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.tracks.extend(tracks);
    }

    /// Remove the entry at `index`.
    ///
    /// Removing the current entry hands "current" to whatever slides into its
    /// slot, or to the new last entry, or to nothing once the queue is empty.
    pub fn remove(&mut self, index: usize) -> Result<PathBuf, QueueError> {
        self.check(index)?;
        let removed = self.tracks.remove(index);
        self.current = match self.current {
            _ if self.tracks.is_empty() => None,
            Some(c) if index < c => Some(c - 1),
            Some(c) if index == c => Some(c.min(self.tracks.len() - 1)),
            other => other,
        };
        Ok(removed)
    }

    /// Pull the entry at `from` out and reinsert it at `to` of the shortened list.
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<(), QueueError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(());
        }

        let item = self.tracks.remove(from);
        self.tracks.insert(to, item);

        self.current = match self.current {
            Some(c) if c == from => Some(to),
            // moved from before current to after it
            Some(c) if from < c && c <= to => Some(c - 1),
            // moved from after current to before it
            Some(c) if to <= c && c < from => Some(c + 1),
            other => other,
        };
        Ok(())
    }

    /// Uniformly permute the queue with the thread-local generator.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Permute the queue with `rng`, keeping `current` on the same track.
    ///
    /// With duplicate paths the current pointer lands on the first copy.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.tracks.len() <= 1 {
            return;
        }

        let current = self.current().map(Path::to_path_buf);
        self.tracks.shuffle(rng);

        if let Some(track) = current {
            self.current = self.tracks.iter().position(|t| *t == track);
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), QueueError> {
        self.check(index)?;
        self.current = Some(index);
        Ok(())
    }

    /// Whether an entry follows the current one (the first entry counts when nothing is current).
    pub fn has_next(&self) -> bool {
        match self.current {
            Some(c) => c + 1 < self.tracks.len(),
            None => !self.tracks.is_empty(),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current.is_some_and(|c| c > 0)
    }

    /// Index that "next" lands on, wrapping to the start when `wrap` is set.
    pub fn next_index(&self, wrap: bool) -> Option<usize> {
        if self.has_next() {
            Some(self.current.map_or(0, |c| c + 1))
        } else if wrap && !self.tracks.is_empty() {
            Some(0)
        } else {
            None
        }
    }
}
