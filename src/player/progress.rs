//! Elapsed-time reconstruction and the periodic tick.
//!
//! The engine cannot report its position, so elapsed time is rebuilt from a
//! wall-clock anchor plus the offset playback was last (re)started at.

use std::time::{Duration, Instant};

/// Source of "now", swappable in tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// `elapsed = (now - started_at) + seek_offset`, clamped to the track length when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressAnchor {
    started_at: Instant,
    seek_offset: Duration,
    total: Option<Duration>,
}

impl ProgressAnchor {
    pub fn new(now: Instant, seek_offset: Duration, total: Option<Duration>) -> Self {
        Self {
            started_at: now,
            seek_offset,
            total: total.filter(|t| !t.is_zero()),
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.started_at) + self.seek_offset;
        match self.total {
            Some(total) => elapsed.min(total),
            None => elapsed,
        }
    }

    /// Move the wall-clock start so that `elapsed(now) == shown`.
    ///
    /// Used when resuming: the time spent paused must not count.
    pub fn resume_from(&mut self, now: Instant, shown: Duration) {
        let played = shown.saturating_sub(self.seek_offset);
        match now.checked_sub(played) {
            Some(start) => self.started_at = start,
            None => {
                self.started_at = now;
                self.seek_offset = shown;
            }
        }
    }
}

/// The single pending progress tick.
///
/// Scheduling replaces the pending tick and cancelling drops it, so a command
/// never leaves a stale tick behind.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, due: None }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_active(&self) -> bool {
        self.due.is_some()
    }

    /// Consume the pending tick when it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }
}
