//! Cooperative time bound for a single search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared stop flag plus an optional deadline.
///
/// Cheap to clone; clones share the flag, so stopping one stops every
/// worker that holds a copy.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    limit: Option<Duration>,
}

impl TimeControl {
    /// Starts the clock now.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start: Instant::now(),
            limit,
        }
    }

    /// No deadline; only an explicit [`stop`](Self::stop) ends the search.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and raises the stop flag once the deadline passes.
    /// Returns true if the search should stop.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.limit {
            if self.start.elapsed() >= limit {
                self.stop();
                return true;
            }
        }
        false
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
