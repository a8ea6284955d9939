//! Time sources for animation playback

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time for wall-clock driven playback
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic platform clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic playback
///
/// Clones share the same elapsed time, so a test can keep one handle and
/// hand another to the player.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, delta: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(delta));
    }

    /// Move the clock forward by a number of seconds
    ///
    /// Negative, NaN and out-of-range steps leave the clock untouched.
    pub fn advance_secs(&self, seconds: f32) {
        match Duration::try_from_secs_f32(seconds) {
            Ok(delta) => self.advance(delta),
            Err(e) => log::warn!("Ignoring clock step of {seconds}s: {e}"),
        }
    }

    /// Time advanced since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}
