//! Idle tracking for auto-close and auto-lock

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Reports how long the user has been away
pub trait IdleTimeProvider {
    /// Time between the last user input and `now`
    fn idle_time_at(&self, now: Instant) -> Duration;

    /// Time since the last user input
    fn idle_time(&self) -> Duration {
        self.idle_time_at(Instant::now())
    }

    /// Whether idle time reflects system-wide input rather than input seen
    /// by this application only
    fn system_idle_supported(&self) -> bool {
        false
    }
}

/// Idle tracker fed by the application's own input events
#[derive(Debug)]
pub struct InputActivity {
    last_input: Cell<Instant>,
}

impl InputActivity {
    /// Start tracking, counting now as the last input
    pub fn new() -> Self {
        Self {
            last_input: Cell::new(Instant::now()),
        }
    }

    /// Record user input (resets idle time)
    pub fn touch(&self) {
        self.touch_at(Instant::now());
    }

    /// Record user input at a given instant
    pub fn touch_at(&self, at: Instant) {
        self.last_input.set(at);
    }
}

impl Default for InputActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdleTimeProvider for InputActivity {
    fn idle_time_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_input.get())
    }
}
