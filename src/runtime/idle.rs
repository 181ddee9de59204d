//! Idle auto-close for open menus
//!
//! The resolver has no timers of its own. The driver waits for input no longer
//! than [`IdleTimer::remaining`] while a menu is open, and closes the menu by
//! injecting a press of the quit key once the timer runs out.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct IdleTimer {
    timeout: Duration,
    last_activity: Instant,
}

impl IdleTimer {
    pub fn new(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            last_activity: now,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Record activity at `now`
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    /// Whether more than the timeout has passed since the last activity
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_activity) > self.timeout
    }

    /// Time left before the timer expires, zero once it has
    pub fn remaining(&self, now: Instant) -> Duration {
        self.timeout
            .saturating_sub(now.saturating_duration_since(self.last_activity))
    }
}
