//! Trailing-edge debouncer driven by the host event loop.
//!
//! The host passes the current instant in; nothing here sleeps or spawns.
//! `notify` (re)arms a single deadline, `fire_if_due` reports the trailing
//! edge exactly once.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a text change at `now`, superseding any pending deadline.
    /// Returns the new deadline.
    pub fn notify(&mut self, now: Instant) -> Instant {
        let deadline = now + self.quiet;
        self.deadline = Some(deadline);
        deadline
    }

    /// True once `now` has reached the pending deadline; disarms on fire.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
