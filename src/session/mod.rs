//! Suggestion interaction session: decides when to request predictions,
//! what to do with the results, and how keys and clicks accept, navigate or
//! dismiss them.
//!
//! `SuggestSession` owns the suggestion state and the debounce deadline.
//! The host owns the text field and lends it to each handler; every handler
//! returns a `Response` describing the effects the host must apply.

pub(crate) mod types;

mod accept;
mod key_handlers;
mod predictions;
mod response;
mod suggestions;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::settings::Settings;

pub use suggestions::{SuggestionError, SuggestionState};
pub use types::{ClickTarget, Key, Phase, Response, SuggestionAction, TimerAction};

use types::{InFlight, SessionConfig};

pub const DEFAULT_REQUESTED_COUNT: u32 = 3;
pub const DEFAULT_MAX_COUNT: u32 = 5;

/// Stateful controller for one text field and one suggestion list.
pub struct SuggestSession {
    suggestions: SuggestionState,
    debouncer: Debouncer,
    config: SessionConfig,

    /// Last generation handed out; bumped on every request and invalidation.
    generation: u64,
    in_flight: Option<InFlight>,
}

impl SuggestSession {
    pub fn new(quiet: Duration) -> Self {
        Self {
            suggestions: SuggestionState::new(),
            debouncer: Debouncer::new(quiet),
            config: SessionConfig {
                requested_count: DEFAULT_REQUESTED_COUNT,
                max_count: DEFAULT_MAX_COUNT,
            },
            generation: 0,
            in_flight: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut session = Self::new(settings.quiet_period());
        session.config.max_count = settings.predict.max_count;
        session.set_requested_count(settings.predict.default_count);
        session
    }

    /// Count selector: read when the next request fires. Clamped to
    /// `1..=max_count`.
    pub fn set_requested_count(&mut self, count: u32) {
        self.config.requested_count = count.clamp(1, self.config.max_count.max(1));
    }

    pub fn requested_count(&self) -> u32 {
        self.config.requested_count
    }

    pub fn phase(&self) -> Phase {
        if self.suggestions.is_visible() {
            Phase::Showing
        } else {
            Phase::Idle
        }
    }

    pub fn is_showing(&self) -> bool {
        self.phase() == Phase::Showing
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    /// Latest generation issued. Results carrying any other number are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// When the host should next call `tick`, if a quiet period is running.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Raw text-change notification. Never requests directly; (re)arms the
    /// quiet period. Current suggestions stay visible.
    pub fn handle_input(&mut self, now: Instant) -> Response {
        let deadline = self.debouncer.notify(now);
        let mut resp = Response::not_consumed();
        resp.timer = TimerAction::Arm { deadline };
        resp
    }

    /// The field lost focus: dismiss without accepting.
    pub fn handle_focus_lost(&mut self) -> Response {
        if !self.is_showing() {
            return self.abandon_in_flight();
        }
        self.dismiss()
    }

    /// Drop every outstanding request: their results will be ignored.
    fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
    }
}
