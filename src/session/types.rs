use std::time::Instant;

use crate::field::FieldState;
use crate::predict::PredictionRequest;

/// Keys the session reacts to. Everything else arrives as `Other` and is
/// never consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    ArrowRight,
    ArrowDown,
    ArrowUp,
    Escape,
    Other,
}

/// Where a pointer click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the text field itself.
    Field,
    /// On the suggestion chip at this index.
    Suggestion(usize),
    /// Anywhere outside both the field and the suggestion list.
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No suggestions shown.
    Idle,
    /// A non-empty suggestion list is visible.
    Showing,
}

pub(super) struct SessionConfig {
    pub(super) requested_count: u32,
    pub(super) max_count: u32,
}

/// The request whose result is still allowed to land.
pub(super) struct InFlight {
    pub(super) generation: u64,
    pub(super) requested_count: u32,
}

/// Suggestion surface action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    /// Leave the surface as-is.
    Keep,
    /// Show or update the surface; `active` is the highlighted chip.
    Show {
        items: Vec<String>,
        active: Option<usize>,
    },
    /// Hide the surface.
    Hide,
}

/// What to do with the host's debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Keep,
    /// Call `tick` again at (or after) `deadline`.
    Arm { deadline: Instant },
    Cancel,
}

/// Effects of one handled event, for the host to apply in order:
/// field edit, refocus, suggestion surface, timer, then dispatch `request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The event was handled; the host must suppress its default behaviour.
    pub consumed: bool,
    /// New field contents to write back.
    pub field: Option<FieldState>,
    /// The field lost focus and must be focused again.
    pub refocus: bool,
    pub suggestions: SuggestionAction,
    pub timer: TimerAction,
    /// Prediction request to dispatch to the backend.
    pub request: Option<PredictionRequest>,
}

impl Response {
    pub(super) fn not_consumed() -> Self {
        Self {
            consumed: false,
            field: None,
            refocus: false,
            suggestions: SuggestionAction::Keep,
            timer: TimerAction::Keep,
            request: None,
        }
    }

    pub(super) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed()
        }
    }
}
