use tracing::debug;

use crate::field::{self, FieldState};

use super::types::{Response, SuggestionAction, TimerAction};
use super::SuggestSession;

impl SuggestSession {
    /// Splice candidate `index` into the field and return to Idle.
    pub(super) fn accept(&mut self, index: usize, field: &mut FieldState) -> Response {
        let Some(candidate) = self.suggestions.get(index) else {
            return Response::not_consumed();
        };

        let was_focused = field.focused;
        *field = field::insert(candidate, field);
        debug!(index, caret = field.caret, "accepted suggestion");

        let mut resp = self.dismiss();
        resp.field = Some(field.clone());
        resp.refocus = !was_focused;
        resp
    }

    /// Clear suggestions without touching the field. Outstanding requests
    /// and the quiet period are dropped so nothing reappears afterwards.
    pub(super) fn dismiss(&mut self) -> Response {
        self.suggestions.clear();
        self.debouncer.cancel();
        self.invalidate();

        let mut resp = Response::consumed();
        resp.suggestions = SuggestionAction::Hide;
        resp.timer = TimerAction::Cancel;
        resp
    }

    /// Dismissal while nothing is shown: a request already sent must not
    /// bring a list back. Never consumed, so the host's default handling
    /// still runs.
    pub(super) fn abandon_in_flight(&mut self) -> Response {
        let mut resp = Response::not_consumed();
        if self.in_flight.is_some() {
            debug!(generation = self.generation, "abandoning in-flight request");
            self.debouncer.cancel();
            self.invalidate();
            resp.timer = TimerAction::Cancel;
        }
        resp
    }
}
