use tracing::debug_span;

use crate::field::FieldState;

use super::response::build_suggestions;
use super::types::{ClickTarget, Key, Response, TimerAction};
use super::SuggestSession;

impl SuggestSession {
    /// Process a key press. `consumed` in the response tells the host to
    /// suppress the key's default behaviour.
    pub fn handle_key(&mut self, key: Key, field: &mut FieldState) -> Response {
        let _span = debug_span!("handle_key", ?key, showing = self.is_showing()).entered();

        match key {
            // Showing state dispatch
            Key::Tab if self.is_showing() => {
                let index = self.suggestions.highlighted().unwrap_or(0);
                self.accept(index, field)
            }

            Key::ArrowRight if self.is_showing() => self.accept(0, field),

            Key::ArrowDown if self.is_showing() => {
                self.suggestions.highlight_next();
                self.make_navigation_response()
            }

            Key::ArrowUp if self.is_showing() => {
                self.suggestions.highlight_prev();
                self.make_navigation_response()
            }

            Key::Escape if self.is_showing() => self.dismiss(),
            Key::Escape => self.abandon_in_flight(),

            // Idle state dispatch: Tab asks for suggestions right away
            Key::Tab if !field.is_empty() => {
                self.debouncer.cancel();
                let mut resp = Response::consumed();
                resp.timer = TimerAction::Cancel;
                resp.request = Some(self.issue_request(&field.text));
                resp
            }

            // Everything else edits the field normally
            _ => Response::not_consumed(),
        }
    }

    /// Process a pointer click.
    pub fn handle_click(&mut self, target: ClickTarget, field: &mut FieldState) -> Response {
        let _span = debug_span!("handle_click", ?target).entered();

        match target {
            ClickTarget::Suggestion(index) if index < self.suggestions.len() => {
                self.accept(index, field)
            }
            ClickTarget::Outside if self.is_showing() => {
                let mut resp = self.dismiss();
                resp.consumed = false;
                resp
            }
            ClickTarget::Outside => self.abandon_in_flight(),
            _ => Response::not_consumed(),
        }
    }

    fn make_navigation_response(&self) -> Response {
        let mut resp = Response::consumed();
        resp.suggestions = build_suggestions(&self.suggestions);
        resp
    }
}
