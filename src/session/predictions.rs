use std::time::Instant;

use tracing::debug;

use crate::field::FieldState;
use crate::predict::PredictionRequest;

use super::response::build_suggestions;
use super::types::{InFlight, Response, SuggestionAction};
use super::SuggestSession;

impl SuggestSession {
    /// Drive the quiet period. Returns a response only when the deadline
    /// fires: a request for the field's current text, or a hide when the
    /// field is empty (no backend call in that case).
    pub fn tick(&mut self, now: Instant, field: &FieldState) -> Option<Response> {
        if !self.debouncer.fire_if_due(now) {
            return None;
        }

        let mut resp = Response::not_consumed();
        if field.is_empty() {
            debug!("quiet period elapsed on empty field; hiding suggestions");
            self.suggestions.clear();
            self.invalidate();
            resp.suggestions = SuggestionAction::Hide;
        } else {
            resp.request = Some(self.issue_request(&field.text));
        }
        Some(resp)
    }

    /// Receive predictions for `generation`. Returns `None` when the result
    /// is stale (a newer request was issued, or the suggestions were
    /// accepted or dismissed since).
    pub fn receive_predictions(
        &mut self,
        generation: u64,
        mut candidates: Vec<String>,
    ) -> Option<Response> {
        let requested_count = match self.in_flight {
            Some(ref f) if f.generation == generation => f.requested_count,
            _ => {
                debug!(generation, latest = self.generation, "ignoring stale predictions");
                return None;
            }
        };
        self.in_flight = None;

        candidates.truncate(requested_count as usize);
        self.suggestions.set_candidates(candidates);

        let mut resp = Response::not_consumed();
        resp.suggestions = build_suggestions(&self.suggestions);
        Some(resp)
    }

    pub(super) fn issue_request(&mut self, text: &str) -> PredictionRequest {
        self.generation += 1;
        let requested_count = self.config.requested_count;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            requested_count,
        });
        debug!(generation = self.generation, requested_count, "issuing prediction request");
        PredictionRequest {
            text: text.to_string(),
            requested_count,
            generation: self.generation,
        }
    }
}
