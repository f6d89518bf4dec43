
use std::time::{Duration, Instant};

use super::*;
use crate::field::FieldState;

pub(super) const QUIET: Duration = Duration::from_millis(200);

pub(super) fn make_session() -> SuggestSession {
    SuggestSession::new(QUIET)
}

pub(super) fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// Helper: simulate typing a string one character at a time, `gap` apart.
// Returns the instant of the last keystroke.
pub(super) fn type_string(
    session: &mut SuggestSession,
    field: &mut FieldState,
    s: &str,
    start: Instant,
    gap: Duration,
) -> Instant {
    let mut now = start;
    for (i, ch) in s.chars().enumerate() {
        now = start + gap * i as u32;
        field.text.push(ch);
        field.caret = field.text.chars().count();
        session.handle_input(now);
    }
    now
}

// Helper: run one full input → quiet period → response cycle so the session
// shows `candidates` for the field's current text.
pub(super) fn show(session: &mut SuggestSession, field: &FieldState, candidates: &[&str]) {
    let t0 = Instant::now();
    session.handle_input(t0);
    let resp = session
        .tick(t0 + QUIET, field)
        .expect("quiet period elapsed");
    let request = resp.request.expect("non-empty field fires a request");
    session
        .receive_predictions(request.generation, list(candidates))
        .expect("latest result applies");
}
