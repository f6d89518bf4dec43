use std::time::Duration;

use crate::field::FieldState;
use crate::session::{ClickTarget, Key, Response, SuggestionAction};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum NwError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

impl From<crate::theme::ThemeError> for NwError {
    fn from(e: crate::theme::ThemeError) -> Self {
        match e {
            crate::theme::ThemeError::Io(e) => NwError::Io { msg: e.to_string() },
            crate::theme::ThemeError::Parse(e) => NwError::InvalidData { msg: e.to_string() },
        }
    }
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

/// Snapshot of the host's text field. `caret` counts characters.
#[derive(Clone, Debug, uniffi::Record)]
pub struct NwField {
    pub text: String,
    pub caret: u32,
    pub focused: bool,
}

impl From<NwField> for FieldState {
    fn from(f: NwField) -> Self {
        FieldState {
            text: f.text,
            caret: f.caret as usize,
            focused: f.focused,
        }
    }
}

/// Event-driven response from every handler and from poll.
#[derive(Debug, uniffi::Record)]
pub struct NwResponse {
    /// Suppress the host's default handling of the key or click.
    pub prevent_default: bool,
    pub events: Vec<NwEvent>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum NwEvent {
    SetField { text: String, caret: u32 },
    Focus,
    ShowSuggestions { items: Vec<String>, active: Option<u32> },
    HideSuggestions,
    /// Call `poll` again after this many milliseconds.
    SchedulePoll { delay_ms: u64 },
}

#[derive(Clone, Copy, Debug, uniffi::Enum)]
pub enum NwKey {
    Tab,
    ArrowRight,
    ArrowDown,
    ArrowUp,
    Escape,
    Other,
}

impl From<NwKey> for Key {
    fn from(k: NwKey) -> Self {
        match k {
            NwKey::Tab => Key::Tab,
            NwKey::ArrowRight => Key::ArrowRight,
            NwKey::ArrowDown => Key::ArrowDown,
            NwKey::ArrowUp => Key::ArrowUp,
            NwKey::Escape => Key::Escape,
            NwKey::Other => Key::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, uniffi::Enum)]
pub enum NwClickTarget {
    Field,
    Suggestion { index: u32 },
    Outside,
}

impl From<NwClickTarget> for ClickTarget {
    fn from(t: NwClickTarget) -> Self {
        match t {
            NwClickTarget::Field => ClickTarget::Field,
            NwClickTarget::Suggestion { index } => ClickTarget::Suggestion(index as usize),
            NwClickTarget::Outside => ClickTarget::Outside,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum NwTheme {
    Light,
    Dark,
}

impl From<Theme> for NwTheme {
    fn from(t: Theme) -> Self {
        match t {
            Theme::Light => NwTheme::Light,
            Theme::Dark => NwTheme::Dark,
        }
    }
}

impl From<NwTheme> for Theme {
    fn from(t: NwTheme) -> Self {
        match t {
            NwTheme::Light => Theme::Light,
            NwTheme::Dark => Theme::Dark,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Flatten session responses into host events, in the order the host must
/// apply them. `next_poll` becomes a trailing `SchedulePoll`.
pub(super) fn convert_to_events(
    responses: impl IntoIterator<Item = Response>,
    next_poll: Option<Duration>,
) -> NwResponse {
    let mut prevent_default = false;
    let mut events = Vec::new();

    for resp in responses {
        prevent_default |= resp.consumed;

        // 1. Field edit
        if let Some(field) = resp.field {
            events.push(NwEvent::SetField {
                caret: field.caret as u32,
                text: field.text,
            });
        }

        // 2. Focus
        if resp.refocus {
            events.push(NwEvent::Focus);
        }

        // 3. Suggestion surface
        match resp.suggestions {
            SuggestionAction::Show { items, active } => {
                events.push(NwEvent::ShowSuggestions {
                    items,
                    active: active.map(|i| i as u32),
                });
            }
            SuggestionAction::Hide => events.push(NwEvent::HideSuggestions),
            SuggestionAction::Keep => {}
        }
    }

    // 4. Schedule poll
    if let Some(delay) = next_poll {
        events.push(NwEvent::SchedulePoll {
            delay_ms: delay.as_millis() as u64,
        });
    }

    NwResponse {
        prevent_default,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TimerAction;

    fn response(consumed: bool) -> Response {
        Response {
            consumed,
            field: None,
            refocus: false,
            suggestions: SuggestionAction::Keep,
            timer: TimerAction::Keep,
            request: None,
        }
    }

    #[test]
    fn accept_events_in_order() {
        let mut resp = response(true);
        resp.field = Some(FieldState::with_caret("hello ", 6));
        resp.refocus = true;
        resp.suggestions = SuggestionAction::Hide;

        let out = convert_to_events([resp], None);
        assert!(out.prevent_default);
        assert_eq!(
            out.events,
            vec![
                NwEvent::SetField {
                    text: "hello ".into(),
                    caret: 6
                },
                NwEvent::Focus,
                NwEvent::HideSuggestions,
            ]
        );
    }

    #[test]
    fn keep_produces_no_events() {
        let out = convert_to_events([response(false)], None);
        assert!(!out.prevent_default);
        assert!(out.events.is_empty());
    }

    #[test]
    fn show_and_schedule_poll() {
        let mut resp = response(false);
        resp.suggestions = SuggestionAction::Show {
            items: vec!["a".into(), "b".into()],
            active: Some(1),
        };
        let out = convert_to_events([resp], Some(Duration::from_millis(150)));
        assert_eq!(
            out.events,
            vec![
                NwEvent::ShowSuggestions {
                    items: vec!["a".into(), "b".into()],
                    active: Some(1),
                },
                NwEvent::SchedulePoll { delay_ms: 150 },
            ]
        );
    }

    #[test]
    fn consumed_anywhere_prevents_default() {
        let out = convert_to_events([response(false), response(true)], None);
        assert!(out.prevent_default);
    }
}
