use super::suggestions::SuggestionState;
use super::types::SuggestionAction;

/// Surface action mirroring `state`: show it with its highlight, or hide it
/// when empty.
pub(super) fn build_suggestions(state: &SuggestionState) -> SuggestionAction {
    if state.is_visible() {
        SuggestionAction::Show {
            items: state.candidates().to_vec(),
            active: state.highlighted(),
        }
    } else {
        SuggestionAction::Hide
    }
}
