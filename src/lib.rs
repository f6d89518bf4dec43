//! Next-word suggestion engine for a single text field.
//!
//! The host feeds text changes, keys and clicks into a [`SuggestSession`]
//! (directly, or through the [`Controller`] which adds a background
//! prediction worker) and applies the returned effects.

uniffi::setup_scaffolding!();

pub mod api;
pub mod async_worker;
pub mod controller;
pub mod debounce;
pub mod field;
pub mod predict;
pub mod session;
pub mod settings;
pub mod theme;
pub mod trace_init;

pub use controller::Controller;
pub use field::{insert, FieldState};
pub use predict::{fetch_candidates, PredictionBackend, PredictionRequest};
pub use session::{
    ClickTarget, Key, Phase, Response, SuggestSession, SuggestionAction, SuggestionState,
    TimerAction,
};
