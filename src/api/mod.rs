//! UniFFI export layer: type-safe host bindings for the suggestion engine.
//!
//! Each public type here maps to a generated class, struct, or enum.

mod session;
mod types;

pub use session::NwSession;
pub use types::{NwClickTarget, NwError, NwEvent, NwField, NwKey, NwResponse, NwTheme};

use std::path::Path;

use crate::theme::ThemeStore;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[uniffi::export]
fn settings_load_config(path: String) -> Result<(), NwError> {
    let content = std::fs::read_to_string(&path).map_err(|e| NwError::Io {
        msg: format!("{path}: {e}"),
    })?;
    crate::settings::init_custom(content)
        .map_err(|e| NwError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn settings_default_config() -> String {
    crate::settings::default_toml().to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}

#[uniffi::export]
fn theme_load(path: String, prefers_dark: bool) -> Result<NwTheme, NwError> {
    Ok(ThemeStore::new(path).load(prefers_dark)?.into())
}

#[uniffi::export]
fn theme_toggle(path: String, prefers_dark: bool) -> Result<NwTheme, NwError> {
    Ok(ThemeStore::new(path).toggle(prefers_dark)?.into())
}

/// SVG path data for the theme toggle button.
#[uniffi::export]
fn theme_indicator(theme: NwTheme) -> String {
    crate::theme::Theme::from(theme).indicator().to_string()
}
