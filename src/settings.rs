//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton. Falls back to the
/// built-in values if the TOML does not parse.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid settings, using built-in defaults");
            Settings::builtin()
        })
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub predict: PredictSettings,
    pub debounce: DebounceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictSettings {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub default_count: u32,
    pub max_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DebounceSettings {
    pub quiet_ms: u64,
}

impl Settings {
    fn builtin() -> Self {
        Self {
            predict: PredictSettings {
                endpoint: "http://127.0.0.1:5000/predict".to_string(),
                timeout_ms: 3000,
                default_count: 3,
                max_count: 5,
            },
            debounce: DebounceSettings { quiet_ms: 200 },
        }
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce.quiet_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.predict.timeout_ms)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(predict.timeout_ms);
    check_positive!(predict.default_count);
    check_positive!(predict.max_count);
    check_positive!(debounce.quiet_ms);

    if s.predict.endpoint.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "predict.endpoint".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if s.predict.default_count > s.predict.max_count {
        return Err(SettingsError::InvalidValue {
            field: "predict.default_count".to_string(),
            reason: format!("must not exceed predict.max_count ({})", s.predict.max_count),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.predict.endpoint, "http://127.0.0.1:5000/predict");
        assert_eq!(s.predict.timeout_ms, 3000);
        assert_eq!(s.predict.default_count, 3);
        assert_eq!(s.predict.max_count, 5);
        assert_eq!(s.debounce.quiet_ms, 200);
        assert_eq!(s.quiet_period(), Duration::from_millis(200));
    }

    #[test]
    fn builtin_matches_default_toml() {
        let parsed = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        let builtin = Settings::builtin();
        assert_eq!(parsed.predict.endpoint, builtin.predict.endpoint);
        assert_eq!(parsed.predict.timeout_ms, builtin.predict.timeout_ms);
        assert_eq!(parsed.predict.default_count, builtin.predict.default_count);
        assert_eq!(parsed.predict.max_count, builtin.predict.max_count);
        assert_eq!(parsed.debounce.quiet_ms, builtin.debounce.quiet_ms);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[predict]
endpoint = "https://predict.example.com/v1/predict"
timeout_ms = 800
default_count = 1
max_count = 8

[debounce]
quiet_ms = 120
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.predict.endpoint, "https://predict.example.com/v1/predict");
        assert_eq!(s.predict.max_count, 8);
        assert_eq!(s.request_timeout(), Duration::from_millis(800));
        assert_eq!(s.quiet_period(), Duration::from_millis(120));
    }

    #[test]
    fn error_zero_quiet_period() {
        let toml = r#"
[predict]
endpoint = "http://127.0.0.1:5000/predict"
timeout_ms = 3000
default_count = 3
max_count = 5

[debounce]
quiet_ms = 0
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("debounce.quiet_ms"));
    }

    #[test]
    fn error_default_count_above_max() {
        let toml = r#"
[predict]
endpoint = "http://127.0.0.1:5000/predict"
timeout_ms = 3000
default_count = 6
max_count = 5

[debounce]
quiet_ms = 200
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("predict.default_count"));
    }

    #[test]
    fn error_empty_endpoint() {
        let toml = r#"
[predict]
endpoint = "  "
timeout_ms = 3000
default_count = 3
max_count = 5

[debounce]
quiet_ms = 200
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("predict.endpoint"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[predict]
endpoint = "http://127.0.0.1:5000/predict"
timeout_ms = 3000
default_count = 3
max_count = 5
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
