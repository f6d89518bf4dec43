//! Light/dark theme preference, persisted as a small JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

const SUN_ICON: &str = "M12 3v1m0 16v1m9-9h-1M4 12H3m15.364 6.364l-.707-.707M6.343 6.343l-.707-.707m12.728 0l-.707.707M6.343 17.657l-.707.707M16 12a4 4 0 11-8 0 4 4 0 018 0z";
const MOON_ICON: &str =
    "M20.354 15.354A9 9 0 018.646 3.646 9.003 9.003 0 0012 21a9.003 9.003 0 008.354-5.646z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// SVG path data for the toggle button: a sun while dark (switch to
    /// light), a moon while light.
    pub fn indicator(self) -> &'static str {
        match self {
            Theme::Dark => SUN_ICON,
            Theme::Light => MOON_ICON,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("theme file I/O: {0}")]
    Io(#[from] io::Error),
    #[error("theme file parse: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// Theme preference backed by a file such as `~/.config/nextword/theme.json`.
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme, or the system preference when nothing is saved yet.
    pub fn load(&self, prefers_dark: bool) -> Result<Theme, ThemeError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let file: ThemeFile = serde_json::from_str(&content)?;
                Ok(file.theme)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved theme; using system preference");
                Ok(Theme::from_system(prefers_dark))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let json = serde_json::to_string(&ThemeFile { theme })?;
        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Flip the current theme and persist the result.
    pub fn toggle(&self, prefers_dark: bool) -> Result<Theme, ThemeError> {
        let next = self.load(prefers_dark)?.toggled();
        self.save(next)?;
        Ok(next)
    }
}
