use std::collections::HashMap;
use std::path::Path;

use super::{PredictError, PredictionBackend};

/// Canned predictions keyed by query text, for replays and tests.
///
/// File format: a JSON object mapping query text to a candidate array,
/// e.g. `{"hel": ["hello", "help", "helmet"]}`. A query with no exact entry
/// falls back to its last word; unknown queries predict nothing.
#[derive(Debug, Clone, Default)]
pub struct FixtureBackend {
    table: HashMap<String, Vec<String>>,
}

impl FixtureBackend {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();
        Self { table }
    }

    pub fn from_json(json: &str) -> Result<Self, PredictError> {
        let table: HashMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| PredictError::Fixture(e.to_string()))?;
        Ok(Self { table })
    }

    pub fn open(path: &Path) -> Result<Self, PredictError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PredictError::Fixture(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    fn lookup(&self, text: &str) -> Option<&Vec<String>> {
        self.table.get(text).or_else(|| {
            let last = text.split_whitespace().last()?;
            self.table.get(last)
        })
    }
}

impl PredictionBackend for FixtureBackend {
    fn predict(&self, text: &str, count: u32) -> Result<Vec<String>, PredictError> {
        Ok(self
            .lookup(text)
            .map(|c| c.iter().take(count as usize).cloned().collect())
            .unwrap_or_default())
    }
}
