//! Prediction client: one request/response exchange with the backend.
//!
//! Backends report failures through `PredictError`; `fetch_candidates`
//! flattens every failure into an empty list so callers only ever see
//! "some suggestions" or "no suggestions".

mod fixture;
mod http;

#[cfg(test)]
mod tests;

pub use fixture::FixtureBackend;
pub use http::HttpBackend;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One query, frozen at the moment the debounce fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub text: String,
    pub requested_count: u32,
    /// Sequence number; only the latest issued generation may be applied.
    pub generation: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("prediction service returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("fixture error: {0}")]
    Fixture(String),
}

/// Wire body sent to the prediction service.
#[derive(Debug, Serialize)]
pub(crate) struct PredictBody<'a> {
    pub text: &'a str,
    pub num_predictions: u32,
}

/// Wire body returned by the prediction service.
#[derive(Debug, Deserialize)]
pub(crate) struct PredictReply {
    #[serde(default)]
    predictions: Option<Vec<String>>,
}

/// Parse a service reply. A missing or null `predictions` field is an empty list.
pub(crate) fn parse_reply(body: &str) -> Result<Vec<String>, PredictError> {
    let reply: PredictReply =
        serde_json::from_str(body).map_err(|e| PredictError::Decode(e.to_string()))?;
    Ok(reply.predictions.unwrap_or_default())
}

pub trait PredictionBackend: Send + Sync {
    fn predict(&self, text: &str, count: u32) -> Result<Vec<String>, PredictError>;
}

/// Run one request against `backend`, normalizing any failure to no candidates.
pub fn fetch_candidates(backend: &dyn PredictionBackend, request: &PredictionRequest) -> Vec<String> {
    let _span = tracing::debug_span!(
        "fetch_candidates",
        generation = request.generation,
        count = request.requested_count
    )
    .entered();

    match backend.predict(&request.text, request.requested_count) {
        Ok(candidates) => {
            debug!(n = candidates.len(), "predictions received");
            candidates
        }
        Err(e) => {
            warn!(error = %e, "prediction failed; showing no suggestions");
            Vec::new()
        }
    }
}
