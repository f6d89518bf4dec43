use std::time::Duration;

use super::{parse_reply, PredictBody, PredictError, PredictionBackend};
use crate::settings::Settings;

/// Blocking JSON-over-HTTP client for the prediction service.
pub struct HttpBackend {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint.to_string(),
        }
    }

    /// Like `new`, but ignores any proxy configured in the environment.
    #[cfg(test)]
    pub(crate) fn direct(endpoint: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .proxy(None)
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.predict.endpoint, settings.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionBackend for HttpBackend {
    fn predict(&self, text: &str, count: u32) -> Result<Vec<String>, PredictError> {
        let body = serde_json::to_string(&PredictBody {
            text,
            num_predictions: count,
        })
        .map_err(|e| PredictError::Decode(e.to_string()))?;

        let reply = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .send(body)
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => PredictError::Status(code),
                other => PredictError::Http(format!("{}: {other}", self.endpoint)),
            })?
            .into_body()
            .read_to_string()
            .map_err(|e| PredictError::Http(format!("{}: {e}", self.endpoint)))?;

        parse_reply(&reply)
    }
}
