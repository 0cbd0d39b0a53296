//! HTTP adapter for the scoring service (reqwest).

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ClientConfig;
use crate::domain::{FormState, PredictionResult};
use crate::ports::{ScoringService, TransportError};

/// Scoring client that POSTs the form as JSON to `<base>/api/predict`.
///
/// No timeout override and no retry: one request per call.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    client: Client,
    url: String,
}

impl HttpScoringClient {
    /// Create a client for the configured endpoint.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config.predict_url())
    }

    /// Create a client with a pre-built `reqwest::Client` and full route URL.
    #[must_use]
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn predict(&self, form: &FormState) -> Result<PredictionResult, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Connection(e.to_string())
                } else {
                    TransportError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let result: PredictionResult = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            prediction = ?result.prediction,
            "Scoring service responded"
        );
        Ok(result)
    }
}
