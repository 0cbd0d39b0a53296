//! Scoring service port: the boundary to the remote prediction endpoint.

use async_trait::async_trait;

use crate::domain::{FormState, PredictionResult};

/// Request could not be completed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scoring service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed prediction response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Prediction task ended without a response")]
    Worker,
}

/// Trait for the external scoring service.
///
/// One call is one best-effort attempt: implementations must not retry.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Human-readable identifier of the endpoint (for logs).
    fn endpoint(&self) -> &str;

    /// Submit a form snapshot and return the parsed prediction.
    ///
    /// # Errors
    /// Returns `TransportError` on network failure, non-2xx status or a body
    /// that does not parse as `PredictionResult`.
    async fn predict(&self, form: &FormState) -> Result<PredictionResult, TransportError>;
}
