//! Prediction orchestrator: one in-flight scoring request at a time.
//!
//! Lifecycle: `Idle -> Submitting -> {Succeeded, Failed}`, and back to `Idle`
//! only through `check_another`. The request itself runs on a tokio runtime;
//! the caller (the UI thread) never blocks on it and observes completion via
//! `poll` or, in async contexts, `wait`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::time::Instant;

use crate::domain::{present, DisplayModel, FormState, PredictionResult, ValidationError};
use crate::ports::{ScoringService, TransportError};

/// Shown for every transport-level failure.
pub const CONNECTIVITY_NOTICE: &str = "Error connecting to server.";

/// Shown when the service answered with an out-of-contract payload.
pub const INVALID_RESPONSE_NOTICE: &str = "The scoring service returned an unusable result.";

/// Coarse lifecycle phase, for guards and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Why a submission cycle ended in `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// Request could not be completed (detail kept for logs only)
    Transport(String),
    /// Response parsed but failed output-side validation
    InvalidResponse(ValidationError),
}

impl FailureReason {
    /// Generic user-facing notice.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Transport(_) => CONNECTIVITY_NOTICE,
            Self::InvalidResponse(_) => INVALID_RESPONSE_NOTICE,
        }
    }
}

/// State of the current prediction cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle {
    Idle,
    Submitting {
        started_at: Instant,
    },
    Succeeded {
        result: PredictionResult,
        display: DisplayModel,
        received_at: DateTime<Utc>,
    },
    Failed {
        reason: FailureReason,
    },
}

impl Lifecycle {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Submitting { .. } => Phase::Submitting,
            Self::Succeeded { .. } => Phase::Succeeded,
            Self::Failed { .. } => Phase::Failed,
        }
    }
}

/// `submit` was called outside `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("A prediction cannot be submitted while {0}")]
pub struct NotIdleError(pub Phase);

type Outcome = Result<PredictionResult, TransportError>;

/// Owns the request lifecycle and the single outstanding request.
pub struct PredictionOrchestrator {
    service: Arc<dyn ScoringService>,
    runtime: Handle,
    min_display: Duration,
    lifecycle: Lifecycle,
    pending: Option<oneshot::Receiver<Outcome>>,
}

impl PredictionOrchestrator {
    /// Create an orchestrator that spawns requests on `runtime`.
    ///
    /// `min_display` is the minimum time between submission and revealing a
    /// successful result.
    pub fn new(service: Arc<dyn ScoringService>, runtime: Handle, min_display: Duration) -> Self {
        Self {
            service,
            runtime,
            min_display,
            lifecycle: Lifecycle::Idle,
            pending: None,
        }
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Start a prediction for a snapshot of `form`.
    ///
    /// The snapshot is taken here; later edits to `form` do not reach the
    /// in-flight request.
    ///
    /// # Errors
    /// Returns `NotIdleError` unless the lifecycle is `Idle`.
    pub fn submit(&mut self, form: &FormState) -> Result<(), NotIdleError> {
        if self.phase() != Phase::Idle {
            tracing::warn!("Rejected submit while {}", self.phase());
            return Err(NotIdleError(self.phase()));
        }

        let snapshot = form.clone();
        let service = Arc::clone(&self.service);
        let min_display = self.min_display;
        let started_at = Instant::now();
        let (tx, rx) = oneshot::channel();

        tracing::info!("Submitting prediction request to {}", service.endpoint());

        self.runtime.spawn(async move {
            let outcome = service.predict(&snapshot).await;
            if outcome.is_ok() {
                tokio::time::sleep_until(started_at + min_display).await;
            }
            // Receiver gone means the session ended; nothing left to notify.
            let _ = tx.send(outcome);
        });

        self.pending = Some(rx);
        self.lifecycle = Lifecycle::Submitting { started_at };
        Ok(())
    }

    /// Check the in-flight request without blocking.
    ///
    /// Returns `true` if the lifecycle changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(TransportError::Worker),
        };

        self.pending = None;
        self.resolve(outcome);
        true
    }

    /// Wait for the in-flight request, if any, and return the settled lifecycle.
    pub async fn wait(&mut self) -> &Lifecycle {
        if let Some(rx) = self.pending.take() {
            let outcome = rx.await.unwrap_or_else(|_| Err(TransportError::Worker));
            self.resolve(outcome);
        }
        &self.lifecycle
    }

    /// Discard a held result or failure and return to `Idle`.
    ///
    /// Returns `false` (and changes nothing) while a request is in flight.
    pub fn check_another(&mut self) -> bool {
        match self.phase() {
            Phase::Submitting => false,
            Phase::Idle => true,
            Phase::Succeeded | Phase::Failed => {
                tracing::debug!("Lifecycle {} -> idle", self.phase());
                self.lifecycle = Lifecycle::Idle;
                true
            }
        }
    }

    fn resolve(&mut self, outcome: Outcome) {
        let elapsed_ms = match &self.lifecycle {
            Lifecycle::Submitting { started_at } => started_at.elapsed().as_millis() as u64,
            _ => 0,
        };

        self.lifecycle = match outcome {
            Ok(result) => match present(&result) {
                Ok(model) => {
                    tracing::info!(
                        tier = %model.severity_tier,
                        elapsed_ms,
                        "Prediction received"
                    );
                    Lifecycle::Succeeded {
                        result,
                        display: model,
                        received_at: Utc::now(),
                    }
                }
                Err(e) => {
                    tracing::warn!("Rejected prediction response: {e}");
                    Lifecycle::Failed {
                        reason: FailureReason::InvalidResponse(e),
                    }
                }
            },
            Err(e) => {
                tracing::warn!(elapsed_ms, "Prediction request failed: {e}");
                Lifecycle::Failed {
                    reason: FailureReason::Transport(e.to_string()),
                }
            }
        };
    }
}
