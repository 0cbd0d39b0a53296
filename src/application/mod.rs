//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the prediction cycle of a session.

mod orchestrator;
mod session;

pub use orchestrator::{
    FailureReason, Lifecycle, NotIdleError, Phase, PredictionOrchestrator, CONNECTIVITY_NOTICE,
    INVALID_RESPONSE_NOTICE,
};
pub use session::{Session, SubmitError, SUBMITTING_LABEL, SUBMIT_LABEL};
