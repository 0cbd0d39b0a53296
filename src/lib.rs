//! # Hriday
//!
//! Terminal client for a remote cardiovascular risk scoring service.
//!
//! This crate provides:
//! - The registry of the 11 health-metric inputs and their domains
//! - A form state store with an explicit validation stage
//! - A request orchestrator with a one-request-at-a-time lifecycle
//! - A presenter turning predictions into display models
//! - Scroll-driven progress state for the single-page terminal view
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (fields, form, prediction, scroll)
//! - `ports`: Trait for the external scoring service
//! - `adapters`: Concrete implementations (reqwest, log sanitizing)
//! - `application`: Orchestrator and session controller
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{Lifecycle, Phase, PredictionOrchestrator, Session, SubmitError};
pub use config::ClientConfig;
pub use domain::{DisplayModel, FieldSpec, FormState, PredictionResult, SeverityTier};

/// Result type for Hriday operations
pub type Result<T> = std::result::Result<T, HridayError>;

/// Main error type for Hriday
#[derive(Debug, thiserror::Error)]
pub enum HridayError {
    #[error(transparent)]
    UnknownField(#[from] domain::UnknownFieldError),

    #[error("Submission rejected: {0}")]
    Submit(#[from] application::SubmitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
