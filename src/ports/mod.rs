//! Ports layer: Trait definitions for external operations.
//!
//! The scoring service is the only external collaborator; the orchestrator
//! talks to it exclusively through this trait so tests can substitute it.

mod scoring;

pub use scoring::{ScoringService, TransportError};
