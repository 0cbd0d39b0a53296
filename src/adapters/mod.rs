//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the scoring service
//! - `sanitize`: health-metric redaction for logs

pub mod http;
pub mod sanitize;

pub use http::HttpScoringClient;
