//! Prediction payload returned by the scoring service and its display model.

use serde::{Deserialize, Serialize};

/// Binary classification returned by the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskClass {
    /// `0`
    Low,
    /// `1`
    Elevated,
}

impl TryFrom<u8> for RiskClass {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Low),
            1 => Ok(Self::Elevated),
            other => Err(format!("prediction must be 0 or 1, got {other}")),
        }
    }
}

impl From<RiskClass> for u8 {
    fn from(class: RiskClass) -> Self {
        match class {
            RiskClass::Low => 0,
            RiskClass::Elevated => 1,
        }
    }
}

/// Response body of the prediction endpoint.
///
/// Unknown keys (the service also sends `status`) are ignored; missing keys
/// or wrong types fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: RiskClass,
    /// Risk probability, expected in `[0, 1]`
    pub probability: f64,
}

/// Visual severity of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTier {
    Low,
    Elevated,
}

impl SeverityTier {
    /// Headline shown above the percentage.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk Detected",
            Self::Elevated => "Attention Needed",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Elevated => write!(f, "ELEVATED"),
        }
    }
}

/// Presentation-ready view of a `PredictionResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayModel {
    pub severity_tier: SeverityTier,
    /// `round(probability * 100)`, always in `0..=100`
    pub percentage_label: u8,
}

impl DisplayModel {
    #[must_use]
    pub fn headline(&self) -> &'static str {
        self.severity_tier.headline()
    }
}

/// Response carried a value the display cannot represent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

/// Derive the display model for a prediction.
///
/// # Errors
/// Returns `ValidationError::ProbabilityOutOfRange` for probabilities outside
/// `[0, 1]` (including NaN).
pub fn present(result: &PredictionResult) -> Result<DisplayModel, ValidationError> {
    if !(0.0..=1.0).contains(&result.probability) {
        return Err(ValidationError::ProbabilityOutOfRange(result.probability));
    }

    let severity_tier = match result.prediction {
        RiskClass::Elevated => SeverityTier::Elevated,
        RiskClass::Low => SeverityTier::Low,
    };

    // Non-negative input, so `round` (half away from zero) is round-half-up.
    let percentage_label = (result.probability * 100.0).round() as u8;

    Ok(DisplayModel {
        severity_tier,
        percentage_label,
    })
}
