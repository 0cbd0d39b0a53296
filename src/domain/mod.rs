//! Domain layer: Core types and pure state transitions.
//!
//! Nothing in here performs I/O; every operation is a plain function of its
//! inputs, which keeps the form, presenter and scroll logic testable without
//! a terminal or a network.

mod field;
mod form;
mod prediction;
mod scroll;

pub use field::{
    field_index, find_field, list_fields, EnumOption, FieldCategory, FieldKind, FieldSpec,
    FIELD_COUNT,
};
pub use form::{FieldError, FieldValue, FormState, UnknownFieldError, Validation};
pub use prediction::{
    present, DisplayModel, PredictionResult, RiskClass, SeverityTier, ValidationError,
};
pub use scroll::{ScrollPosition, ScrollState};
