//! Form state store and the pre-submit validation stage.
//!
//! Values are held exactly as entered (numbers from defaults, text from the
//! keyboard) and forwarded verbatim; bounds are only checked by `validate`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::field::{list_fields, EnumOption, FieldKind, FieldSpec, FIELD_COUNT};

/// Current value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric interpretation of the value, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Text shown in an input box.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Whole numbers go out as JSON integers (`30`, not `30.0`).
            Self::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Update targeted a field that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownFieldError(pub String);

/// Current value of every registered field, in registry order.
///
/// Serializes to the scoring request body: a JSON object keyed by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: Vec<FieldValue>,
}

impl FormState {
    /// Seed every field with its registry default.
    #[must_use]
    pub fn initialize() -> Self {
        Self {
            values: list_fields()
                .iter()
                .map(|f| FieldValue::Number(f.default_value()))
                .collect(),
        }
    }

    /// Replace the value of `name`.
    ///
    /// No bounds or membership checks happen here.
    ///
    /// # Errors
    /// Returns `UnknownFieldError` (leaving the state untouched) if `name`
    /// is not registered.
    pub fn update(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), UnknownFieldError> {
        let index = list_fields()
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| UnknownFieldError(name.to_string()))?;
        self.values[index] = value.into();
        Ok(())
    }

    /// Value of `name`, if registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        list_fields()
            .iter()
            .position(|f| f.name == name)
            .map(|i| &self.values[i])
    }

    /// Fields paired with their current values, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldValue)> {
        list_fields().iter().zip(self.values.iter())
    }

    /// Run the validation stage.
    #[must_use]
    pub fn validate(&self) -> Validation {
        let errors: Vec<FieldError> = self
            .iter()
            .filter_map(|(spec, value)| check_field(spec, value).err())
            .collect();

        if errors.is_empty() {
            Validation::Valid(self.clone())
        } else {
            Validation::Invalid(errors)
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::initialize()
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (spec, value) in self.iter() {
            map.serialize_entry(spec.name, value)?;
        }
        map.end()
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{label}: Invalid number")]
    NotANumber { field: &'static str, label: &'static str },

    #[error("{label}: Value must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{label}: {value} is not one of {allowed}")]
    NotAnOption {
        field: &'static str,
        label: &'static str,
        value: String,
        allowed: String,
    },
}

impl FieldError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotAnOption { field, .. } => field,
        }
    }
}

/// Outcome of the validation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(FormState),
    Invalid(Vec<FieldError>),
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

fn check_field(spec: &'static FieldSpec, value: &FieldValue) -> Result<(), FieldError> {
    if let (FieldKind::Enum { options, .. }, FieldValue::Text(text)) = (spec.kind, value) {
        // Codes are sent as typed, so only their canonical spelling is accepted.
        let code = text.trim();
        return if options.iter().any(|o| o.value.to_string() == code) {
            Ok(())
        } else {
            Err(not_an_option(spec, options, value))
        };
    }

    let Some(number) = value.as_number() else {
        return Err(FieldError::NotANumber {
            field: spec.name,
            label: spec.label,
        });
    };

    if spec.accepts(number) {
        return Ok(());
    }

    Err(match spec.kind {
        FieldKind::Numeric { min, max, .. } => FieldError::OutOfRange {
            field: spec.name,
            label: spec.label,
            min,
            max,
        },
        FieldKind::Enum { options, .. } => not_an_option(spec, options, value),
    })
}

fn not_an_option(
    spec: &'static FieldSpec,
    options: &[EnumOption],
    value: &FieldValue,
) -> FieldError {
    FieldError::NotAnOption {
        field: spec.name,
        label: spec.label,
        value: value.display(),
        allowed: options
            .iter()
            .map(|o| o.value.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_matches_defaults() {
        let state = FormState::initialize();
        for (spec, value) in state.iter() {
            assert_eq!(value, &FieldValue::Number(spec.default_value()), "{spec}");
        }
        assert_eq!(state.iter().count(), 11);
    }

    #[test]
    fn test_default_body_serialization() {
        let body = serde_json::to_string(&FormState::initialize()).expect("serializes");
        assert_eq!(
            body,
            r#"{"age":30,"gender":1,"height":170,"weight":70,"ap_hi":120,"ap_lo":80,"cholesterol":1,"gluc":1,"smoke":0,"alco":0,"active":1}"#
        );
    }

    #[test]
    fn test_update_passes_text_through_verbatim() {
        let mut state = FormState::initialize();
        state.update("age", "45").expect("registered");
        state.update("cholesterol", "3").expect("registered");
        state.update("weight", 72.5).expect("registered");

        let body = serde_json::to_value(&state).expect("serializes");
        assert_eq!(body["age"], serde_json::json!("45"));
        assert_eq!(body["cholesterol"], serde_json::json!("3"));
        assert_eq!(body["weight"], serde_json::json!(72.5));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut once = FormState::initialize();
        once.update("ap_hi", "140").expect("registered");

        let mut twice = once.clone();
        twice.update("ap_hi", "140").expect("registered");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_unknown_field_leaves_state_unchanged() {
        let mut state = FormState::initialize();
        state.update("age", "50").expect("registered");
        let before = state.clone();

        let err = state.update("bmi", "22").unwrap_err();
        assert_eq!(err, UnknownFieldError("bmi".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn test_update_does_not_enforce_bounds() {
        let mut state = FormState::initialize();
        state.update("age", 500_i64).expect("registered");
        assert_eq!(state.get("age"), Some(&FieldValue::Number(500.0)));
    }

    #[test]
    fn test_validation_defaults_valid() {
        assert!(FormState::initialize().validate().is_valid());
    }

    #[test]
    fn test_validation_reports_every_bad_field() {
        let mut state = FormState::initialize();
        state.update("age", "abc").expect("registered");
        state.update("ap_hi", "300").expect("registered");
        state.update("gluc", "4").expect("registered");
        state.update("smoke", "0.5").expect("registered");

        let Validation::Invalid(errors) = state.validate() else {
            panic!("expected invalid form");
        };
        let fields: Vec<_> = errors.iter().map(FieldError::field).collect();
        assert_eq!(fields, ["age", "ap_hi", "gluc", "smoke"]);
        assert!(matches!(errors[0], FieldError::NotANumber { .. }));
        assert_eq!(errors[1].to_string(), "Systolic BP: Value must be between 60 and 240");
    }

    #[test]
    fn test_enum_codes_must_be_canonical() {
        let mut state = FormState::initialize();
        state.update("gender", "1.0").expect("registered");
        state.update("smoke", "00").expect("registered");
        state.update("alco", "").expect("registered");
        state.update("cholesterol", " 2 ").expect("registered");
        state.update("active", 0_i64).expect("registered");

        let Validation::Invalid(errors) = state.validate() else {
            panic!("non-canonical codes must not reach the service");
        };
        let fields: Vec<_> = errors.iter().map(FieldError::field).collect();
        assert_eq!(fields, ["gender", "smoke", "alco"]);
        assert!(errors
            .iter()
            .all(|e| matches!(e, FieldError::NotAnOption { .. })));
        assert_eq!(errors[0].to_string(), "Gender: 1.0 is not one of 1, 2");
    }
}
