//! Field registry: the fixed catalogue of health-metric inputs.
//!
//! Feature set of the cardiovascular disease dataset the scoring service was
//! trained on. Order is the canonical display order: demographics,
//! anthropometrics, vitals, labs, lifestyle.

use std::fmt;

/// Broad grouping of a field; the form shows one heading per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Demographic,
    Anthropometric,
    VitalSign,
    LabResult,
    Lifestyle,
}

impl FieldCategory {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Demographic => "About You",
            Self::Anthropometric => "Body Measurements",
            Self::VitalSign => "Blood Pressure",
            Self::LabResult => "Lab Results",
            Self::Lifestyle => "Lifestyle",
        }
    }
}

/// One selectable option of an enumerated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumOption {
    /// Code sent to the scoring service
    pub value: i64,
    /// Human-readable label
    pub label: &'static str,
}

/// Domain of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Closed range `[min, max]`, both inclusive.
    Numeric { min: f64, max: f64, default: f64 },
    /// Non-empty ordered option set; `default` is one of the option values.
    Enum {
        options: &'static [EnumOption],
        default: i64,
    },
}

/// Immutable descriptor of a single input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Stable key into form state and the request body
    pub name: &'static str,
    /// Display label, including units where relevant
    pub label: &'static str,
    pub category: FieldCategory,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Whether `value` lies inside this field's declared domain.
    #[must_use]
    pub fn accepts(&self, value: f64) -> bool {
        match self.kind {
            FieldKind::Numeric { min, max, .. } => (min..=max).contains(&value),
            FieldKind::Enum { options, .. } => {
                value.fract() == 0.0 && options.iter().any(|o| o.value as f64 == value)
            }
        }
    }

    /// Default value as a number.
    #[must_use]
    pub fn default_value(&self) -> f64 {
        match self.kind {
            FieldKind::Numeric { default, .. } => default,
            FieldKind::Enum { default, .. } => default as f64,
        }
    }

    /// Options of an enumerated field, empty for numeric ones.
    #[must_use]
    pub fn options(&self) -> &'static [EnumOption] {
        match self.kind {
            FieldKind::Enum { options, .. } => options,
            FieldKind::Numeric { .. } => &[],
        }
    }

    /// Label of the option coded by `value`, if this is an enum field.
    #[must_use]
    pub fn option_label(&self, value: i64) -> Option<&'static str> {
        self.options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label)
    }

    /// Short description of the domain, e.g. `10-100` or `Normal/Above Normal/High`.
    #[must_use]
    pub fn domain_hint(&self) -> String {
        match self.kind {
            FieldKind::Numeric { min, max, .. } => format!("{min}-{max}"),
            FieldKind::Enum { options, .. } => options
                .iter()
                .map(|o| o.label)
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.name)
    }
}

const GENDER: &[EnumOption] = &[
    EnumOption { value: 1, label: "Male" },
    EnumOption { value: 2, label: "Female" },
];

const LEVEL: &[EnumOption] = &[
    EnumOption { value: 1, label: "Normal" },
    EnumOption { value: 2, label: "Above Normal" },
    EnumOption { value: 3, label: "High" },
];

const NO_YES: &[EnumOption] = &[
    EnumOption { value: 0, label: "No" },
    EnumOption { value: 1, label: "Yes" },
];

const YES_NO: &[EnumOption] = &[
    EnumOption { value: 1, label: "Yes" },
    EnumOption { value: 0, label: "No" },
];

/// Number of registered fields.
pub const FIELD_COUNT: usize = 11;

static FIELDS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec {
        name: "age",
        label: "Age (Years)",
        category: FieldCategory::Demographic,
        kind: FieldKind::Numeric { min: 10.0, max: 100.0, default: 30.0 },
    },
    FieldSpec {
        name: "gender",
        label: "Gender",
        category: FieldCategory::Demographic,
        kind: FieldKind::Enum { options: GENDER, default: 1 },
    },
    FieldSpec {
        name: "height",
        label: "Height (cm)",
        category: FieldCategory::Anthropometric,
        kind: FieldKind::Numeric { min: 100.0, max: 250.0, default: 170.0 },
    },
    FieldSpec {
        name: "weight",
        label: "Weight (kg)",
        category: FieldCategory::Anthropometric,
        kind: FieldKind::Numeric { min: 30.0, max: 200.0, default: 70.0 },
    },
    FieldSpec {
        name: "ap_hi",
        label: "Systolic BP",
        category: FieldCategory::VitalSign,
        kind: FieldKind::Numeric { min: 60.0, max: 240.0, default: 120.0 },
    },
    FieldSpec {
        name: "ap_lo",
        label: "Diastolic BP",
        category: FieldCategory::VitalSign,
        kind: FieldKind::Numeric { min: 40.0, max: 180.0, default: 80.0 },
    },
    FieldSpec {
        name: "cholesterol",
        label: "Cholesterol",
        category: FieldCategory::LabResult,
        kind: FieldKind::Enum { options: LEVEL, default: 1 },
    },
    FieldSpec {
        name: "gluc",
        label: "Glucose",
        category: FieldCategory::LabResult,
        kind: FieldKind::Enum { options: LEVEL, default: 1 },
    },
    FieldSpec {
        name: "smoke",
        label: "Smoking",
        category: FieldCategory::Lifestyle,
        kind: FieldKind::Enum { options: NO_YES, default: 0 },
    },
    FieldSpec {
        name: "alco",
        label: "Alcohol",
        category: FieldCategory::Lifestyle,
        kind: FieldKind::Enum { options: NO_YES, default: 0 },
    },
    FieldSpec {
        name: "active",
        label: "Active Lifestyle",
        category: FieldCategory::Lifestyle,
        kind: FieldKind::Enum { options: YES_NO, default: 1 },
    },
];

/// All registered fields in canonical display order.
#[must_use]
pub fn list_fields() -> &'static [FieldSpec] {
    &FIELDS
}

/// Look up a field by name.
#[must_use]
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Position of a field in display order.
#[must_use]
pub fn field_index(name: &str) -> Option<usize> {
    FIELDS.iter().position(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_eleven_unique_fields() {
        let fields = list_fields();
        assert_eq!(fields.len(), 11);

        let names: HashSet<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_defaults_lie_within_domain() {
        for field in list_fields() {
            match field.kind {
                FieldKind::Numeric { min, max, default } => {
                    assert!(min <= default && default <= max, "{field}");
                }
                FieldKind::Enum { options, default } => {
                    assert!(!options.is_empty(), "{field}");
                    assert!(options.iter().any(|o| o.value == default), "{field}");
                }
            }
            assert!(field.accepts(field.default_value()), "{field}");
        }
    }

    #[test]
    fn test_enum_option_values_unique() {
        for field in list_fields() {
            let values: HashSet<_> = field.options().iter().map(|o| o.value).collect();
            assert_eq!(values.len(), field.options().len(), "{field}");
        }
    }

    #[test]
    fn test_canonical_order() {
        let order: Vec<_> = list_fields().iter().map(|f| f.name).collect();
        assert_eq!(
            order,
            [
                "age",
                "gender",
                "height",
                "weight",
                "ap_hi",
                "ap_lo",
                "cholesterol",
                "gluc",
                "smoke",
                "alco",
                "active"
            ]
        );

        // Categories never interleave.
        let mut seen = Vec::new();
        for field in list_fields() {
            if seen.last() != Some(&field.category) {
                assert!(!seen.contains(&field.category));
                seen.push(field.category);
            }
        }
    }

    #[test]
    fn test_accepts() {
        let age = find_field("age").expect("age registered");
        assert!(age.accepts(10.0));
        assert!(age.accepts(100.0));
        assert!(!age.accepts(9.5));
        assert!(!age.accepts(101.0));

        let chol = find_field("cholesterol").expect("cholesterol registered");
        assert!(chol.accepts(3.0));
        assert!(!chol.accepts(0.0));
        assert!(!chol.accepts(1.5));
        assert_eq!(chol.option_label(2), Some("Above Normal"));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(field_index("ap_lo"), Some(5));
        assert!(find_field("bmi").is_none());
        assert_eq!(find_field("gender").map(|f| f.domain_hint()).as_deref(), Some("Male/Female"));
    }
}
