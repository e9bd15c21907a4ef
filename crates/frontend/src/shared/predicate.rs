//! Per-field filter conditions
//!
//! One strategy for every field: "single value OR range" over the three
//! slots of [`FieldFilter`].

use super::normalize::{normalize, normalize_input, Comparable};
use contracts::shared::field::{FieldKind, FieldSpec};
use contracts::shared::filter::FieldFilter;
use contracts::shared::record::Record;

/// Condition on a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// No constraint
    Always,
    /// Normalized field value equals the normalized input
    Equals { field: FieldSpec, value: Comparable },
    /// Case-insensitive substring (text fields)
    Contains { field: FieldSpec, pattern: String },
    /// Inclusive range on the numeric value; open sides are infinite
    Range { field: FieldSpec, min: f64, max: f64 },
}

impl Condition {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Condition::Always => true,
            Condition::Equals { field, value } => normalize(record, field).equals(value),
            Condition::Contains { field, pattern } => {
                normalize(record, field).as_text().contains(pattern.as_str())
            }
            Condition::Range { field, min, max } => {
                let v = normalize(record, field).as_number();
                v >= *min && v <= *max
            }
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Condition::Always)
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            Condition::Always => None,
            Condition::Equals { field, .. }
            | Condition::Contains { field, .. }
            | Condition::Range { field, .. } => Some(field.name),
        }
    }
}

/// Build the condition for one field.
///
/// Priority: `exact`, then `min` alone (equality, not `>= min`), then
/// `min`/`max` as an inclusive range, else no constraint. Text fields only
/// use `exact`, as a substring. Enum fields have no range mode.
pub fn build(filter: &FieldFilter, spec: &FieldSpec) -> Condition {
    let exact = filter.exact_value();
    let min = filter.min_value();
    let max = filter.max_value();

    match spec.kind {
        FieldKind::Text => match exact {
            Some(text) => Condition::Contains {
                field: *spec,
                pattern: text.to_lowercase(),
            },
            None => Condition::Always,
        },
        FieldKind::Enum => match exact.or(if max.is_none() { min } else { None }) {
            Some(value) => Condition::Equals {
                field: *spec,
                value: normalize_input(value, spec.kind),
            },
            None => Condition::Always,
        },
        _ => {
            if let Some(value) = exact {
                return Condition::Equals {
                    field: *spec,
                    value: normalize_input(value, spec.kind),
                };
            }
            match (min, max) {
                (Some(value), None) => Condition::Equals {
                    field: *spec,
                    value: normalize_input(value, spec.kind),
                },
                (None, None) => Condition::Always,
                (min, max) => Condition::Range {
                    field: *spec,
                    min: min
                        .map(|v| normalize_input(v, spec.kind).as_number())
                        .unwrap_or(f64::NEG_INFINITY),
                    max: max
                        .map(|v| normalize_input(v, spec.kind).as_number())
                        .unwrap_or(f64::INFINITY),
                },
            }
        }
    }
}
