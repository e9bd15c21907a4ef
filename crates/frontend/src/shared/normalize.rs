//! Field access and coercion for filtering and sorting
//!
//! Normalization never fails: malformed numbers become NaN (which fails
//! every comparison), absent text becomes the empty string and absent
//! dates become 0.

use contracts::shared::field::{FieldKind, FieldSpec};
use contracts::shared::record::{parse_currency, parse_digits, Record};
use serde_json::Value;
use std::cmp::Ordering;

/// Normalized field value
#[derive(Debug, Clone, PartialEq)]
pub enum Comparable {
    Number(f64),
    Text(String),
}

impl Comparable {
    pub fn as_number(&self) -> f64 {
        match self {
            Comparable::Number(n) => *n,
            Comparable::Text(_) => f64::NAN,
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Comparable::Text(s) => s,
            Comparable::Number(_) => "",
        }
    }

    /// Strict equality; NaN equals nothing
    pub fn equals(&self, other: &Comparable) -> bool {
        match (self, other) {
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::Text(a), Comparable::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Ascending order in which NaN sorts after every number
    pub fn cmp_nan_last(&self, other: &Comparable) -> Ordering {
        match (self, other) {
            (Comparable::Number(a), Comparable::Number(b)) => cmp_f64_nan_last(*a, *b),
            (Comparable::Text(a), Comparable::Text(b)) => a.cmp(b),
            (Comparable::Number(_), Comparable::Text(_)) => Ordering::Less,
            (Comparable::Text(_), Comparable::Number(_)) => Ordering::Greater,
        }
    }
}

/// Total order on floats with NaN after every number
pub fn cmp_f64_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Raw string form of a value, as shown in CSV: null is empty,
/// strings are unquoted, everything else is JSON text
pub fn raw_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn normalize(record: &Record, spec: &FieldSpec) -> Comparable {
    normalize_value(record.get(spec.name), spec.kind)
}

pub fn normalize_value(value: Option<&Value>, kind: FieldKind) -> Comparable {
    match kind {
        FieldKind::Identifier => Comparable::Number(identifier_number(value)),
        FieldKind::Numeric => Comparable::Number(numeric(value)),
        FieldKind::CurrencyText => Comparable::Number(currency(value)),
        FieldKind::DateKey => Comparable::Number(date_key(value)),
        FieldKind::Text | FieldKind::Enum => Comparable::Text(raw_text(value).to_lowercase()),
    }
}

/// Normalize a filter input typed by the user
pub fn normalize_input(input: &str, kind: FieldKind) -> Comparable {
    match kind {
        FieldKind::Identifier => Comparable::Number(parse_digits(input)),
        FieldKind::Numeric => Comparable::Number(parse_plain(input)),
        FieldKind::CurrencyText => Comparable::Number(parse_currency(input)),
        FieldKind::DateKey => Comparable::Number(date_key_from_str(input)),
        FieldKind::Text | FieldKind::Enum => Comparable::Text(input.trim().to_lowercase()),
    }
}

fn parse_plain(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// `"EQ-12"` -> 12, numbers as is
fn identifier_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_digits(s),
        _ => f64::NAN,
    }
}

fn numeric(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_plain(s),
        _ => f64::NAN,
    }
}

/// Keeps digits, `.` and `-` of a formatted amount
fn currency(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_currency(s),
        _ => f64::NAN,
    }
}

/// `"2024-01-05"` -> 20240105; absent or empty -> 0
pub fn date_key(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::String(s)) => date_key_from_str(s),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(_) => f64::NAN,
    }
}

/// Date portion of a date or datetime string, trimmed
pub(crate) fn date_part(text: &str) -> &str {
    let text = text.trim();
    text.split_once('T').map_or(text, |(date, _)| date)
}

fn date_key_from_str(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let date = date_part(text);
    let digits: String = date.chars().filter(|c| *c != '-').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }
    digits.parse::<i64>().map(|n| n as f64).unwrap_or(f64::NAN)
}
