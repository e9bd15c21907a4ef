use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Name of the identifier field in every collection
pub const ID_FIELD: &str = "id";

/// Prefix that marks a client-generated identifier
pub const TEMP_ID_PREFIX: &str = "tmp-";

/// Record identifier: integer or string, as assigned by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Placeholder identifier for a record that has not been persisted yet
    pub fn temporary(timestamp_ms: i64, seq: u64) -> Self {
        RecordId::Text(format!("{}{}-{}", TEMP_ID_PREFIX, timestamp_ms, seq))
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, RecordId::Text(s) if s.starts_with(TEMP_ID_PREFIX))
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(n) => Value::from(*n),
            RecordId::Text(s) => Value::String(s.clone()),
        }
    }

    /// Plain numeric reading of the identifier, NaN when it is not a number.
    /// Unlike the filter normalization no characters are stripped, so
    /// `"EQ-12"` and temporary identifiers are NaN here.
    pub fn as_number(&self) -> f64 {
        match self {
            RecordId::Int(n) => *n as f64,
            RecordId::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// One row of a collection: field name -> JSON value, in server order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from a JSON object; anything else yields `None`
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn id(&self) -> Option<RecordId> {
        self.get(ID_FIELD).and_then(RecordId::from_value)
    }

    pub fn set_id(&mut self, id: &RecordId) {
        self.set(ID_FIELD, id.to_value());
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric reading of a field for calculations: JSON numbers as is,
    /// strings through [`parse_currency`]. Absent or malformed values are NaN.
    pub fn number(&self, field: &str) -> f64 {
        match self.get(field) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => parse_currency(s),
            _ => f64::NAN,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

/// JSON value for a computed number. Integral results are stored as
/// integers so an unchanged recomputation compares equal to server data.
/// Non-finite results become `null`.
pub fn number_value(value: f64) -> Value {
    if !value.is_finite() {
        return Value::Null;
    }
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Value::from(value as i64);
    }
    Value::from(value)
}

/// Keeps only ASCII digits and parses them, `"EQ-12"` -> 12.
/// No digits at all gives NaN.
pub fn parse_digits(text: &str) -> f64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.parse::<f64>().unwrap_or(f64::NAN)
}

/// Keeps digits, `.` and `-`, then parses a float, `"₦1,250.50"` -> 1250.5.
/// Malformed input gives NaN.
pub fn parse_currency(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}
