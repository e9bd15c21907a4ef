use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter slots of one field.
///
/// `exact` wins over `min`/`max`. `min` alone means "equal to min", not
/// "at least min". `min` and `max` together form an inclusive range.
/// Blank strings count as unset in every slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

fn slot(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl FieldFilter {
    pub fn exact(value: impl Into<String>) -> Self {
        Self {
            exact: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn range(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            exact: None,
            min: min.map(String::from),
            max: max.map(String::from),
        }
    }

    pub fn exact_value(&self) -> Option<&str> {
        slot(&self.exact)
    }

    pub fn min_value(&self) -> Option<&str> {
        slot(&self.min)
    }

    pub fn max_value(&self) -> Option<&str> {
        slot(&self.max)
    }

    pub fn is_active(&self) -> bool {
        self.exact_value().is_some() || self.min_value().is_some() || self.max_value().is_some()
    }
}

/// Active per-field constraints of one list view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    fields: BTreeMap<String, FieldFilter>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, filter: FieldFilter) {
        self.fields.insert(field.into(), filter);
    }

    pub fn set_exact(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(field.into()).or_default().exact = Some(value.into());
    }

    pub fn set_min(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(field.into()).or_default().min = Some(value.into());
    }

    pub fn set_max(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(field.into()).or_default().max = Some(value.into());
    }

    pub fn clear_field(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields with at least one non-blank slot
    pub fn active_count(&self) -> usize {
        self.fields.values().filter(|f| f.is_active()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}
