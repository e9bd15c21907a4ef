//! Filter composition: AND of every active field condition plus the
//! free-text search query

use super::normalize::{normalize, raw_text};
use super::predicate::{build, Condition};
use contracts::shared::field::{find_field, FieldKind, FieldSpec};
use contracts::shared::filter::FilterState;
use contracts::shared::record::Record;
use tracing::debug;

/// Search queries shorter than this are ignored
pub const MIN_SEARCH_LEN: usize = 3;

/// Case-insensitive search over the text-like fields of a record
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pattern: String,
    fields: &'static [FieldSpec],
}

impl SearchQuery {
    /// `None` when the query is too short to be active
    pub fn new(query: &str, fields: &'static [FieldSpec]) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_SEARCH_LEN {
            return None;
        }
        Some(Self {
            pattern: trimmed.to_lowercase(),
            fields,
        })
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.fields.iter().any(|field| match field.kind {
            FieldKind::Text | FieldKind::Enum => {
                normalize(record, field).as_text().contains(&self.pattern)
            }
            FieldKind::Identifier => raw_text(record.get(field.name))
                .to_lowercase()
                .contains(&self.pattern),
            _ => false,
        })
    }
}

/// Combined predicate of a list view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeFilter {
    conditions: Vec<Condition>,
    search: Option<SearchQuery>,
}

/// Build the composite filter of `state` over `fields`.
/// Unset fields and fields the collection does not declare add nothing.
pub fn compose(state: &FilterState, fields: &'static [FieldSpec]) -> CompositeFilter {
    let mut conditions = Vec::new();
    for (name, filter) in state.iter() {
        let Some(spec) = find_field(fields, name) else {
            debug!(field = name, "filter on unknown field ignored");
            continue;
        };
        if !spec.filterable {
            debug!(field = name, "filter on non-filterable field ignored");
            continue;
        }
        let condition = build(filter, spec);
        if !condition.is_always() {
            conditions.push(condition);
        }
    }
    CompositeFilter {
        conditions,
        search: None,
    }
}

impl CompositeFilter {
    pub fn with_search(mut self, query: &str, fields: &'static [FieldSpec]) -> Self {
        self.search = SearchQuery::new(query, fields);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// No active condition and no active search
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.search.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
            && self.search.as_ref().map_or(true, |s| s.matches(record))
    }

    /// Single filtering pass over the whole collection
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let filtered: Vec<&Record> = records.into_iter().filter(|r| self.matches(r)).collect();
        debug!(
            conditions = self.conditions.len(),
            search = self.search.is_some(),
            matched = filtered.len(),
            "filter applied"
        );
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::id("ID"),
        FieldSpec::new("name", "Name", FieldKind::Text),
        FieldSpec::new("status", "Status", FieldKind::Enum),
        FieldSpec::new("cost", "Cost", FieldKind::CurrencyText),
        FieldSpec::new("phone", "Phone", FieldKind::Text).not_filterable(),
    ];

    fn records() -> Vec<Record> {
        vec![
            json!({"id": 1, "name": "Excavator A", "status": "active", "cost": 50, "phone": "1"}),
            json!({"id": 2, "name": "Loader", "status": "idle", "cost": 100, "phone": "2"}),
            json!({"id": 3, "name": "Excavator B", "status": "active", "cost": 300, "phone": "3"}),
            json!({"id": 4, "name": "Grader", "status": "active", "cost": 500, "phone": "4"}),
            json!({"id": 5, "name": "Crane", "status": "retired", "cost": 600, "phone": "5"}),
        ]
        .into_iter()
        .filter_map(Record::from_json)
        .collect()
    }

    fn ids(records: &[&Record]) -> Vec<i64> {
        records
            .iter()
            .filter_map(|r| r.get("id").and_then(|v| v.as_i64()))
            .collect()
    }

    #[test]
    fn test_empty_state_keeps_everything() {
        let data = records();
        let filter = compose(&FilterState::new(), FIELDS);
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&data).len(), 5);
    }

    #[test]
    fn test_conditions_are_anded() {
        let data = records();
        let mut state = FilterState::new();
        state.set_exact("status", "active");
        state.set_min("cost", "100");
        state.set_max("cost", "500");
        assert_eq!(ids(&compose(&state, FIELDS).apply(&data)), vec![3, 4]);
    }

    #[test]
    fn test_unknown_and_locked_fields_ignored() {
        let data = records();
        let mut state = FilterState::new();
        state.set_exact("colour", "red");
        state.set_exact("phone", "3");
        assert!(compose(&state, FIELDS).is_empty());
        assert_eq!(compose(&state, FIELDS).apply(&data).len(), 5);
    }

    #[test]
    fn test_search_needs_three_chars() {
        let data = records();
        let filter = compose(&FilterState::new(), FIELDS).with_search("ex", FIELDS);
        assert!(filter.is_empty());

        let filter = compose(&FilterState::new(), FIELDS).with_search(" EXCAV ", FIELDS);
        assert_eq!(ids(&filter.apply(&data)), vec![1, 3]);

        let filter = compose(&FilterState::new(), FIELDS).with_search("retired", FIELDS);
        assert_eq!(ids(&filter.apply(&data)), vec![5]);
    }
}
