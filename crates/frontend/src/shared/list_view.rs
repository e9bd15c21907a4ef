//! Sorting and the incrementally growing visible window

use super::normalize::{cmp_f64_nan_last, normalize, raw_text};
use contracts::shared::field::{find_field, FieldSpec};
use contracts::shared::record::{Record, RecordId, ID_FIELD};
use std::cmp::Ordering;

pub const DEFAULT_VISIBLE_COUNT: usize = 10;
pub const LOAD_MORE_STEP: usize = 10;

/// Number of rows exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    visible_count: usize,
    step: usize,
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE_COUNT, LOAD_MORE_STEP)
    }
}

impl VisibleWindow {
    pub fn new(initial: usize, step: usize) -> Self {
        Self {
            visible_count: initial,
            step: step.max(1),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Grow by one step. Past the end of the collection this only moves
    /// the counter; the slice stays the same.
    pub fn load_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.step);
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count.min(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible_count
    }
}

/// Sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub ascending: bool,
}

impl Default for SortKey {
    /// Newest first: descending identifier
    fn default() -> Self {
        Self {
            field: ID_FIELD.to_string(),
            ascending: false,
        }
    }
}

impl SortKey {
    pub fn new(field: impl Into<String>, ascending: bool) -> Self {
        Self {
            field: field.into(),
            ascending,
        }
    }

    /// Same field flips the direction, another field starts ascending
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = true;
        }
    }

    /// Header marker for a column
    pub fn indicator(&self, field: &str) -> &'static str {
        if self.field == field {
            if self.ascending {
                " ▲"
            } else {
                " ▼"
            }
        } else {
            ""
        }
    }
}

fn id_number(record: &Record) -> f64 {
    record
        .get(ID_FIELD)
        .and_then(RecordId::from_value)
        .map(|id| id.as_number())
        .unwrap_or(f64::NAN)
}

/// Direction applies to real values only; NaN sinks to the end either way
fn directed(a: f64, b: f64, ascending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) if !ascending => cmp_f64_nan_last(b, a),
        _ => cmp_f64_nan_last(a, b),
    }
}

/// Compare two records on `key`. The identifier uses its plain numeric
/// value (no character stripping); other fields their normalized value.
pub fn compare_records(a: &Record, b: &Record, key: &SortKey, fields: &'static [FieldSpec]) -> Ordering {
    if key.field == ID_FIELD {
        return directed(id_number(a), id_number(b), key.ascending);
    }
    match find_field(fields, &key.field) {
        Some(spec) if spec.kind.is_numeric() => directed(
            normalize(a, spec).as_number(),
            normalize(b, spec).as_number(),
            key.ascending,
        ),
        Some(spec) => {
            let ord = normalize(a, spec).as_text().cmp(normalize(b, spec).as_text());
            if key.ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        None => {
            let ord = raw_text(a.get(&key.field)).cmp(&raw_text(b.get(&key.field)));
            if key.ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

/// Stable sort of a copy; the input is left untouched
pub fn sort_records<'a>(records: &[&'a Record], key: &SortKey, fields: &'static [FieldSpec]) -> Vec<&'a Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_records(a, b, key, fields));
    sorted
}

/// Sorted prefix of the filtered collection
pub fn view<'a>(
    filtered: &[&'a Record],
    key: &SortKey,
    fields: &'static [FieldSpec],
    window: &VisibleWindow,
) -> Vec<&'a Record> {
    let sorted = sort_records(filtered, key, fields);
    window.slice(&sorted).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::field::FieldKind;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::id("ID"),
        FieldSpec::new("name", "Name", FieldKind::Text),
        FieldSpec::new("cost", "Cost", FieldKind::CurrencyText),
    ];

    fn rec(value: serde_json::Value) -> Record {
        Record::from_json(value).unwrap()
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| raw_text(r.get("id"))).collect()
    }

    #[test]
    fn test_default_sort_is_id_descending() {
        let data = vec![rec(json!({"id": 2})), rec(json!({"id": 10})), rec(json!({"id": "7"}))];
        let refs: Vec<&Record> = data.iter().collect();
        let sorted = sort_records(&refs, &SortKey::default(), FIELDS);
        assert_eq!(ids(&sorted), vec!["10", "7", "2"]);
        // source order unchanged
        assert_eq!(ids(&refs), vec!["2", "10", "7"]);
    }

    #[test]
    fn test_non_numeric_id_sinks() {
        let data = vec![
            rec(json!({"id": 3})),
            rec(json!({"id": "tmp-1700000000000-0"})),
            rec(json!({"id": 8})),
            rec(json!({"id": 5})),
        ];
        let refs: Vec<&Record> = data.iter().collect();
        let desc = sort_records(&refs, &SortKey::default(), FIELDS);
        assert_eq!(ids(&desc), vec!["8", "5", "3", "tmp-1700000000000-0"]);
        let asc = sort_records(&refs, &SortKey::new("id", true), FIELDS);
        assert_eq!(ids(&asc), vec!["3", "5", "8", "tmp-1700000000000-0"]);
    }

    #[test]
    fn test_sort_by_currency_and_text() {
        let data = vec![
            rec(json!({"id": 1, "name": "b", "cost": "₦1,000"})),
            rec(json!({"id": 2, "name": "A", "cost": "₦200"})),
            rec(json!({"id": 3, "name": "c", "cost": "n/a"})),
        ];
        let refs: Vec<&Record> = data.iter().collect();
        let by_cost = sort_records(&refs, &SortKey::new("cost", false), FIELDS);
        assert_eq!(ids(&by_cost), vec!["1", "2", "3"]);
        let by_name = sort_records(&refs, &SortKey::new("name", true), FIELDS);
        assert_eq!(ids(&by_name), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let data = vec![
            rec(json!({"id": 1, "cost": 5})),
            rec(json!({"id": 2, "cost": 5})),
            rec(json!({"id": 3, "cost": 5})),
        ];
        let refs: Vec<&Record> = data.iter().collect();
        let sorted = sort_records(&refs, &SortKey::new("cost", false), FIELDS);
        assert_eq!(ids(&sorted), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_window_growth() {
        let data: Vec<Record> = (1..=25).map(|i| rec(json!({"id": i}))).collect();
        let refs: Vec<&Record> = data.iter().collect();
        let key = SortKey::default();
        let mut window = VisibleWindow::default();
        assert_eq!(view(&refs, &key, FIELDS, &window).len(), 10);
        assert!(window.has_more(refs.len()));
        window.load_more();
        assert_eq!(view(&refs, &key, FIELDS, &window).len(), 20);
        window.load_more();
        assert_eq!(view(&refs, &key, FIELDS, &window).len(), 25);
        assert!(!window.has_more(refs.len()));
        window.load_more();
        assert_eq!(window.visible_count(), 40);
        assert_eq!(view(&refs, &key, FIELDS, &window).len(), 25);
    }

    #[test]
    fn test_toggle() {
        let mut key = SortKey::default();
        key.toggle("id");
        assert!(key.ascending);
        key.toggle("cost");
        assert_eq!(key, SortKey::new("cost", true));
        assert_eq!(key.indicator("cost"), " ▲");
        assert_eq!(key.indicator("id"), "");
    }
}
