//! Plain-text table output

use contracts::shared::field::{FieldKind, FieldSpec};
use contracts::shared::record::Record;
use frontend::shared::format::{display_value, format_currency, format_number};
use frontend::shared::list_controller::ColumnTotal;
use frontend::shared::list_view::SortKey;
use std::io::{self, Write};

const MAX_CELL_WIDTH: usize = 28;

pub struct Table<'a> {
    pub title: &'a str,
    pub fields: &'static [FieldSpec],
    pub rows: &'a [&'a Record],
    pub sort: &'a SortKey,
    pub filtered: usize,
    pub totals: &'a [ColumnTotal],
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let len = text.chars().count();
    let fill = " ".repeat(width.saturating_sub(len));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

impl Table<'_> {
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let header: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{}{}", f.label, self.sort.indicator(f.name)))
            .collect();
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| self.fields.iter().map(|f| truncate(&display_value(r, f))).collect())
            .collect();
        let totals: Vec<String> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| match self.totals.iter().find(|t| t.field == f.name) {
                Some(t) if f.kind == FieldKind::CurrencyText => format_currency(t.sum),
                Some(t) => format_number(t.sum),
                None if i == 0 => "Total".to_string(),
                None => String::new(),
            })
            .collect();

        let widths: Vec<usize> = (0..self.fields.len())
            .map(|i| {
                body.iter()
                    .map(|row| row[i].chars().count())
                    .chain([header[i].chars().count(), totals[i].chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| pad(c, widths[i], self.fields[i].kind.is_summable()))
                .collect::<Vec<_>>()
                .join("  ")
        };

        writeln!(out, "{}", self.title)?;
        writeln!(out, "{}", line(&header[..]))?;
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(out, "{}", "-".repeat(rule))?;
        for row in &body {
            writeln!(out, "{}", line(row.as_slice()))?;
        }
        if !self.totals.is_empty() && !self.rows.is_empty() {
            writeln!(out, "{}", "-".repeat(rule))?;
            writeln!(out, "{}", line(&totals[..]))?;
        }
        writeln!(out, "Showing {} of {}", self.rows.len(), self.filtered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::id("ID"),
        FieldSpec::new("name", "Name", FieldKind::Text),
        FieldSpec::new("cost", "Cost", FieldKind::CurrencyText),
    ];

    #[test]
    fn test_table_output() {
        let data = vec![
            Record::from_json(json!({"id": 2, "name": "Pump", "cost": 1500})).unwrap(),
            Record::from_json(json!({"id": 1, "name": "Drill", "cost": "₦250.5"})).unwrap(),
        ];
        let rows: Vec<&Record> = data.iter().collect();
        let totals = vec![ColumnTotal { field: "cost", sum: 1750.5 }];
        let table = Table {
            title: "Equipment",
            fields: FIELDS,
            rows: &rows,
            sort: &SortKey::default(),
            filtered: 7,
            totals: &totals,
        };

        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Equipment");
        assert!(lines[1].starts_with("ID ▼"));
        assert!(lines[3].contains("Pump"));
        assert!(lines[3].ends_with("₦1,500.00"));
        assert!(lines[4].ends_with("  ₦250.50"));
        assert!(lines[6].starts_with("Total"));
        assert!(lines[6].ends_with("₦1,750.50"));
        assert_eq!(lines[7], "Showing 2 of 7");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(40);
        assert_eq!(truncate(&long).chars().count(), MAX_CELL_WIDTH);
    }
}
