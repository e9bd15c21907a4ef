//! Number and date formatting for display
//!
//! Presentation only; filters and CSV work on raw values.

use super::normalize::{date_part, normalize, raw_text};
use contracts::shared::field::{FieldKind, FieldSpec};
use contracts::shared::record::Record;
use serde_json::Value;

pub const CURRENCY_SYMBOL: &str = "₦";

/// Formats a number with a thousands separator (comma) and the given
/// number of decimals
///
/// # Examples
///
/// ```
/// use frontend::shared::format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let formatted = format!("{:.*}", usize::from(decimals.min(6)), value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money with two decimals and the currency symbol, `-₦20.00` for negatives
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let amount = format_number_with_decimals(value.abs(), 2);
    if value < 0.0 {
        format!("-{}{}", CURRENCY_SYMBOL, amount)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, amount)
    }
}

/// Integral values without decimals, others with two
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number_with_decimals(value, 0)
    } else {
        format_number_with_decimals(value, 2)
    }
}

/// `YYYY-MM-DD`, with or without a time part, as `DD.MM.YYYY`; other
/// text is shown as given
pub fn format_date(text: &str) -> String {
    let mut parts = date_part(text).splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) => format!("{}.{}.{}", day, month, year),
        _ => text.to_string(),
    }
}

/// Cell text of a field. Unparseable amounts fall back to the raw text.
pub fn display_value(record: &Record, spec: &FieldSpec) -> String {
    let value = record.get(spec.name);
    if matches!(value, None | Some(Value::Null)) {
        return String::new();
    }
    match spec.kind {
        FieldKind::CurrencyText => {
            let amount = normalize(record, spec).as_number();
            if amount.is_nan() {
                raw_text(value)
            } else {
                format_currency(amount)
            }
        }
        FieldKind::Numeric => {
            let number = normalize(record, spec).as_number();
            if number.is_nan() {
                raw_text(value)
            } else {
                format_number(number)
            }
        }
        FieldKind::DateKey => format_date(&raw_text(value)),
        FieldKind::Identifier | FieldKind::Text | FieldKind::Enum => raw_text(value),
    }
}
