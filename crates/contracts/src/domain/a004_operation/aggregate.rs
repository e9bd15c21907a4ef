use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::record::{number_value, Record};

pub const FIELD_INCOME: &str = "income";
pub const FIELD_EXPENDITURE: &str = "expenditure";
pub const FIELD_BALANCE: &str = "balance";

/// `income - expenditure`; a missing side counts as zero
pub fn ledger_balance(income: f64, expenditure: f64) -> f64 {
    let income = if income.is_finite() { income } else { 0.0 };
    let expenditure = if expenditure.is_finite() { expenditure } else { 0.0 };
    income - expenditure
}

/// Operations ledger entry for a site
pub struct Operation;

const CATEGORY_VALUES: &[&str] = &["haulage", "excavation", "maintenance", "fuel", "payroll", "other"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("ID"),
    FieldSpec::new("date", "Date", FieldKind::DateKey),
    FieldSpec::new("site", "Site", FieldKind::Text),
    FieldSpec::new("category", "Category", FieldKind::Enum).with_values(CATEGORY_VALUES),
    FieldSpec::new("description", "Description", FieldKind::Text),
    FieldSpec::new(FIELD_INCOME, "Income", FieldKind::CurrencyText),
    FieldSpec::new(FIELD_EXPENDITURE, "Expenditure", FieldKind::CurrencyText),
    FieldSpec::new(FIELD_BALANCE, "Balance", FieldKind::CurrencyText).derived(),
];

impl Resource for Operation {
    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "operations"
    }

    fn list_name() -> &'static str {
        "Operations"
    }

    fn endpoint() -> &'static str {
        "api/operations/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn derive(record: &mut Record) {
        let balance = ledger_balance(record.number(FIELD_INCOME), record.number(FIELD_EXPENDITURE));
        record.set(FIELD_BALANCE, number_value(balance));
    }
}
