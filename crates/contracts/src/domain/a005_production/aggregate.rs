use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::mapping::FieldMapping;
use crate::shared::record::{number_value, Record};

/// Tonnes carried by one truck
pub const TONNES_PER_TRUCK: f64 = 30.0;
/// Federal royalty per tonne
pub const FEDERAL_ROYALTY_PER_TONNE: f64 = 150.0;
/// State haulage fee per tonne
pub const STATE_HAULAGE_PER_TONNE: f64 = 180.0;
/// MOU fee as a share of royalty plus haulage
pub const MOU_FEE_RATE: f64 = 0.05;

pub const FIELD_DATE: &str = "Date";
pub const FIELD_SITE: &str = "Site";
pub const FIELD_TRUCKS: &str = "Trucks";
pub const FIELD_QUANTITY: &str = "Quantity";
pub const FIELD_FEDERAL_ROYALTY: &str = "FederalRoyalty";
pub const FIELD_STATE_HAULAGE: &str = "StateHaulage";
pub const FIELD_MOU_FEE: &str = "MouFee";
pub const FIELD_TOTAL: &str = "Total";

/// Financials of a production entry, all derived from the truck count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionFinancials {
    pub quantity: f64,
    pub federal_royalty: f64,
    pub state_haulage: f64,
    pub mou_fee: f64,
    pub total: f64,
}

impl ProductionFinancials {
    pub fn from_trucks(trucks: f64) -> Self {
        let quantity = trucks * TONNES_PER_TRUCK;
        let federal_royalty = quantity * FEDERAL_ROYALTY_PER_TONNE;
        let state_haulage = quantity * STATE_HAULAGE_PER_TONNE;
        let mou_fee = (federal_royalty + state_haulage) * MOU_FEE_RATE;
        Self {
            quantity,
            federal_royalty,
            state_haulage,
            mou_fee,
            total: federal_royalty + state_haulage + mou_fee,
        }
    }
}

/// Daily production entry: trucks dispatched from a site
pub struct Production;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("ID"),
    FieldSpec::new(FIELD_DATE, "Date", FieldKind::DateKey),
    FieldSpec::new(FIELD_SITE, "Site", FieldKind::Text),
    FieldSpec::new(FIELD_TRUCKS, "Trucks", FieldKind::Numeric),
    FieldSpec::new(FIELD_QUANTITY, "Quantity (t)", FieldKind::Numeric).derived(),
    FieldSpec::new(FIELD_FEDERAL_ROYALTY, "Federal Royalty", FieldKind::CurrencyText).derived(),
    FieldSpec::new(FIELD_STATE_HAULAGE, "State Haulage", FieldKind::CurrencyText).derived(),
    FieldSpec::new(FIELD_MOU_FEE, "MOU Fee", FieldKind::CurrencyText).derived(),
    FieldSpec::new(FIELD_TOTAL, "Total", FieldKind::CurrencyText).derived(),
];

const MAPPING: FieldMapping = FieldMapping::new(&[
    (FIELD_DATE, "date"),
    (FIELD_SITE, "site"),
    (FIELD_TRUCKS, "trucks"),
    (FIELD_QUANTITY, "quantity"),
    (FIELD_FEDERAL_ROYALTY, "federal_royalty"),
    (FIELD_STATE_HAULAGE, "state_haulage"),
    (FIELD_MOU_FEE, "mou_fee"),
    (FIELD_TOTAL, "total"),
]);

impl Resource for Production {
    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "production"
    }

    fn list_name() -> &'static str {
        "Production"
    }

    fn endpoint() -> &'static str {
        "api/production/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn mapping() -> FieldMapping {
        MAPPING
    }

    /// Missing or malformed truck counts are treated as zero trucks
    fn derive(record: &mut Record) {
        let trucks = record.number(FIELD_TRUCKS);
        let trucks = if trucks.is_finite() { trucks } else { 0.0 };
        let f = ProductionFinancials::from_trucks(trucks);
        record.set(FIELD_QUANTITY, number_value(f.quantity));
        record.set(FIELD_FEDERAL_ROYALTY, number_value(f.federal_royalty));
        record.set(FIELD_STATE_HAULAGE, number_value(f.state_haulage));
        record.set(FIELD_MOU_FEE, number_value(f.mou_fee));
        record.set(FIELD_TOTAL, number_value(f.total));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_financials_from_trucks() {
        let f = ProductionFinancials::from_trucks(3.0);
        assert_eq!(f.quantity, 90.0);
        assert_eq!(f.federal_royalty, 13_500.0);
        assert_eq!(f.state_haulage, 16_200.0);
        assert!((f.mou_fee - 1_485.0).abs() < 1e-9);
        assert!((f.total - 31_185.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_formula_for_many_counts() {
        for t in 0..200 {
            let t = t as f64 * 0.5;
            let f = ProductionFinancials::from_trucks(t);
            let q = t * 30.0;
            let expected = q * 150.0 + q * 180.0 + (q * 150.0 + q * 180.0) * 0.05;
            assert_eq!(f.quantity, q);
            assert!((f.total - expected).abs() <= 1e-9);
        }
    }

    #[test]
    fn test_derive_writes_every_dependent() {
        let mut record =
            Record::from_json(json!({"id": 1, "Trucks": "4", "Quantity": 0, "Total": 0})).unwrap();
        Production::derive(&mut record);
        assert_eq!(record.get(FIELD_QUANTITY), Some(&json!(120)));
        assert_eq!(record.get(FIELD_FEDERAL_ROYALTY), Some(&json!(18000)));
        assert_eq!(record.get(FIELD_STATE_HAULAGE), Some(&json!(21600)));
        assert!((record.number(FIELD_MOU_FEE) - 1_980.0).abs() < 1e-9);
        assert!((record.number(FIELD_TOTAL) - 41_580.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_record_is_consistent() {
        let record = Production::blank_record();
        assert!(record.get("id").is_none());
        assert_eq!(record.get(FIELD_TRUCKS), Some(&serde_json::Value::Null));
        assert_eq!(record.get(FIELD_TOTAL), Some(&json!(0)));
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Production::mapping().wire_name(FIELD_MOU_FEE), "mou_fee");
        assert_eq!(Production::export_filename(), "production_list.csv");
        assert_eq!(Production::full_name(), "a005_production");
    }
}
