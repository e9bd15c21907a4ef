use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::mapping::FieldMapping;

/// Heavy equipment register
pub struct Equipment;

const TYPE_VALUES: &[&str] = &[
    "excavator",
    "bulldozer",
    "loader",
    "dump truck",
    "grader",
    "crane",
    "compactor",
    "generator",
];
const STATUS_VALUES: &[&str] = &["active", "maintenance", "idle", "retired"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("ID"),
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("equipmentType", "Type", FieldKind::Enum).with_values(TYPE_VALUES),
    FieldSpec::new("serialNumber", "Serial No.", FieldKind::Text),
    FieldSpec::new("location", "Location", FieldKind::Text),
    FieldSpec::new("status", "Status", FieldKind::Enum).with_values(STATUS_VALUES),
    FieldSpec::new("purchaseDate", "Purchased", FieldKind::DateKey),
    FieldSpec::new("purchaseCost", "Cost", FieldKind::CurrencyText),
    FieldSpec::new("operatingHours", "Hours", FieldKind::Numeric),
];

const MAPPING: FieldMapping = FieldMapping::new(&[
    ("equipmentType", "equipment_type"),
    ("serialNumber", "serial_number"),
    ("purchaseDate", "purchase_date"),
    ("purchaseCost", "purchase_cost"),
    ("operatingHours", "operating_hours"),
]);

impl Resource for Equipment {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "equipment"
    }

    fn list_name() -> &'static str {
        "Equipment"
    }

    fn endpoint() -> &'static str {
        "api/equipment/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn mapping() -> FieldMapping {
        MAPPING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record::Record;
    use serde_json::json;

    #[test]
    fn test_wire_round_trip() {
        let wire = Record::from_json(json!({
            "id": 12,
            "name": "CAT 320",
            "equipment_type": "excavator",
            "serial_number": "SN-44",
            "purchase_cost": "₦45,000,000.00"
        }))
        .unwrap();
        let internal = Equipment::mapping().from_wire(&wire);
        assert_eq!(internal.get("serialNumber"), Some(&json!("SN-44")));
        assert_eq!(internal.get("purchaseCost"), Some(&json!("₦45,000,000.00")));
        assert_eq!(Equipment::mapping().to_wire(&internal), wire);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(Equipment::export_filename(), "equipment_list.csv");
    }
}
