use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::mapping::FieldMapping;

/// Stock of materials, tools and spare parts
pub struct InventoryItem;

const CATEGORY_VALUES: &[&str] = &["materials", "tools", "spare parts", "consumables", "safety gear"];
const STATUS_VALUES: &[&str] = &["in stock", "low stock", "out of stock"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("ID"),
    FieldSpec::new("itemName", "Item", FieldKind::Text),
    FieldSpec::new("category", "Category", FieldKind::Enum).with_values(CATEGORY_VALUES),
    FieldSpec::new("quantity", "Qty", FieldKind::Numeric),
    FieldSpec::new("unit", "Unit", FieldKind::Text).not_filterable(),
    FieldSpec::new("unitCost", "Unit Cost", FieldKind::CurrencyText),
    FieldSpec::new("supplier", "Supplier", FieldKind::Text),
    FieldSpec::new("lastRestocked", "Restocked", FieldKind::DateKey),
    FieldSpec::new("status", "Status", FieldKind::Enum).with_values(STATUS_VALUES),
];

const MAPPING: FieldMapping = FieldMapping::new(&[
    ("itemName", "item_name"),
    ("unitCost", "unit_cost"),
    ("lastRestocked", "last_restocked"),
]);

impl Resource for InventoryItem {
    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "inventory"
    }

    fn list_name() -> &'static str {
        "Inventory"
    }

    fn endpoint() -> &'static str {
        "api/inventory/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn mapping() -> FieldMapping {
        MAPPING
    }
}
