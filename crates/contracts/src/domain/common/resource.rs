use crate::shared::field::{find_field, FieldSpec};
use crate::shared::mapping::FieldMapping;
use crate::shared::record::{Record, ID_FIELD};
use serde_json::Value;

/// Trait for a collection (list view) of the operations board
///
/// One implementation per domain parametrizes the generic record store,
/// filters, REST client and CSV export.
pub trait Resource {
    // ============================================================================
    // Collection metadata (static data)
    // ============================================================================

    /// Index of the collection in the system (e.g. "a005")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "production")
    fn collection_name() -> &'static str;

    /// Title of the list view
    fn list_name() -> &'static str;

    /// REST path relative to the API base (e.g. "api/production/")
    fn endpoint() -> &'static str;

    /// Field descriptions, identifier first
    fn fields() -> &'static [FieldSpec];

    // ============================================================================
    // Methods with default implementations
    // ============================================================================

    /// Internal ⇄ wire field names
    fn mapping() -> FieldMapping {
        FieldMapping::identity()
    }

    /// Recompute derived fields from the record's inputs. Must be pure and
    /// recompute every dependent field on each call.
    fn derive(_record: &mut Record) {}

    /// File name offered for CSV export
    fn export_filename() -> String {
        format!("{}_list.csv", Self::collection_name())
    }

    /// Full name (e.g. "a005_production")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    fn field(name: &str) -> Option<&'static FieldSpec> {
        find_field(Self::fields(), name)
    }

    /// Empty record with every declared field present, derived fields computed
    fn blank_record() -> Record {
        let mut record = Record::new();
        for field in Self::fields() {
            if field.name != ID_FIELD {
                record.set(field.name, Value::Null);
            }
        }
        Self::derive(&mut record);
        record
    }
}
