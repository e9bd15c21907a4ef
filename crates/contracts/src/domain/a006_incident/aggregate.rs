use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::mapping::FieldMapping;

/// Safety incident reports
pub struct Incident;

const TYPE_VALUES: &[&str] = &["injury", "near miss", "property damage", "environmental", "fire"];
pub const SEVERITY_VALUES: &[&str] = &["low", "medium", "high", "critical"];
const STATUS_VALUES: &[&str] = &["open", "investigating", "resolved", "closed"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("ID"),
    FieldSpec::new("incidentDate", "Date", FieldKind::DateKey),
    FieldSpec::new("location", "Location", FieldKind::Text),
    FieldSpec::new("incidentType", "Type", FieldKind::Enum).with_values(TYPE_VALUES),
    FieldSpec::new("severity", "Severity", FieldKind::Enum).with_values(SEVERITY_VALUES),
    FieldSpec::new("reportedBy", "Reported By", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::Text),
    FieldSpec::new("status", "Status", FieldKind::Enum).with_values(STATUS_VALUES),
];

const MAPPING: FieldMapping = FieldMapping::new(&[
    ("incidentDate", "incident_date"),
    ("incidentType", "incident_type"),
    ("reportedBy", "reported_by"),
]);

impl Resource for Incident {
    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "incidents"
    }

    fn list_name() -> &'static str {
        "Safety Incidents"
    }

    fn endpoint() -> &'static str {
        "api/incidents/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn mapping() -> FieldMapping {
        MAPPING
    }
}
