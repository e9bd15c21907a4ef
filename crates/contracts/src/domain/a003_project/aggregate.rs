use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::mapping::FieldMapping;

/// Construction projects
pub struct Project;

const STATUS_VALUES: &[&str] = &["planning", "in progress", "on hold", "completed", "cancelled"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("ID"),
    FieldSpec::new("projectName", "Project", FieldKind::Text),
    FieldSpec::new("client", "Client", FieldKind::Text),
    FieldSpec::new("location", "Location", FieldKind::Text),
    FieldSpec::new("startDate", "Start", FieldKind::DateKey),
    FieldSpec::new("endDate", "End", FieldKind::DateKey),
    FieldSpec::new("budget", "Budget", FieldKind::CurrencyText),
    FieldSpec::new("status", "Status", FieldKind::Enum).with_values(STATUS_VALUES),
    FieldSpec::new("manager", "Manager", FieldKind::Text),
];

const MAPPING: FieldMapping = FieldMapping::new(&[
    ("projectName", "project_name"),
    ("startDate", "start_date"),
    ("endDate", "end_date"),
]);

impl Resource for Project {
    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "projects"
    }

    fn list_name() -> &'static str {
        "Projects"
    }

    fn endpoint() -> &'static str {
        "api/projects/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn mapping() -> FieldMapping {
        MAPPING
    }
}
