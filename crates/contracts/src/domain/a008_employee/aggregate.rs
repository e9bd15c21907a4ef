use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::mapping::FieldMapping;

/// Staff directory. Identifiers are strings such as "EMP-014".
pub struct Employee;

const DEPARTMENT_VALUES: &[&str] = &[
    "operations",
    "engineering",
    "safety",
    "finance",
    "administration",
    "logistics",
];
const STATUS_VALUES: &[&str] = &["active", "on leave", "terminated"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("Staff ID"),
    FieldSpec::new("fullName", "Name", FieldKind::Text),
    FieldSpec::new("jobTitle", "Role", FieldKind::Text),
    FieldSpec::new("department", "Department", FieldKind::Enum).with_values(DEPARTMENT_VALUES),
    FieldSpec::new("email", "Email", FieldKind::Text),
    FieldSpec::new("phone", "Phone", FieldKind::Text).not_filterable(),
    FieldSpec::new("hireDate", "Hired", FieldKind::DateKey),
    FieldSpec::new("salary", "Salary", FieldKind::CurrencyText),
    FieldSpec::new("status", "Status", FieldKind::Enum).with_values(STATUS_VALUES),
];

const MAPPING: FieldMapping = FieldMapping::new(&[
    ("fullName", "full_name"),
    ("jobTitle", "job_title"),
    ("hireDate", "hire_date"),
]);

impl Resource for Employee {
    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "employees"
    }

    fn list_name() -> &'static str {
        "Employees"
    }

    fn endpoint() -> &'static str {
        "api/employees/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn mapping() -> FieldMapping {
        MAPPING
    }
}
