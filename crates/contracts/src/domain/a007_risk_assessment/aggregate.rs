use crate::domain::a006_incident::SEVERITY_VALUES;
use crate::domain::common::Resource;
use crate::shared::field::{FieldKind, FieldSpec};
use crate::shared::mapping::FieldMapping;

/// Site hazard risk assessments
pub struct RiskAssessment;

const LIKELIHOOD_VALUES: &[&str] = &["rare", "unlikely", "possible", "likely", "almost certain"];
const RISK_LEVEL_VALUES: &[&str] = &["low", "medium", "high", "extreme"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::id("ID"),
    FieldSpec::new("hazard", "Hazard", FieldKind::Text),
    FieldSpec::new("location", "Location", FieldKind::Text),
    FieldSpec::new("likelihood", "Likelihood", FieldKind::Enum).with_values(LIKELIHOOD_VALUES),
    FieldSpec::new("severity", "Severity", FieldKind::Enum).with_values(SEVERITY_VALUES),
    FieldSpec::new("riskLevel", "Risk", FieldKind::Enum).with_values(RISK_LEVEL_VALUES),
    FieldSpec::new("controlMeasures", "Controls", FieldKind::Text),
    FieldSpec::new("assessmentDate", "Assessed", FieldKind::DateKey),
    FieldSpec::new("reviewDate", "Review", FieldKind::DateKey),
    FieldSpec::new("assessor", "Assessor", FieldKind::Text),
];

const MAPPING: FieldMapping = FieldMapping::new(&[
    ("riskLevel", "risk_level"),
    ("controlMeasures", "control_measures"),
    ("assessmentDate", "assessment_date"),
    ("reviewDate", "review_date"),
]);

impl Resource for RiskAssessment {
    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "risk_assessments"
    }

    fn list_name() -> &'static str {
        "Risk Assessments"
    }

    fn endpoint() -> &'static str {
        "api/risk-assessments/"
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn mapping() -> FieldMapping {
        MAPPING
    }
}
