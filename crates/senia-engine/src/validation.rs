use std::collections::BTreeMap;

use senia_core::models::section::{SectionData, SectionKey};
use senia_core::models::validation::ValidationError;

/// The basic-info multi-select with its own required-field message.
pub const CONSULTATION_REASONS_FIELD: &str = "consultationReasons";

/// Required fields per section. Sections not listed here complete on any
/// data and validate clean.
pub fn required_fields(key: SectionKey) -> &'static [&'static str] {
    match key {
        SectionKey::BasicInfo => &["clientId", "assessmentDate", "consultationReasons"],
        SectionKey::FunctionalStatus => &["adlLevel", "iadlLevel"],
        SectionKey::CarePlan => &["carePlanGoals"],
        SectionKey::FinalSummary => &["summaryNotes"],
        _ => &[],
    }
}

/// Whether a field value counts as filled in: arrays must be non-empty,
/// strings non-whitespace; booleans and numbers count with any value,
/// including `false` and `0`.
pub fn field_present(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
        Some(serde_json::Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Check one section's data against its required-field rules.
pub fn validate_section(key: SectionKey, section: &SectionData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for field in required_fields(key) {
        if *field == CONSULTATION_REASONS_FIELD {
            if !field_present(section.data.get(*field)) {
                errors.push(ValidationError::error(
                    *field,
                    "At least one reason for consultation must be selected",
                ));
            }
        } else if !field_present(section.data.get(*field)) {
            errors.push(ValidationError::error(*field, format!("{field} is required")));
        }
    }
    errors
}

/// Validate every section, returning only those with findings.
pub fn validate_all(
    sections: &BTreeMap<SectionKey, SectionData>,
) -> BTreeMap<SectionKey, Vec<ValidationError>> {
    let mut results = BTreeMap::new();
    for key in SectionKey::ALL {
        if let Some(section) = sections.get(&key) {
            let errors = validate_section(key, section);
            if !errors.is_empty() {
                results.insert(key, errors);
            }
        }
    }
    results
}
