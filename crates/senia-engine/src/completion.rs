use std::collections::BTreeMap;

use senia_core::models::section::{SectionData, SectionKey};

use crate::validation::{field_present, required_fields, CONSULTATION_REASONS_FIELD};

/// Per-section completion, 0–100.
///
/// Sections without required fields are all-or-nothing: 100 as soon as any
/// data exists. Otherwise completion is the rounded share of required
/// fields that are filled in.
pub fn section_completion(key: SectionKey, section: &SectionData) -> u8 {
    let required = required_fields(key);
    if required.is_empty() {
        return if section.data.is_empty() { 0 } else { 100 };
    }

    let done = required
        .iter()
        .filter(|field| field_present(section.data.get(**field)))
        .count();
    percentage(done, required.len())
}

/// Overall completion: the uniform average of per-section completion.
/// Deliberately not field-weighted — a two-field section counts as much as
/// a twenty-field one.
pub fn overall_completion(sections: &BTreeMap<SectionKey, SectionData>) -> u8 {
    if sections.is_empty() {
        return 0;
    }
    let sum: u32 = sections
        .iter()
        .map(|(key, section)| section_completion(*key, section) as u32)
        .sum();
    (sum as f64 / sections.len() as f64).round() as u8
}

/// The stricter basic-info progress indicator: exactly four named checks
/// (client selected, assessment date, completion date, at least one
/// consultation reason). Intentionally distinct from the generic
/// calculator; do not merge the two.
pub fn basic_progress(section: &SectionData) -> u8 {
    let checks = [
        field_present(section.data.get("clientId")),
        field_present(section.data.get("assessmentDate")),
        field_present(section.data.get("completionDate")),
        field_present(section.data.get(CONSULTATION_REASONS_FIELD)),
    ];
    let done = checks.iter().filter(|c| **c).count();
    percentage(done, checks.len())
}

fn percentage(done: usize, total: usize) -> u8 {
    (100.0 * done as f64 / total as f64).round() as u8
}
