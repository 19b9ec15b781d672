use serde_json::json;

use senia_core::models::section::{SectionData, SectionKey};
use senia_engine::completion::{basic_progress, overall_completion, section_completion};

fn now() -> jiff::Timestamp {
    "2026-03-01T09:00:00Z".parse().expect("valid timestamp")
}

fn section_with(fields: &[(&str, serde_json::Value)]) -> SectionData {
    let mut section = SectionData::empty(now());
    for (name, value) in fields {
        section.data.insert((*name).to_string(), value.clone());
    }
    section
}

#[test]
fn sections_without_required_fields_are_all_or_nothing() {
    let empty = SectionData::empty(now());
    assert_eq!(section_completion(SectionKey::Hobbies, &empty), 0);

    let touched = section_with(&[("currentActivities", json!(["gardening"]))]);
    assert_eq!(section_completion(SectionKey::Hobbies, &touched), 100);
}

#[test]
fn completion_is_the_rounded_share_of_required_fields() {
    // basic-info requires clientId, assessmentDate, consultationReasons.
    let one_of_three = section_with(&[("clientId", json!("client-1"))]);
    assert_eq!(section_completion(SectionKey::BasicInfo, &one_of_three), 33);

    let two_of_three = section_with(&[
        ("clientId", json!("client-1")),
        ("assessmentDate", json!("2026-03-01")),
    ]);
    assert_eq!(section_completion(SectionKey::BasicInfo, &two_of_three), 67);
}

#[test]
fn completion_is_100_iff_every_required_field_is_done() {
    let complete = section_with(&[
        ("clientId", json!("client-1")),
        ("assessmentDate", json!("2026-03-01")),
        ("consultationReasons", json!(["memory loss"])),
    ]);
    assert_eq!(section_completion(SectionKey::BasicInfo, &complete), 100);

    // An empty array is not done.
    let empty_reasons = section_with(&[
        ("clientId", json!("client-1")),
        ("assessmentDate", json!("2026-03-01")),
        ("consultationReasons", json!([])),
    ]);
    assert_eq!(section_completion(SectionKey::BasicInfo, &empty_reasons), 67);
}

#[test]
fn completion_is_monotone_as_fields_fill() {
    let mut section = SectionData::empty(now());
    let mut last = section_completion(SectionKey::BasicInfo, &section);

    for (field, value) in [
        ("clientId", json!("client-1")),
        ("assessmentDate", json!("2026-03-01")),
        ("consultationReasons", json!(["fall risk"])),
    ] {
        section.data.insert(field.to_string(), value);
        let next = section_completion(SectionKey::BasicInfo, &section);
        assert!(next >= last, "completion went {last} -> {next}");
        last = next;
    }
    assert_eq!(last, 100);
}

#[test]
fn false_and_zero_count_as_filled_in() {
    // functional-status requires adlLevel and iadlLevel.
    let section = section_with(&[("adlLevel", json!(false)), ("iadlLevel", json!(0))]);
    assert_eq!(section_completion(SectionKey::FunctionalStatus, &section), 100);
}

#[test]
fn whitespace_strings_do_not_count() {
    let section = section_with(&[("adlLevel", json!("   ")), ("iadlLevel", json!("assisted"))]);
    assert_eq!(section_completion(SectionKey::FunctionalStatus, &section), 50);
}

#[test]
fn overall_completion_is_a_uniform_average() {
    let t0 = now();
    let mut assessment = senia_core::models::assessment::AssessmentData::new("assessor-1", t0);

    // Fill three no-required-field sections completely; the rest stay at 0.
    for key in [SectionKey::Hobbies, SectionKey::Providers, SectionKey::Services] {
        let section = assessment.sections.get_mut(&key).expect("section");
        section.data.insert("anything".to_string(), json!("x"));
    }

    // 3 × 100 over 15 sections = 20.
    assert_eq!(overall_completion(&assessment.sections), 20);
}

#[test]
fn basic_progress_counts_exactly_four_checks() {
    let empty = SectionData::empty(now());
    assert_eq!(basic_progress(&empty), 0);

    let half = section_with(&[
        ("clientId", json!("client-1")),
        ("assessmentDate", json!("2026-03-01")),
    ]);
    assert_eq!(basic_progress(&half), 50);

    let full = section_with(&[
        ("clientId", json!("client-1")),
        ("assessmentDate", json!("2026-03-01")),
        ("completionDate", json!("2026-03-08")),
        ("consultationReasons", json!(["memory loss", "fall risk"])),
    ]);
    assert_eq!(basic_progress(&full), 100);
}

#[test]
fn basic_progress_is_stricter_than_generic_completion() {
    // completionDate is not required by the generic calculator, so the two
    // indicators legitimately disagree.
    let section = section_with(&[
        ("clientId", json!("client-1")),
        ("assessmentDate", json!("2026-03-01")),
        ("consultationReasons", json!(["memory loss"])),
    ]);
    assert_eq!(section_completion(SectionKey::BasicInfo, &section), 100);
    assert_eq!(basic_progress(&section), 75);
}
