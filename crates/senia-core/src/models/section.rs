use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::validation::ValidationError;

/// The fixed set of assessment sections, in form navigation order.
///
/// `Ord` follows declaration order, so a `BTreeMap` keyed by `SectionKey`
/// iterates in navigation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SectionKey {
    BasicInfo,
    MedicalHistory,
    HealthSymptoms,
    FunctionalStatus,
    CognitiveScreening,
    CognitiveExam,
    DepressionScreening,
    HomeSafety,
    AdvanceDirectives,
    Psychosocial,
    Hobbies,
    Providers,
    CarePlan,
    Services,
    FinalSummary,
}

impl SectionKey {
    /// All sections in navigation order.
    pub const ALL: [SectionKey; 15] = [
        SectionKey::BasicInfo,
        SectionKey::MedicalHistory,
        SectionKey::HealthSymptoms,
        SectionKey::FunctionalStatus,
        SectionKey::CognitiveScreening,
        SectionKey::CognitiveExam,
        SectionKey::DepressionScreening,
        SectionKey::HomeSafety,
        SectionKey::AdvanceDirectives,
        SectionKey::Psychosocial,
        SectionKey::Hobbies,
        SectionKey::Providers,
        SectionKey::CarePlan,
        SectionKey::Services,
        SectionKey::FinalSummary,
    ];

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::BasicInfo => "Basic Information",
            SectionKey::MedicalHistory => "Medical History",
            SectionKey::HealthSymptoms => "Health Symptoms",
            SectionKey::FunctionalStatus => "Functional Status",
            SectionKey::CognitiveScreening => "Cognitive Screening",
            SectionKey::CognitiveExam => "Cognitive Exam",
            SectionKey::DepressionScreening => "Depression Screening",
            SectionKey::HomeSafety => "Home Safety",
            SectionKey::AdvanceDirectives => "Advance Directives",
            SectionKey::Psychosocial => "Psychosocial",
            SectionKey::Hobbies => "Hobbies & Interests",
            SectionKey::Providers => "Care Providers",
            SectionKey::CarePlan => "Care Plan",
            SectionKey::Services => "Services",
            SectionKey::FinalSummary => "Final Summary",
        }
    }

    /// The fixed form fields this section owns on the wire.
    ///
    /// Field names are unique across sections; the flat persisted record is
    /// routed back into sections through this manifest on load.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            SectionKey::BasicInfo => &[
                "clientId",
                "clientName",
                "assessmentDate",
                "completionDate",
                "consultationReasons",
                "referralSource",
                "assessorNotes",
            ],
            SectionKey::MedicalHistory => &[
                "diagnoses",
                "surgicalHistory",
                "hospitalizations",
                "medications",
                "allergies",
            ],
            SectionKey::HealthSymptoms => &[
                "symptomList",
                "painLevel",
                "sleepQuality",
                "appetiteChanges",
            ],
            SectionKey::FunctionalStatus => &[
                "adlLevel",
                "iadlLevel",
                "mobilityAids",
                "fallHistory",
            ],
            SectionKey::CognitiveScreening => &[
                "memoryComplaints",
                "orientationConcerns",
                "screeningNotes",
            ],
            SectionKey::CognitiveExam => &[
                "cognitiveResponses",
                "educationLevel",
                "examObservations",
            ],
            SectionKey::DepressionScreening => &["depressionResponses", "moodNotes"],
            SectionKey::HomeSafety => &[
                "hazardsIdentified",
                "safetyEquipment",
                "emergencyPlan",
            ],
            SectionKey::AdvanceDirectives => &[
                "hasLivingWill",
                "powerOfAttorney",
                "directivesNotes",
            ],
            SectionKey::Psychosocial => &[
                "livingSituation",
                "socialSupport",
                "caregiverStress",
            ],
            SectionKey::Hobbies => &[
                "currentActivities",
                "pastInterests",
                "activityBarriers",
            ],
            SectionKey::Providers => &["primaryPhysician", "specialists", "pharmacyName"],
            SectionKey::CarePlan => &["carePlanGoals", "interventions", "reviewDate"],
            SectionKey::Services => &[
                "currentServices",
                "recommendedServices",
                "serviceGaps",
            ],
            SectionKey::FinalSummary => &["summaryNotes", "recommendations", "followUpDate"],
        }
    }

    /// The section owning a wire field name, if any.
    pub fn owner_of(field: &str) -> Option<SectionKey> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.fields().contains(&field))
    }

    /// The next section in navigation order, if any.
    pub fn next(&self) -> Option<SectionKey> {
        let idx = SectionKey::ALL.iter().position(|k| k == self)?;
        SectionKey::ALL.get(idx + 1).copied()
    }

    /// The previous section in navigation order, if any.
    pub fn prev(&self) -> Option<SectionKey> {
        let idx = SectionKey::ALL.iter().position(|k| k == self)?;
        idx.checked_sub(1).and_then(|i| SectionKey::ALL.get(i)).copied()
    }
}

/// One section's content and completion state.
///
/// Owned by the assessment aggregate and mutated only through the reducer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionData {
    pub is_complete: bool,
    pub is_valid: bool,
    pub last_updated: jiff::Timestamp,
    /// Field name → opaque value.
    pub data: serde_json::Map<String, serde_json::Value>,
    /// Recomputed on demand; never persisted to the remote store.
    pub validation_errors: Vec<ValidationError>,
    pub completion_percentage: u8,
}

impl SectionData {
    pub fn empty(now: jiff::Timestamp) -> Self {
        Self {
            is_complete: false,
            is_valid: true,
            last_updated: now,
            data: serde_json::Map::new(),
            validation_errors: Vec::new(),
            completion_percentage: 0,
        }
    }
}
