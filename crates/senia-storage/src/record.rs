use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use senia_core::models::assessment::{AssessmentData, AssessmentStatus};
use senia_core::models::section::{SectionData, SectionKey};

/// The denormalized record shape at the remote boundary: one flat
/// field-name → value mapping per assessment. Section boundaries collapse
/// on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub fields: serde_json::Map<String, serde_json::Value>,
    pub client_id: String,
    pub created_by: String,
    pub status: AssessmentStatus,
}

impl AssessmentRecord {
    /// Flatten every section's field map into one record.
    ///
    /// Sections are walked in navigation order; on a key collision the
    /// later section wins. Collisions are unexpected since field names are
    /// namespaced per section.
    pub fn flatten(assessment: &AssessmentData) -> Self {
        let mut fields = serde_json::Map::new();
        for key in SectionKey::ALL {
            if let Some(section) = assessment.sections.get(&key) {
                for (name, value) in &section.data {
                    fields.insert(name.clone(), value.clone());
                }
            }
        }

        Self {
            fields,
            client_id: assessment.client_id.clone(),
            created_by: assessment.created_by.clone(),
            status: assessment.status,
        }
    }

    /// Rebuild a full aggregate from this flat record.
    ///
    /// Every field is routed back to its owning section through the
    /// section field manifest — all sections rehydrate, not just the one
    /// being viewed. Fields no manifest claims are kept on basic-info so
    /// they survive the next flatten instead of being dropped.
    pub fn hydrate(&self, id: Uuid, now: jiff::Timestamp) -> AssessmentData {
        let mut sections: BTreeMap<SectionKey, SectionData> = SectionKey::ALL
            .into_iter()
            .map(|key| (key, SectionData::empty(now)))
            .collect();

        for (name, value) in &self.fields {
            let owner = SectionKey::owner_of(name).unwrap_or_else(|| {
                tracing::warn!(
                    field = %name,
                    "field not in any section manifest; keeping on basic-info"
                );
                SectionKey::BasicInfo
            });
            if let Some(section) = sections.get_mut(&owner) {
                section.data.insert(name.clone(), value.clone());
            }
        }

        let mut assessment = AssessmentData::new(self.created_by.clone(), now);
        assessment.id = Some(id);
        assessment.sections = sections;
        assessment.status = self.status;
        assessment.client_id = self.client_id.clone();
        assessment
    }
}
