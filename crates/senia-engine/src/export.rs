use serde::{Deserialize, Serialize};
use ts_rs::TS;

use senia_storage::record::AssessmentRecord;

use crate::error::EngineError;
use crate::state::AssessmentState;

/// Export target formats. Only the data-shaped JSON export is produced
/// here; CSV and PDF rendering belong to external collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExportFormat {
    Json,
    Csv,
    Pdf,
}

/// Render the denormalized assessment record in the requested format.
pub fn export(state: &AssessmentState, format: ExportFormat) -> Result<String, EngineError> {
    match format {
        ExportFormat::Json => {
            let record = AssessmentRecord::flatten(&state.assessment);
            Ok(serde_json::to_string_pretty(&record)?)
        }
        ExportFormat::Csv | ExportFormat::Pdf => Err(EngineError::UnsupportedExport(format)),
    }
}
