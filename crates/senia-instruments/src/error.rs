use thiserror::Error;

use crate::scoring::ScoreValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ScoreValidationError),

    #[error("unknown item '{item_id}' for instrument '{instrument_id}'")]
    UnknownItem {
        instrument_id: String,
        item_id: String,
    },

    #[error("malformed responses: {0}")]
    MalformedResponses(#[from] serde_json::Error),
}
