use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Defines the valid range for an item group's sub-score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: u8,
    pub max: u8,
}

impl ScoreRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u8) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A scored item group definition within an instrument.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub range: ScoreRange,
    pub description: Option<String>,
}

/// A raw sub-score entry provided for validation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreEntry {
    pub item_id: String,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ScoreValidationError {
    pub item_id: String,
    pub value: u8,
    pub expected_range: ScoreRange,
    pub message: String,
}
