//! senia-instruments
//!
//! Clinical screening instrument definitions and scoring. Pure data and
//! pure functions — no I/O. Defines the item structure, point allocations,
//! and interpretation bands for each supported instrument.

pub mod cognitive;
pub mod depression;
pub mod error;
pub mod scoring;

use scoring::{ItemDef, ScoreEntry, ScoreValidationError};

/// Trait implemented by each clinical screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g. "cognitive_exam").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// The scored item groups of this instrument.
    fn items(&self) -> &[ItemDef];

    /// The instrument's scale maximum.
    fn max_score(&self) -> u8;

    /// Validate a set of raw sub-score entries against this instrument's
    /// item ranges.
    fn validate_scores(&self, scores: &[ScoreEntry]) -> Vec<ScoreValidationError> {
        let mut errors = Vec::new();
        for entry in scores {
            if let Some(item) = self.items().iter().find(|i| i.id == entry.item_id)
                && !item.range.contains(entry.value)
            {
                errors.push(ScoreValidationError {
                    item_id: entry.item_id.clone(),
                    value: entry.value,
                    expected_range: item.range,
                    message: format!(
                        "{}: {} score {} is outside range [{}, {}]",
                        self.name(),
                        item.name,
                        entry.value,
                        item.range.min,
                        item.range.max,
                    ),
                });
            }
        }
        errors
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(cognitive::CognitiveExam),
        Box::new(depression::DepressionScale),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
