use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{ItemDef, ScoreRange};
use crate::Instrument;

/// Number of items on the depression scale.
pub const ITEM_COUNT: usize = 15;

/// The answer indicative of depression for each item, in order. The
/// polarity is item-specific: for items 1, 5, 7, 11 and 13 a "no" is
/// indicative; for the rest a "yes" is.
pub const INDICATIVE: [bool; ITEM_COUNT] = [
    false, // 1. Are you basically satisfied with your life?
    true,  // 2. Have you dropped many of your activities and interests?
    true,  // 3. Do you feel that your life is empty?
    true,  // 4. Do you often get bored?
    false, // 5. Are you in good spirits most of the time?
    true,  // 6. Are you afraid that something bad is going to happen to you?
    false, // 7. Do you feel happy most of the time?
    true,  // 8. Do you often feel helpless?
    true,  // 9. Do you prefer to stay at home rather than going out?
    true,  // 10. Do you feel you have more problems with memory than most?
    false, // 11. Do you think it is wonderful to be alive now?
    true,  // 12. Do you feel pretty worthless the way you are now?
    false, // 13. Do you feel full of energy?
    true,  // 14. Do you feel that your situation is hopeless?
    true,  // 15. Do you think that most people are better off than you are?
];

const ITEM_TEXTS: [&str; ITEM_COUNT] = [
    "Are you basically satisfied with your life?",
    "Have you dropped many of your activities and interests?",
    "Do you feel that your life is empty?",
    "Do you often get bored?",
    "Are you in good spirits most of the time?",
    "Are you afraid that something bad is going to happen to you?",
    "Do you feel happy most of the time?",
    "Do you often feel helpless?",
    "Do you prefer to stay at home rather than going out and doing new things?",
    "Do you feel you have more problems with memory than most?",
    "Do you think it is wonderful to be alive now?",
    "Do you feel pretty worthless the way you are now?",
    "Do you feel full of energy?",
    "Do you feel that your situation is hopeless?",
    "Do you think that most people are better off than you are?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DepressionInterpretation {
    Normal,
    MildDepressionSuggested,
    ModerateToSevereSuggested,
}

/// Yes/no answers to the 15 items, in order. `None` marks an unanswered
/// item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DepressionResponses {
    pub answers: [Option<bool>; ITEM_COUNT],
}

impl DepressionResponses {
    /// Total score: the count of answered items matching their indicative
    /// polarity. Unanswered items contribute nothing, but the score is
    /// still read against the full 15-point scale — check [`answered`]
    /// before treating a low total as reassuring.
    ///
    /// [`answered`]: DepressionResponses::answered
    pub fn total(&self) -> u8 {
        self.answers
            .iter()
            .zip(INDICATIVE)
            .filter(|(answer, indicative)| **answer == Some(*indicative))
            .count() as u8
    }

    /// How many of the 15 items were answered at all.
    pub fn answered(&self) -> u8 {
        self.answers.iter().filter(|a| a.is_some()).count() as u8
    }
}

/// Band a total: 0–5 normal, 6–9 mild depression suggested, 10–15
/// moderate-to-severe suggested.
pub fn interpret(total: u8) -> DepressionInterpretation {
    match total {
        0..=5 => DepressionInterpretation::Normal,
        6..=9 => DepressionInterpretation::MildDepressionSuggested,
        _ => DepressionInterpretation::ModerateToSevereSuggested,
    }
}

/// A complete scored administration, as exposed to the presentation layer.
///
/// `answered` travels with the total so an incomplete administration's
/// misleadingly low score is observable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DepressionResult {
    pub total: u8,
    pub answered: u8,
    pub interpretation: DepressionInterpretation,
}

impl DepressionResult {
    pub fn score(responses: &DepressionResponses) -> Self {
        let total = responses.total();
        Self {
            total,
            answered: responses.answered(),
            interpretation: interpret(total),
        }
    }
}

/// The geriatric depression scale: 15 yes/no items, one point per
/// polarity-matching answer.
pub struct DepressionScale;

impl Instrument for DepressionScale {
    fn id(&self) -> &str {
        "depression_scale"
    }

    fn name(&self) -> &str {
        "Depression Scale"
    }

    fn max_score(&self) -> u8 {
        ITEM_COUNT as u8
    }

    fn items(&self) -> &[ItemDef] {
        static ITEMS: std::sync::LazyLock<Vec<ItemDef>> = std::sync::LazyLock::new(|| {
            ITEM_TEXTS
                .iter()
                .enumerate()
                .map(|(i, text)| ItemDef {
                    id: format!("item_{:02}", i + 1),
                    name: text.to_string(),
                    range: ScoreRange::new(0, 1),
                    description: Some(
                        if INDICATIVE[i] { "Indicative answer: yes" } else { "Indicative answer: no" }
                            .to_string(),
                    ),
                })
                .collect()
        });
        &ITEMS
    }
}
