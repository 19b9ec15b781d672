use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{ItemDef, ScoreRange};
use crate::Instrument;

/// The cognitive exam's 30-point scale maximum.
pub const MAX_SCORE: u8 = 30;

/// Education level recorded alongside the exam. The interpretation cut
/// tables are education-adjusted; with no recorded level the result is
/// always `Undetermined`, never guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EducationLevel {
    HighSchoolGraduate,
    LessThanHighSchool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CognitiveInterpretation {
    Normal,
    MildImpairment,
    Dementia,
    Undetermined,
}

/// Raw answers recorded while administering the exam.
///
/// Every field is optional: an unanswered group simply scores zero. The
/// five-word registration step (Q4) is administered but carries no points;
/// it seeds the delayed-recall group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CognitiveResponses {
    /// Q1: names the day of the week.
    pub day_correct: Option<bool>,
    /// Q2: names the year.
    pub year_correct: Option<bool>,
    /// Q3: names the state.
    pub state_correct: Option<bool>,
    /// Q4: five-word registration list, unscored.
    pub registration_words: Option<Vec<String>>,
    /// Q5: first arithmetic sub-answer (amount spent), 1 point.
    pub spent_correct: Option<bool>,
    /// Q5: second arithmetic sub-answer (amount left), 2 points.
    pub remainder_correct: Option<bool>,
    /// Q6: animals named in one minute.
    pub animals_named: Option<u8>,
    /// Q7: registration words recalled after delay, 0–5.
    pub words_recalled: Option<u8>,
    /// Q8: first backward digit sequence correct.
    pub span_first_correct: Option<bool>,
    /// Q8: second backward digit sequence correct.
    pub span_second_correct: Option<bool>,
    /// Q9: clock drawing rating, 0–4.
    pub clock_score: Option<u8>,
    /// Q10: visuospatial sub-tasks correct, 0–2.
    pub figures_correct: Option<u8>,
    /// Q11: story recall — female's name.
    pub story_name: Option<bool>,
    /// Q11: story recall — her occupation.
    pub story_occupation: Option<bool>,
    /// Q11: story recall — when she returned to work.
    pub story_return: Option<bool>,
    /// Q11: story recall — the state she lived in.
    pub story_state: Option<bool>,
}

/// Per-group sub-scores, derived live from the raw responses.
///
/// These are the source of truth for the total; a cached total is never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CognitiveSubScores {
    pub orientation_day: u8,
    pub orientation_year: u8,
    pub orientation_state: u8,
    pub arithmetic: u8,
    pub fluency: u8,
    pub delayed_recall: u8,
    pub digit_span: u8,
    pub clock_drawing: u8,
    pub visuospatial: u8,
    pub story_recall: u8,
}

impl CognitiveSubScores {
    pub fn sum(&self) -> u8 {
        self.orientation_day
            + self.orientation_year
            + self.orientation_state
            + self.arithmetic
            + self.fluency
            + self.delayed_recall
            + self.digit_span
            + self.clock_drawing
            + self.visuospatial
            + self.story_recall
    }
}

impl CognitiveResponses {
    /// Score every item group from the raw answers.
    pub fn sub_scores(&self) -> CognitiveSubScores {
        CognitiveSubScores {
            orientation_day: binary(self.day_correct, 1),
            orientation_year: binary(self.year_correct, 1),
            orientation_state: binary(self.state_correct, 1),
            arithmetic: binary(self.spent_correct, 1) + binary(self.remainder_correct, 2),
            fluency: fluency_band(self.animals_named),
            delayed_recall: self.words_recalled.unwrap_or(0).min(5),
            digit_span: span_band(self.span_first_correct, self.span_second_correct),
            clock_drawing: self.clock_score.unwrap_or(0).min(4),
            visuospatial: self.figures_correct.unwrap_or(0).min(2),
            story_recall: binary(self.story_name, 2)
                + binary(self.story_occupation, 2)
                + binary(self.story_return, 2)
                + binary(self.story_state, 2),
        }
    }

    /// Total score: the live sum of sub-scores, capped at the 30-point
    /// scale maximum.
    pub fn total(&self) -> u8 {
        self.sub_scores().sum().min(MAX_SCORE)
    }

    /// Interpret this administration against the education-adjusted cut
    /// tables.
    pub fn interpret(&self, education: Option<EducationLevel>) -> CognitiveInterpretation {
        interpret(self.total(), education)
    }
}

fn binary(answer: Option<bool>, points: u8) -> u8 {
    if answer == Some(true) { points } else { 0 }
}

/// Fluency band by count named: 0–4 → 0, 5–9 → 1, 10–14 → 2, 15+ → 3.
fn fluency_band(count: Option<u8>) -> u8 {
    match count.unwrap_or(0) {
        0..=4 => 0,
        5..=9 => 1,
        10..=14 => 2,
        _ => 3,
    }
}

/// Backward digit span band: 0 both incorrect, 1 only first correct,
/// 3 both correct. A score of 2 is unreachable by design.
fn span_band(first: Option<bool>, second: Option<bool>) -> u8 {
    match (first == Some(true), second == Some(true)) {
        (true, true) => 3,
        (true, false) => 1,
        _ => 0,
    }
}

/// Interpretation as a pure function of (total, education level).
pub fn interpret(total: u8, education: Option<EducationLevel>) -> CognitiveInterpretation {
    match education {
        None => CognitiveInterpretation::Undetermined,
        Some(EducationLevel::HighSchoolGraduate) => match total {
            27..=30 => CognitiveInterpretation::Normal,
            21..=26 => CognitiveInterpretation::MildImpairment,
            _ => CognitiveInterpretation::Dementia,
        },
        Some(EducationLevel::LessThanHighSchool) => match total {
            25..=30 => CognitiveInterpretation::Normal,
            20..=24 => CognitiveInterpretation::MildImpairment,
            _ => CognitiveInterpretation::Dementia,
        },
    }
}

/// A complete scored administration, as exposed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CognitiveResult {
    pub sub_scores: CognitiveSubScores,
    pub total: u8,
    pub education: Option<EducationLevel>,
    pub interpretation: CognitiveInterpretation,
}

impl CognitiveResult {
    pub fn score(responses: &CognitiveResponses, education: Option<EducationLevel>) -> Self {
        let sub_scores = responses.sub_scores();
        let total = sub_scores.sum().min(MAX_SCORE);
        Self {
            sub_scores,
            total,
            education,
            interpretation: interpret(total, education),
        }
    }
}

/// The cognitive exam: 11 item groups on a 30-point scale.
pub struct CognitiveExam;

impl Instrument for CognitiveExam {
    fn id(&self) -> &str {
        "cognitive_exam"
    }

    fn name(&self) -> &str {
        "Cognitive Exam"
    }

    fn max_score(&self) -> u8 {
        MAX_SCORE
    }

    fn items(&self) -> &[ItemDef] {
        static ITEMS: std::sync::LazyLock<Vec<ItemDef>> = std::sync::LazyLock::new(|| {
            let items: [(&str, &str, u8, Option<&str>); 11] = [
                ("orientation_day", "Orientation: Day of Week", 1, None),
                ("orientation_year", "Orientation: Year", 1, None),
                ("orientation_state", "Orientation: State", 1, None),
                (
                    "registration",
                    "Five-Word Registration",
                    0,
                    Some("Administered but unscored; seeds delayed recall"),
                ),
                ("arithmetic", "Arithmetic", 3, Some("Two sub-answers worth 1 and 2")),
                (
                    "fluency",
                    "Animal Fluency",
                    3,
                    Some("0-4: 0, 5-9: 1, 10-14: 2, 15+: 3"),
                ),
                ("delayed_recall", "Delayed Recall", 5, Some("One point per word of five")),
                (
                    "digit_span",
                    "Backward Digit Span",
                    3,
                    Some("0 both incorrect, 1 only first correct, 3 both correct"),
                ),
                ("clock_drawing", "Clock Drawing", 4, None),
                ("visuospatial", "Figure Recognition", 2, Some("One point per sub-task of two")),
                (
                    "story_recall",
                    "Story Recall",
                    8,
                    Some("Four sub-items worth 2 each, no partial credit"),
                ),
            ];

            items
                .iter()
                .map(|(id, name, max, desc)| ItemDef {
                    id: id.to_string(),
                    name: name.to_string(),
                    range: ScoreRange::new(0, *max),
                    description: desc.map(str::to_string),
                })
                .collect()
        });
        &ITEMS
    }
}
