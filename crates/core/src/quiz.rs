//! Challenge-mode value types: generated questions and graded answers.

use serde::{Deserialize, Serialize};

/// What a challenge question is meant to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Comprehension,
    Inference,
    Analysis,
    Evaluation,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::Comprehension,
        QuestionKind::Inference,
        QuestionKind::Analysis,
        QuestionKind::Evaluation,
    ];

    /// Kind assigned to the question at `position` in a generated set.
    pub fn for_position(position: usize) -> Self {
        Self::ALL[position % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comprehension => "comprehension",
            Self::Inference => "inference",
            Self::Analysis => "analysis",
            Self::Evaluation => "evaluation",
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeQuestion {
    pub question: String,
    pub expected_answer: String,
    pub kind: QuestionKind,
}

/// A graded answer. `score` is always within 1..=5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u8,
    pub feedback: String,
    pub justification: String,
}

impl Evaluation {
    pub const MIN_SCORE: u8 = 1;
    pub const MAX_SCORE: u8 = 5;
    pub const NEUTRAL_SCORE: u8 = 3;

    /// Clamp any integer score into the valid range.
    pub fn clamp_score(raw: i64) -> u8 {
        raw.clamp(Self::MIN_SCORE as i64, Self::MAX_SCORE as i64) as u8
    }
}

impl Default for Evaluation {
    fn default() -> Self {
        Self {
            score: Self::NEUTRAL_SCORE,
            feedback: String::new(),
            justification: String::new(),
        }
    }
}
