use std::collections::BTreeMap;

use serde::Serialize;
use smartdoc_core::{ChallengeQuestion, QuestionKind};

/// Summary of a generated question set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionStatistics {
    pub total: usize,
    pub by_kind: BTreeMap<QuestionKind, usize>,
    /// Mean question length in characters; 0 for an empty set.
    pub average_question_length: f64,
}

pub fn question_statistics(questions: &[ChallengeQuestion]) -> QuestionStatistics {
    if questions.is_empty() {
        return QuestionStatistics::default();
    }

    let mut by_kind = BTreeMap::new();
    for q in questions {
        *by_kind.entry(q.kind).or_insert(0) += 1;
    }
    let total_chars: usize = questions.iter().map(|q| q.question.chars().count()).sum();

    QuestionStatistics {
        total: questions.len(),
        by_kind,
        average_question_length: total_chars as f64 / questions.len() as f64,
    }
}
