//! Readers for the line-labelled model output the prompts ask for.

use smartdoc_core::{ChallengeQuestion, Evaluation, QuestionKind};

/// Reference recorded when the model ignores the requested format.
pub const FALLBACK_REFERENCE: &str = "General document content";

/// Questions kept from one generation.
pub const MAX_CHALLENGE_QUESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub answer: String,
    pub reference: String,
}

/// Split `line` into a label and its value, e.g. `"Q1: What?"` into
/// `("Q1", "What?")`. Markdown emphasis around the label is ignored.
fn labelled(line: &str) -> Option<(&str, &str)> {
    let line = line.trim().trim_start_matches(['*', '#', '-', ' ']);
    let (label, value) = line.split_once(':')?;
    let label = label.trim().trim_end_matches('*');
    let value = value.trim_start_matches('*').trim();
    Some((label, value))
}

/// Whether `label` is `prefix` optionally followed by digits (`Q`, `Q2`).
fn is_numbered(label: &str, prefix: char) -> bool {
    let mut chars = label.chars();
    chars.next() == Some(prefix) && chars.all(|c| c.is_ascii_digit())
}

/// Read `Answer:` and `Reference:` sections.
///
/// Lines following `Answer:` up to `Reference:` are kept as part of the
/// answer. Without an `Answer:` label the whole text is the answer and
/// the reference is [`FALLBACK_REFERENCE`].
pub fn parse_answer(text: &str) -> ParsedAnswer {
    enum Section {
        None,
        Answer,
        Reference,
    }

    let mut answer: Vec<&str> = Vec::new();
    let mut reference: Vec<&str> = Vec::new();
    let mut section = Section::None;

    for line in text.lines() {
        match labelled(line) {
            Some(("Answer", value)) => {
                section = Section::Answer;
                answer.push(value);
            }
            Some(("Reference", value)) => {
                section = Section::Reference;
                reference.push(value);
            }
            _ => match section {
                Section::Answer => answer.push(line.trim()),
                Section::Reference => reference.push(line.trim()),
                Section::None => {}
            },
        }
    }

    let answer = join_nonempty(&answer);
    if answer.is_empty() {
        return ParsedAnswer {
            answer: text.trim().to_string(),
            reference: FALLBACK_REFERENCE.to_string(),
        };
    }

    ParsedAnswer {
        answer,
        reference: join_nonempty(&reference),
    }
}

fn join_nonempty(lines: &[&str]) -> String {
    lines
        .iter()
        .filter(|l| !l.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read `Qn:` / `An:` pairs, keeping at most [`MAX_CHALLENGE_QUESTIONS`].
///
/// A question without an answer is discarded. Kinds are assigned by
/// position.
pub fn parse_questions(text: &str) -> Vec<ChallengeQuestion> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut question: Option<String> = None;
    let mut answer: Option<String> = None;

    for line in text.lines() {
        let Some((label, value)) = labelled(line) else {
            continue;
        };
        if is_numbered(label, 'Q') {
            if let (Some(q), Some(a)) = (question.take(), answer.take()) {
                pairs.push((q, a));
            }
            question = Some(value.to_string());
            answer = None;
        } else if is_numbered(label, 'A') && question.is_some() {
            answer = Some(value.to_string());
        }
    }
    if let (Some(q), Some(a)) = (question, answer) {
        pairs.push((q, a));
    }

    pairs
        .into_iter()
        .filter(|(q, a)| !q.is_empty() && !a.is_empty())
        .take(MAX_CHALLENGE_QUESTIONS)
        .enumerate()
        .map(|(i, (question, expected_answer))| ChallengeQuestion {
            question,
            expected_answer,
            kind: QuestionKind::for_position(i),
        })
        .collect()
}

/// Read `Score:`, `Feedback:` and `Justification:` lines.
///
/// The score accepts `4`, `4/5` or `4 out of 5` and is clamped to 1..=5;
/// when missing or unreadable it stays neutral.
pub fn parse_evaluation(text: &str) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for line in text.lines() {
        match labelled(line) {
            Some(("Score", value)) => {
                let raw = value
                    .trim_matches('*')
                    .trim()
                    .split(|c: char| c == '/' || c.is_whitespace())
                    .next()
                    .and_then(|s| s.parse::<i64>().ok());
                if let Some(raw) = raw {
                    evaluation.score = Evaluation::clamp_score(raw);
                }
            }
            Some(("Feedback", value)) => evaluation.feedback = value.to_string(),
            Some(("Justification", value)) => evaluation.justification = value.to_string(),
            _ => {}
        }
    }

    evaluation
}

/// Generic questions used when generation fails.
pub fn fallback_questions() -> Vec<ChallengeQuestion> {
    [
        (
            "What are the main topics discussed in this document?",
            "Based on the document content, identify key themes and subjects.",
            QuestionKind::Comprehension,
        ),
        (
            "What conclusions can be drawn from the information presented?",
            "Analyze the evidence and reasoning to identify logical conclusions.",
            QuestionKind::Inference,
        ),
        (
            "How do the different sections of this document relate to each other?",
            "Examine the structure and connections between different parts.",
            QuestionKind::Analysis,
        ),
    ]
    .into_iter()
    .map(|(q, a, kind)| ChallengeQuestion {
        question: q.to_string(),
        expected_answer: a.to_string(),
        kind,
    })
    .collect()
}
