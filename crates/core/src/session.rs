//! Caller-owned session state.
//!
//! A session holds everything that survives between questions: the loaded
//! document reference, the question/answer history, and challenge progress.
//! It is passed explicitly into every call that needs it, so chunking and
//! selection never see hidden state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chunk::Citation;
use crate::document::DocumentId;
use crate::quiz::{ChallengeQuestion, Evaluation};

/// Unique identifier for a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One answered question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    /// Free-text reference returned by the model.
    pub reference: String,
    /// Source spans that were in the context window.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    pub timestamp: DateTime<Utc>,
}

/// Progress through a challenge quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeState {
    pub questions: Vec<ChallengeQuestion>,
    pub current_index: usize,
    /// User answers keyed by question index.
    pub answers: BTreeMap<usize, String>,
    /// Evaluations keyed by question index.
    pub evaluations: BTreeMap<usize, Evaluation>,
}

impl ChallengeState {
    pub fn new(questions: Vec<ChallengeQuestion>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&ChallengeQuestion> {
        self.questions.get(self.current_index)
    }

    /// Record an answer and its evaluation, then move to the next question.
    pub fn record(&mut self, index: usize, answer: impl Into<String>, evaluation: Evaluation) {
        self.answers.insert(index, answer.into());
        self.evaluations.insert(index, evaluation);
        if index == self.current_index && self.current_index < self.questions.len() {
            self.current_index += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.evaluations.len() >= self.questions.len()
    }

    /// Sum of all evaluation scores recorded so far.
    pub fn total_score(&self) -> u32 {
        self.evaluations.values().map(|e| e.score as u32).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// The loaded document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    pub turns: Vec<ChatTurn>,
    #[serde(default)]
    pub challenge: ChallengeState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            document_id: None,
            document_name: None,
            turns: Vec::new(),
            challenge: ChallengeState::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a freshly uploaded document, discarding all prior state.
    pub fn load_document(&mut self, id: DocumentId, name: impl Into<String>) {
        self.reset();
        self.document_id = Some(id);
        self.document_name = Some(name.into());
    }

    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.updated_at = Utc::now();
        self.turns.push(turn);
    }

    /// Render the last `n` turns for inclusion in a prompt.
    ///
    /// Returns an empty string when there is no history.
    pub fn recent_context(&self, n: usize) -> String {
        if self.turns.is_empty() || n == 0 {
            return String::new();
        }
        let skip = self.turns.len().saturating_sub(n);
        let mut out = String::from("Recent conversation:\n");
        for turn in &self.turns[skip..] {
            out.push_str(&format!("Q: {}\nA: {}\n\n", turn.question, turn.answer));
        }
        out
    }

    pub fn clear_history(&mut self) {
        self.updated_at = Utc::now();
        self.turns.clear();
    }

    /// Forget the document, history, and challenge progress.
    pub fn reset(&mut self) {
        self.document_id = None;
        self.document_name = None;
        self.turns.clear();
        self.challenge = ChallengeState::default();
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
