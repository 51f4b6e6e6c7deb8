use smartdoc_core::ValidationError;

pub const MIN_QUESTION_CHARS: usize = 5;
pub const MAX_QUESTION_CHARS: usize = 500;

/// Check a user question and return it trimmed.
pub fn validate_question(question: &str) -> Result<&str, ValidationError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    if trimmed.chars().count() < MIN_QUESTION_CHARS {
        return Err(ValidationError::QuestionTooShort {
            min: MIN_QUESTION_CHARS,
        });
    }
    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(ValidationError::QuestionTooLong {
            max: MAX_QUESTION_CHARS,
        });
    }
    Ok(trimmed)
}
