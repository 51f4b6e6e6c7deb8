//! Prompt templates.
//!
//! Every request SmartDoc makes is a single user prompt. The templates
//! ask for line-labelled output (`Answer:`, `Q1:`, `Score:`) which the
//! parsers in [`crate::parse`] read back.

/// Characters of document text shown when generating questions.
pub const QUESTION_EXCERPT_CHARS: usize = 2000;

/// Characters of document text shown when grading an answer.
pub const EVALUATION_EXCERPT_CHARS: usize = 1000;

pub const NOT_IN_DOCUMENT: &str =
    "The document doesn't contain information to answer this question";

/// Grounded question-answering prompt.
///
/// `context` is the rendered context window; `history` is the session's
/// recent conversation and may be empty.
pub fn answer_prompt(context: &str, history: &str, question: &str) -> String {
    let mut prompt = String::from(
        "Based ONLY on the following document content, answer the user's question.\n\n",
    );
    prompt.push_str("Document content:\n");
    prompt.push_str(context);
    prompt.push_str("\n\n");
    if !history.is_empty() {
        prompt.push_str(history);
    }
    prompt.push_str(&format!("Question: {question}\n\n"));
    prompt.push_str(&format!(
        "Instructions:\n\
         1. Answer only based on the provided document content\n\
         2. If the answer isn't in the document, say \"{NOT_IN_DOCUMENT}\"\n\
         3. Cite the numbered excerpt(s) that support your answer\n\
         4. Be accurate and don't make assumptions beyond what's stated\n\n\
         Format your response as:\n\
         Answer: [Your answer]\n\
         Reference: [Specific location in document that supports this answer]\n"
    ));
    prompt
}

pub fn summary_prompt(key_content: &str, max_words: usize) -> String {
    format!(
        "Summarize the following document in {max_words} words or less. Focus on:\n\
         1. Main purpose/objective\n\
         2. Key findings or points\n\
         3. Important conclusions\n\n\
         Document content: {key_content}\n"
    )
}

pub fn question_prompt(excerpt: &str, count: usize) -> String {
    let mut format_lines = String::new();
    for n in 1..=count {
        format_lines.push_str(&format!(
            "Q{n}: [Question]\nA{n}: [Expected answer based on document]\n\n"
        ));
    }
    format!(
        "Based on the following document, generate exactly {count} challenging questions \
         that test comprehension, inference, and analysis.\n\n\
         Document: {excerpt}\n\n\
         Create questions that:\n\
         1. Require understanding of key concepts\n\
         2. Test ability to make inferences\n\
         3. Analyze relationships between ideas\n\n\
         Format each question as:\n{format_lines}"
    )
}

pub fn evaluation_prompt(
    excerpt: &str,
    question: &str,
    expected_answer: &str,
    user_answer: &str,
) -> String {
    format!(
        "Document excerpt: {excerpt}...\n\n\
         Question: {question}\n\
         Expected answer: {expected_answer}\n\
         User's answer: {user_answer}\n\n\
         Evaluate the user's answer on a scale of 1-5 and provide constructive feedback.\n\
         Consider:\n\
         1. Accuracy compared to document content\n\
         2. Completeness of the response\n\
         3. Understanding demonstrated\n\n\
         Format your response as:\n\
         Score: [1-5]\n\
         Feedback: [Your detailed feedback]\n\
         Justification: [Reference to specific document content]\n"
    )
}
