//! Terminal rendering of answers.

use docqa_answer::{AnswerReport, SmartAnswer};

/// Shown when the user submits an empty question.
pub const EMPTY_QUESTION_WARNING: &str = "Please enter a question.";

/// Shown when no sub-question produced an answer.
pub const NO_ANSWER_NOTICE: &str = "No answer found.";

/// Human-readable answer text.
pub fn render_answer(answer: &SmartAnswer) -> String {
    match answer {
        SmartAnswer::Answer { text } => format!("Answer: {}", text),
        SmartAnswer::Partial { text, missing } => format!(
            "Partial answer: {}\n(no answer found for: {})",
            text,
            missing.join("; ")
        ),
        SmartAnswer::NoAnswer => NO_ANSWER_NOTICE.to_string(),
    }
}

/// Structured answer for `--json` output.
pub fn answer_json(report: &AnswerReport) -> serde_json::Value {
    let sub_answers: Vec<serde_json::Value> = report
        .sub_answers
        .iter()
        .map(|sub| {
            serde_json::json!({
                "question": sub.question,
                "answer": sub.answer.as_ref().map(|a| &a.text),
                "score": sub.answer.as_ref().map(|a| a.score),
                "chunk": sub.answer.as_ref().map(|a| a.chunk_index),
            })
        })
        .collect();

    serde_json::json!({
        "question": report.question,
        "answer": report.answer,
        "subAnswers": sub_answers,
    })
}
