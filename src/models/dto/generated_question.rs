use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{Question, OPTION_COUNT};

/// One question object as the generator writes it:
/// `{ "question": "...", "options": [..4..], "answer": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl GeneratedQuestion {
    /// `position` is 1-based and only used in error messages.
    pub fn normalize(self, position: usize) -> AppResult<Question> {
        let option_count = self.options.len();
        let options: [String; OPTION_COUNT] = self.options.try_into().map_err(|_| {
            AppError::ParseError(format!(
                "question {} has {} options, expected {}",
                position, option_count, OPTION_COUNT
            ))
        })?;

        let question = Question::new(self.question, options, self.answer.unwrap_or_default());
        question
            .check_well_formed()
            .map_err(|defect| AppError::ParseError(format!("question {} {}", position, defect)))?;

        if question.correct_label().is_none() {
            log::warn!(
                "Question {} answer '{}' matches none of its options",
                position,
                question.correct_answer
            );
        }

        Ok(question)
    }
}
