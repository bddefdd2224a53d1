use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::question::Question,
};

/// Flat, export-facing shape of a question: one column per option.
/// Column names match the exported CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    pub question: String,
    #[serde(rename = "optionA")]
    pub option_a: String,
    #[serde(rename = "optionB")]
    pub option_b: String,
    #[serde(rename = "optionC")]
    pub option_c: String,
    #[serde(rename = "optionD")]
    pub option_d: String,
    #[serde(default)]
    pub answer: String,
}

impl From<&Question> for QuestionRecord {
    fn from(question: &Question) -> Self {
        let [a, b, c, d] = question.options.clone();
        QuestionRecord {
            question: question.prompt.clone(),
            option_a: a,
            option_b: b,
            option_c: c,
            option_d: d,
            answer: question.correct_answer.clone(),
        }
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = AppError;

    fn try_from(record: QuestionRecord) -> AppResult<Self> {
        let question = Question::new(
            record.question,
            [
                record.option_a,
                record.option_b,
                record.option_c,
                record.option_d,
            ],
            record.answer,
        );
        question
            .check_well_formed()
            .map_err(|defect| AppError::ValidationError(format!("question {}", defect)))?;
        Ok(question)
    }
}
