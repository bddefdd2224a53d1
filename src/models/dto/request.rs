use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};

pub const MAX_TOPIC_LENGTH: u64 = 200;
pub const MAX_QUESTION_COUNT: u16 = 500;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, max = MAX_TOPIC_LENGTH, message = "Please enter a topic"))]
    pub topic: String,

    #[validate(range(min = 1, max = MAX_QUESTION_COUNT))]
    pub question_count: u16,
}

impl GenerateQuestionsRequest {
    /// The topic is trimmed first, so whitespace-only input fails the
    /// minimum-length check.
    pub fn new(topic: &str, question_count: u16) -> Self {
        Self {
            topic: topic.trim().to_string(),
            question_count,
        }
    }

    /// Topic problems are `ValidationError`s. An out-of-range count comes
    /// from configuration, not from the user, and is a `ConfigError`.
    pub fn validated(topic: &str, question_count: u16) -> AppResult<Self> {
        let request = Self::new(topic, question_count);
        if let Err(errors) = request.validate() {
            if errors.field_errors().contains_key("question_count") {
                return Err(AppError::ConfigError(format!(
                    "question count must be between 1 and {}, got {}",
                    MAX_QUESTION_COUNT, question_count
                )));
            }
            return Err(errors.into());
        }
        Ok(request)
    }
}
