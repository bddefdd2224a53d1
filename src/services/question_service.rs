use std::sync::Arc;

use crate::{
    constants::quiz_prompt::question_generation_prompt,
    errors::{AppError, AppResult},
    models::{
        domain::question::QuestionSet,
        dto::{gemini::GenerateContentRequest, request::GenerateQuestionsRequest},
    },
    services::{generation_client::TextGenerator, response_parser::questions_from_response},
};

pub struct QuestionService {
    generator: Arc<dyn TextGenerator>,
    question_count: u16,
}

impl QuestionService {
    pub fn new(generator: Arc<dyn TextGenerator>, question_count: u16) -> Self {
        Self {
            generator,
            question_count,
        }
    }

    pub fn question_count(&self) -> u16 {
        self.question_count
    }

    /// Asks the generator for questions on `topic`. A blank topic fails
    /// before any request is made.
    pub async fn fetch_questions(&self, topic: &str) -> AppResult<QuestionSet> {
        let request = GenerateQuestionsRequest::validated(topic, self.question_count)?;

        log::info!(
            "Generating {} questions for topic '{}'",
            request.question_count,
            request.topic
        );

        let prompt = question_generation_prompt(&request.topic, request.question_count);
        let response = self
            .generator
            .generate_content(&GenerateContentRequest::from_prompt(prompt))
            .await?;

        let questions = questions_from_response(&response)?;
        let question_set = QuestionSet::new(questions).ok_or_else(|| {
            AppError::EmptyResponse("generated question list is empty".to_string())
        })?;

        if question_set.len() != usize::from(request.question_count) {
            log::info!(
                "Requested {} questions, received {}",
                request.question_count,
                question_set.len()
            );
        }

        Ok(question_set)
    }
}
