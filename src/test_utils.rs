#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::question::{Question, QuestionSet};
    use crate::models::dto::gemini::GenerateContentResponse;

    /// Question `n` whose correct answer is always option A.
    pub fn question(n: usize) -> Question {
        Question::new(
            format!("Question {}?", n),
            [
                format!("right {}", n),
                format!("wrong {}a", n),
                format!("wrong {}b", n),
                format!("wrong {}c", n),
            ],
            format!("right {}", n),
        )
    }

    /// A set of `count` questions built with [`question`].
    pub fn question_set(count: usize) -> QuestionSet {
        QuestionSet::new((1..=count).map(question).collect()).expect("count must be at least 1")
    }

    /// A service envelope carrying `count` generated questions as fenced JSON.
    pub fn fenced_response(count: usize) -> GenerateContentResponse {
        let items: Vec<serde_json::Value> = (1..=count)
            .map(|n| {
                let q = question(n);
                serde_json::json!({
                    "question": q.prompt,
                    "options": q.options,
                    "answer": q.correct_answer,
                })
            })
            .collect();
        let body = serde_json::to_string_pretty(&items).expect("fixture serializes");
        GenerateContentResponse::from_text(format!("```json\n{}\n```", body))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::response_parser::questions_from_response;

    #[test]
    fn test_fixtures_question_set() {
        let set = question_set(3);
        assert_eq!(set.len(), 3);
        assert!(set.iter().all(|q| q.is_correct(&q.options[0])));
    }

    #[test]
    fn test_fixtures_fenced_response_parses_back() {
        let questions = questions_from_response(&fenced_response(2)).expect("fixture parses");
        assert_eq!(questions, question_set(2).into_vec());
    }
}
