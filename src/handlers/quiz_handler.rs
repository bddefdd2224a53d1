use std::path::{Path, PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::{
    app_state::AppState,
    cli::QuizArgs,
    errors::{AppError, AppResult},
    models::domain::{
        question::{OptionLabel, Question},
        quiz_session::{AnswerOutcome, QuizResult},
    },
    services::csv_export::{export_filename, export_to_file, import_questions},
};

/// Where the terminal front-end gets its input from.
pub trait QuizPrompt {
    fn topic(&mut self) -> AppResult<String>;
    fn retry_fetch(&mut self, error: &AppError) -> AppResult<bool>;
    fn start_test(&mut self, question_count: usize) -> AppResult<bool>;
    fn choose(&mut self, number: usize, total: usize, question: &Question) -> AppResult<OptionLabel>;
}

pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizPrompt for TerminalPrompt {
    fn topic(&mut self) -> AppResult<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt("Enter Topic")
            .allow_empty(true)
            .interact_text()?)
    }

    fn retry_fetch(&mut self, error: &AppError) -> AppResult<bool> {
        eprintln!("{}", error);
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Try again?")
            .default(true)
            .interact()?)
    }

    fn start_test(&mut self, question_count: usize) -> AppResult<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(format!("Start test ({} questions)?", question_count))
            .default(true)
            .interact()?)
    }

    fn choose(&mut self, number: usize, total: usize, question: &Question) -> AppResult<OptionLabel> {
        let items: Vec<String> = OptionLabel::ALL
            .into_iter()
            .map(|label| format!("{}) {}", label, question.option(label)))
            .collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt(format!("[{}/{}] {}", number, total, question.prompt))
            .items(&items)
            .default(0)
            .interact()?;
        OptionLabel::from_index(index)
            .ok_or_else(|| AppError::TerminalError(format!("no option at index {}", index)))
    }
}

/// Loads or generates a set, then runs the test. `None` when the user
/// declines to start.
pub async fn quiz<P: QuizPrompt>(
    state: &mut AppState,
    args: &QuizArgs,
    prompt: &mut P,
) -> AppResult<Option<QuizResult>> {
    match &args.from_csv {
        Some(path) => {
            let questions = import_questions(path)?;
            let topic = args.topic.clone().unwrap_or_else(|| topic_from_path(path));
            state.load_questions(&topic, questions);
        }
        None => fetch_until_available(state, args.topic.clone(), prompt).await?,
    }

    let question_count = state.questions().map_or(0, |q| q.len());
    println!("{} questions ready for \"{}\"", question_count, state.topic());

    if args.export {
        let path = PathBuf::from(export_filename(state.topic()));
        if let Some(questions) = state.questions() {
            export_to_file(&path, questions.as_slice())?;
            println!("CSV written to {}", path.display());
        }
    }

    if !prompt.start_test(question_count)? {
        return Ok(None);
    }

    run_test(state, prompt).map(Some)
}

async fn fetch_until_available<P: QuizPrompt>(
    state: &mut AppState,
    mut topic: Option<String>,
    prompt: &mut P,
) -> AppResult<()> {
    loop {
        let current = match topic.take() {
            Some(t) => t,
            None => prompt.topic()?,
        };

        println!("Generating...");
        match state.request_questions(&current).await {
            Ok(_) => return Ok(()),
            // Topic errors only. A bad count is a ConfigError.
            Err(AppError::ValidationError(message)) => {
                log::debug!("Topic {:?} rejected: {}", current, message);
                eprintln!("Please enter a topic");
            }
            Err(e) if e.is_recoverable() => {
                if !prompt.retry_fetch(&e)? {
                    return Err(e);
                }
                topic = Some(current);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Drives a fresh session to completion, one question per prompt.
pub fn run_test<P: QuizPrompt>(state: &mut AppState, prompt: &mut P) -> AppResult<QuizResult> {
    let session = state.start_test()?;
    let total = session.total();

    loop {
        let (number, question) = {
            let session = state
                .session()
                .ok_or_else(|| AppError::PreconditionViolation("no test in progress".to_string()))?;
            let question = session.current_question().cloned().ok_or_else(|| {
                AppError::PreconditionViolation("session has no current question".to_string())
            })?;
            (session.current_index() + 1, question)
        };

        let label = prompt.choose(number, total, &question)?;
        let outcome = state.answer(label)?;
        println!("{}", describe_outcome(&question, &outcome));

        if let AnswerOutcome::Completed { .. } = outcome {
            let result = state
                .session()
                .and_then(|s| s.result())
                .ok_or_else(|| AppError::PreconditionViolation("session did not complete".to_string()))?;
            println!("{}", describe_result(&result));
            return Ok(result);
        }
    }
}

pub fn describe_outcome(question: &Question, outcome: &AnswerOutcome) -> String {
    if outcome.was_correct() {
        return "Correct!".to_string();
    }
    match question.correct_label() {
        Some(label) => format!("Wrong. The answer was {}) {}", label, question.option(label)),
        None if question.correct_answer.trim().is_empty() => {
            "Wrong. No answer was provided for this question".to_string()
        }
        None => format!("Wrong. The answer was {}", question.correct_answer.trim()),
    }
}

pub fn describe_result(result: &QuizResult) -> String {
    format!(
        "Test completed! Your score: {} / {} ({:.0}%)",
        result.score,
        result.total,
        result.percentage()
    )
}

fn topic_from_path(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.trim_end_matches(crate::services::csv_export::EXPORT_FILENAME_SUFFIX))
        .map(|name| name.trim_end_matches(".csv").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Arc;

    use crate::models::dto::gemini::GenerateContentResponse;
    use crate::services::generation_client::MockTextGenerator;
    use crate::test_utils::fixtures::{fenced_response, question, question_set};

    #[derive(Default)]
    struct ScriptedPrompt {
        topics: VecDeque<String>,
        retries: VecDeque<bool>,
        start: bool,
        choices: VecDeque<OptionLabel>,
        asked: Vec<String>,
    }

    impl QuizPrompt for ScriptedPrompt {
        fn topic(&mut self) -> AppResult<String> {
            self.topics
                .pop_front()
                .ok_or_else(|| AppError::TerminalError("no more topics".to_string()))
        }

        fn retry_fetch(&mut self, _error: &AppError) -> AppResult<bool> {
            Ok(self.retries.pop_front().unwrap_or(false))
        }

        fn start_test(&mut self, _question_count: usize) -> AppResult<bool> {
            Ok(self.start)
        }

        fn choose(&mut self, _number: usize, _total: usize, question: &Question) -> AppResult<OptionLabel> {
            self.asked.push(question.prompt.clone());
            self.choices
                .pop_front()
                .ok_or_else(|| AppError::TerminalError("no more choices".to_string()))
        }
    }

    fn offline_state() -> AppState {
        AppState::with_generator(Arc::new(MockTextGenerator::new()), 3)
    }

    #[test]
    fn test_run_test_scores_each_choice() {
        let mut state = offline_state();
        state.load_questions("Fixtures", question_set(3));
        let mut prompt = ScriptedPrompt {
            choices: VecDeque::from([OptionLabel::A, OptionLabel::C, OptionLabel::A]),
            ..Default::default()
        };

        let result = run_test(&mut state, &mut prompt).expect("test completes");

        assert_eq!(result.score, 2);
        assert_eq!(result.total, 3);
        assert_eq!(result.answers[1], "wrong 2b");
        assert_eq!(prompt.asked, vec!["Question 1?", "Question 2?", "Question 3?"]);
    }

    #[tokio::test]
    async fn test_quiz_prompts_for_topic_until_one_is_given() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate_content()
            .times(1)
            .returning(|_| Ok(fenced_response(2)));
        let mut state = AppState::with_generator(Arc::new(mock), 2);
        let mut prompt = ScriptedPrompt {
            topics: VecDeque::from(["   ".to_string(), "Fixtures".to_string()]),
            start: true,
            choices: VecDeque::from([OptionLabel::A, OptionLabel::A]),
            ..Default::default()
        };
        let args = QuizArgs {
            topic: None,
            from_csv: None,
            export: false,
        };

        let result = quiz(&mut state, &args, &mut prompt)
            .await
            .expect("quiz runs")
            .expect("test was started");

        assert_eq!(result.score, 2);
        assert_eq!(state.topic(), "Fixtures");
    }

    #[tokio::test]
    async fn test_quiz_retries_after_service_failure() {
        let mut mock = MockTextGenerator::new();
        let mut calls = 0;
        mock.expect_generate_content().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(GenerateContentResponse::from_text("no json here"))
            } else {
                Ok(fenced_response(1))
            }
        });
        let mut state = AppState::with_generator(Arc::new(mock), 1);
        let mut prompt = ScriptedPrompt {
            retries: VecDeque::from([true]),
            start: false,
            ..Default::default()
        };
        let args = QuizArgs {
            topic: Some("Fixtures".to_string()),
            from_csv: None,
            export: false,
        };

        let result = quiz(&mut state, &args, &mut prompt).await.expect("quiz runs");

        assert!(result.is_none());
        assert_eq!(state.questions().map(|q| q.len()), Some(1));
    }

    #[tokio::test]
    async fn test_quiz_returns_question_count_error_without_prompting() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate_content().times(0);
        let mut state = AppState::with_generator(Arc::new(mock), 600);
        let mut prompt = ScriptedPrompt {
            topics: VecDeque::from(["Fixtures".to_string()]),
            ..Default::default()
        };
        let args = QuizArgs {
            topic: Some("Algebra".to_string()),
            from_csv: None,
            export: false,
        };

        let err = quiz(&mut state, &args, &mut prompt).await.unwrap_err();

        assert!(matches!(err, AppError::ConfigError(_)));
        assert_eq!(prompt.topics.len(), 1);
        assert!(state.questions().is_none());
    }

    #[tokio::test]
    async fn test_quiz_gives_up_when_retry_is_declined() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate_content()
            .times(1)
            .returning(|_| Err(AppError::NetworkError("offline".to_string())));
        let mut state = AppState::with_generator(Arc::new(mock), 1);
        let mut prompt = ScriptedPrompt::default();
        let args = QuizArgs {
            topic: Some("Fixtures".to_string()),
            from_csv: None,
            export: false,
        };

        let err = quiz(&mut state, &args, &mut prompt).await.unwrap_err();

        assert_eq!(err, AppError::NetworkError("offline".to_string()));
        assert!(state.questions().is_none());
    }

    #[tokio::test]
    async fn test_quiz_from_csv_skips_generation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(export_filename("Saved Topic"));
        export_to_file(&path, question_set(2).as_slice()).expect("export");

        let mut state = offline_state();
        let mut prompt = ScriptedPrompt {
            start: true,
            choices: VecDeque::from([OptionLabel::B, OptionLabel::A]),
            ..Default::default()
        };
        let args = QuizArgs {
            topic: None,
            from_csv: Some(path),
            export: false,
        };

        let result = quiz(&mut state, &args, &mut prompt)
            .await
            .expect("quiz runs")
            .expect("test was started");

        assert_eq!(state.topic(), "Saved Topic");
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_describe_outcome_names_the_right_option() {
        let q = question(4);
        let wrong = AnswerOutcome::Next {
            correct: false,
            next_index: 1,
        };
        let right = AnswerOutcome::Next {
            correct: true,
            next_index: 1,
        };

        assert_eq!(describe_outcome(&q, &right), "Correct!");
        assert_eq!(describe_outcome(&q, &wrong), "Wrong. The answer was A) right 4");

        let mut unanswered = q.clone();
        unanswered.correct_answer = String::new();
        assert_eq!(
            describe_outcome(&unanswered, &wrong),
            "Wrong. No answer was provided for this question"
        );
    }

    #[test]
    fn test_describe_result_reports_score() {
        let result = QuizResult {
            score: 3,
            total: 4,
            answers: vec![],
        };

        assert_eq!(describe_result(&result), "Test completed! Your score: 3 / 4 (75%)");
    }
}
