use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        question::{OptionLabel, QuestionSet},
        quiz_session::{AnswerOutcome, QuizSession},
    },
    services::{
        generation_client::{GeminiClient, TextGenerator},
        question_service::QuestionService,
    },
};

/// Marks a fetch as in flight for as long as it lives.
pub struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl LoadingGuard {
    pub fn acquire(flag: &Arc<AtomicBool>) -> AppResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::FetchInProgress)?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Everything the front-end shows, changed only through the methods below.
pub struct AppState {
    question_service: Arc<QuestionService>,
    loading: Arc<AtomicBool>,
    topic: String,
    questions: Option<QuestionSet>,
    session: Option<QuizSession>,
}

impl AppState {
    /// Builds the HTTP-backed state. Call [`Config::validate`] first when a
    /// fetch is going to be made.
    pub fn new(config: &Config) -> AppResult<Self> {
        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(config)?);
        Ok(Self::with_generator(generator, config.question_count))
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>, question_count: u16) -> Self {
        Self {
            question_service: Arc::new(QuestionService::new(generator, question_count)),
            loading: Arc::new(AtomicBool::new(false)),
            topic: String::new(),
            questions: None,
            session: None,
        }
    }

    /// Fetches a new question set for `topic`.
    ///
    /// A blank topic or an overlapping fetch leaves the state untouched.
    /// Service failures clear the current set so the user starts over.
    pub async fn request_questions(&mut self, topic: &str) -> AppResult<&QuestionSet> {
        let _loading = LoadingGuard::acquire(&self.loading)?;
        let service = Arc::clone(&self.question_service);

        match service.fetch_questions(topic).await {
            Ok(questions) => {
                self.topic = topic.trim().to_string();
                self.session = None;
                Ok(&*self.questions.insert(questions))
            }
            Err(e) if e.is_recoverable() => {
                log::error!("Error fetching questions: {}", e);
                self.questions = None;
                self.session = None;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Uses an already available set, e.g. one imported from CSV.
    pub fn load_questions(&mut self, topic: &str, questions: QuestionSet) {
        self.topic = topic.trim().to_string();
        self.questions = Some(questions);
        self.session = None;
    }

    pub fn start_test(&mut self) -> AppResult<&QuizSession> {
        let questions = self.questions.clone().ok_or_else(|| {
            AppError::PreconditionViolation("no questions loaded to start a test".to_string())
        })?;
        Ok(&*self.session.insert(QuizSession::start(questions)))
    }

    pub fn answer(&mut self, label: OptionLabel) -> AppResult<AnswerOutcome> {
        self.session
            .as_mut()
            .ok_or_else(|| AppError::PreconditionViolation("no test in progress".to_string()))?
            .answer_option(label)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn loading_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.loading)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }
}
