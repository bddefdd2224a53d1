use serde::Serialize;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{OptionLabel, Question, QuestionSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::NotStarted => write!(f, "not started"),
            SessionStatus::InProgress => write!(f, "in progress"),
            SessionStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Next {
        correct: bool,
        next_index: usize,
    },
    Completed {
        correct: bool,
        score: usize,
        total: usize,
    },
}

impl AnswerOutcome {
    pub fn was_correct(&self) -> bool {
        match self {
            AnswerOutcome::Next { correct, .. } | AnswerOutcome::Completed { correct, .. } => {
                *correct
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<String>,
}

impl QuizResult {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 * 100.0 / self.total as f64
    }
}

/// One attempt at a question set.
///
/// All mutation goes through [`QuizSession::answer`], which scores the
/// selection, records it, advances and checks for completion in one step.
/// A completed session never changes again; retaking means a new session.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: QuestionSet,
    current_index: usize,
    score: usize,
    answers: Vec<String>,
    status: SessionStatus,
}

impl QuizSession {
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            current_index: 0,
            score: 0,
            answers: Vec::new(),
            status: SessionStatus::NotStarted,
        }
    }

    pub fn start(questions: QuestionSet) -> Self {
        let mut session = Self::new(questions);
        session.status = SessionStatus::InProgress;
        session
    }

    pub fn begin(&mut self) -> AppResult<()> {
        if self.status != SessionStatus::NotStarted {
            return Err(AppError::PreconditionViolation(format!(
                "cannot start a session that is {}",
                self.status
            )));
        }
        self.status = SessionStatus::InProgress;
        Ok(())
    }

    pub fn answer(&mut self, selected: &str) -> AppResult<AnswerOutcome> {
        if self.status != SessionStatus::InProgress {
            return Err(AppError::PreconditionViolation(format!(
                "cannot answer while the session is {}",
                self.status
            )));
        }

        let question = self.questions.get(self.current_index).ok_or_else(|| {
            AppError::PreconditionViolation(format!(
                "no question at index {}",
                self.current_index
            ))
        })?;
        let correct = question.is_correct(selected);

        if correct {
            self.score += 1;
        }
        self.answers.push(selected.to_string());
        self.current_index += 1;

        if self.current_index == self.questions.len() {
            self.status = SessionStatus::Completed;
            log::debug!(
                "Quiz session completed with score {}/{}",
                self.score,
                self.questions.len()
            );
            Ok(AnswerOutcome::Completed {
                correct,
                score: self.score,
                total: self.questions.len(),
            })
        } else {
            Ok(AnswerOutcome::Next {
                correct,
                next_index: self.current_index,
            })
        }
    }

    /// Answers with the text of option `label` of the current question.
    pub fn answer_option(&mut self, label: OptionLabel) -> AppResult<AnswerOutcome> {
        let selected = self
            .current_question()
            .map(|q| q.option(label).to_string())
            .ok_or_else(|| {
                AppError::PreconditionViolation(format!(
                    "no question to answer while the session is {}",
                    self.status
                ))
            })?;
        self.answer(&selected)
    }

    /// The question awaiting an answer, only while in progress.
    pub fn current_question(&self) -> Option<&Question> {
        if self.status == SessionStatus::InProgress {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.is_completed().then(|| QuizResult {
            score: self.score,
            total: self.questions.len(),
            answers: self.answers.clone(),
        })
    }
}
